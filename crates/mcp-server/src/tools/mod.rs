//! Modus migration MCP tool surface.
//!
//! Schemas, per-tool computation and MCP dispatch live in separate submodules; the
//! computation modules know nothing about rmcp and return `ToolOutcome` values.

pub(crate) mod catalog;
mod components;
mod context;
mod dispatch;
mod errors;
mod guidance;
mod migration;
mod mui;
mod persist;
mod schemas;
mod workflow;

pub use dispatch::MigrationService;
