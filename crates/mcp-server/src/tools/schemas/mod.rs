//! Request and response shapes for every tool.
//!
//! Requests derive `JsonSchema` so rmcp can publish them; responses only serialize.

pub(crate) mod capabilities;
pub(crate) mod components;
pub(crate) mod guidance;
pub(crate) mod migration;
pub(crate) mod mui;
pub(crate) mod workflow;
