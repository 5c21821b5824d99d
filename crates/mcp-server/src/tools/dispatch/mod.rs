//! MCP tool dispatch for the Modus migration server
//!
//! Every tool is a thin wrapper: decode the request, run the matching `compute_*`
//! function against the shared [`ToolContext`], and render the outcome as a
//! `CallToolResult` carrying both pretty JSON text and structured content.

use super::catalog;
use super::components::{
    compute_component_migration_data, compute_get_component, compute_list_components,
};
use super::context::ToolContext;
use super::errors::ToolOutcome;
use super::guidance::compute_guidance;
use super::migration::{
    compute_all_migration_data, compute_analysis, compute_generated_code, compute_log_summary,
    compute_migration_guide, compute_verification_rules,
};
use super::mui::{compute_mui_listing, compute_mui_mapping, compute_mui_transform};
use super::schemas::capabilities::CapabilitiesRequest;
use super::schemas::components::{
    ComponentMigrationDataRequest, GetComponentRequest, ListComponentsRequest,
};
use super::schemas::guidance::GuidanceRequest;
use super::schemas::migration::{
    AllMigrationDataRequest, AnalyzeCodeRequest, GenerateMigratedCodeRequest,
    LogMigrationSummaryRequest, MigrationGuideRequest, VerificationRulesRequest,
};
use super::schemas::mui::{
    ListMuiComponentsRequest, MuiComponentMappingRequest, TransformMuiPropsRequest,
};
use super::schemas::workflow::RunMigrationWorkflowRequest;
use super::workflow::compute_workflow_step;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use std::sync::Arc;

mod router;
mod service;

/// MCP service exposing the migration tools.
///
/// Cloning is cheap: the context (and its data cache) is shared.
#[derive(Clone)]
pub struct MigrationService {
    ctx: Arc<ToolContext>,
    tool_router: ToolRouter<Self>,
}
