// Per-tool dispatch functions used by the MCP tool router.

pub(super) mod capabilities;
pub(super) mod components;
pub(super) mod error;
pub(super) mod guidance;
pub(super) mod migration;
pub(super) mod mui;
pub(super) mod workflow;

mod tool_router;

pub(super) fn build_tool_router() -> rmcp::handler::server::tool::ToolRouter<super::MigrationService>
{
    tool_router::build_tool_router()
}
