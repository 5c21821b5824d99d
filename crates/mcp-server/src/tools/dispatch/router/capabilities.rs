use super::super::{catalog, CallToolResult, MigrationService};
use super::error::tool_success;
use crate::tools::schemas::capabilities::{CapabilitiesRequest, CapabilitiesResult};
use modus_migrate_protocol::{
    Capabilities, CapabilitiesPaths, CapabilitiesServer, ToolNextAction,
    CAPABILITIES_SCHEMA_VERSION,
};
use serde_json::json;
use std::path::Path;

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Server version, resolved data paths and where an agent should start.
pub(in crate::tools::dispatch) fn capabilities(
    service: &MigrationService,
    _request: CapabilitiesRequest,
) -> CallToolResult {
    let config = service.ctx.config();

    let start_route = ToolNextAction {
        tool: "get_all_migration_data".to_string(),
        args: json!({}),
        reason: format!(
            "Load the Modus {} -> {} mapping, plan and rules once, then analyze markup with analyze_code_for_migration.",
            config.source.version, config.target.version
        ),
    };

    let result = CapabilitiesResult {
        capabilities: Capabilities {
            schema_version: CAPABILITIES_SCHEMA_VERSION,
            server: CapabilitiesServer {
                name: "modus-migrate-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            source_version: config.source.version.clone(),
            target_version: config.target.version.clone(),
            paths: CapabilitiesPaths {
                install_root: display(&config.install_root),
                data_dir: display(&config.data_dir),
                prompts_dir: display(&config.prompts_dir),
                output_dir: display(&config.output_dir),
            },
            tools: catalog::tool_names(),
            start_route,
        },
        config_file: config.config_file.as_deref().map(display),
    };

    tool_success("server_capabilities", &result)
}
