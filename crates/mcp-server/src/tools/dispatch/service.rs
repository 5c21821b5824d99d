use super::{catalog, router, MigrationService, ToolContext};
use crate::runtime_env::ServerConfig;
use rmcp::model::{Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool_handler, ServerHandler};
use std::sync::Arc;

impl MigrationService {
    pub fn new(config: ServerConfig) -> Self {
        log::info!(
            "serving Modus {} -> {} from {}",
            config.source.version,
            config.target.version,
            config.data_dir.display()
        );
        Self {
            ctx: Arc::new(ToolContext::new(config)),
            tool_router: router::build_tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for MigrationService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::tool_instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
