use modus_migrate_protocol::Capabilities;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CapabilitiesRequest {}

#[derive(Debug, Serialize)]
pub struct CapabilitiesResult {
    #[serde(flatten)]
    pub capabilities: Capabilities,
    pub config_file: Option<String>,
}
