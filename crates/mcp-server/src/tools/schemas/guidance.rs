use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GuidanceRequest {
    #[schemars(description = "Workflow step: 'analyze', 'migrate', 'verify', 'log' or 'workflow'.")]
    pub step: String,

    #[schemars(description = "Migration family: 'modus' (v1 → v2, default) or 'mui' (MUI → Modus).")]
    pub family: Option<String>,
}
