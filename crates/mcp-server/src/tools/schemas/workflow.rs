use rmcp::schemars;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RunMigrationWorkflowRequest {
    #[schemars(description = "Reply for the current step: 'analyze' (start), 'proceed'/'migrate'/'yes' (after analysis), 'save', 'verify', 'log'.")]
    #[serde(default)]
    pub user_input: String,

    #[schemars(description = "Markup to migrate. Required on the first call.")]
    pub file_content: Option<String>,

    #[schemars(description = "Migrated markup to verify (used by the 'verify' step).")]
    pub migrated_file_content: Option<String>,

    #[schemars(description = "State object returned by the previous call (object or JSON string). Omit on the first call.")]
    pub previous_state: Option<Value>,
}
