use rmcp::schemars;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListMuiComponentsRequest {}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MuiComponentMappingRequest {
    #[schemars(description = "MUI component name, e.g. 'Button' or 'TextField' (case-sensitive).")]
    pub component_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TransformMuiPropsRequest {
    #[schemars(description = "MUI component name, e.g. 'Button'.")]
    pub component_name: String,

    #[schemars(description = "MUI props as a JSON object, e.g. {\"variant\": \"contained\"}.")]
    #[serde(default)]
    pub props: Map<String, Value>,
}
