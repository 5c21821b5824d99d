use modus_migrate_catalog::{
    ComponentRecord, ComponentSummary, MappingEntry, MemberMappingReport, RelatedComponent,
    ResolutionRule, VerificationRule,
};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListComponentsRequest {
    /// Component library version to list
    #[schemars(description = "Component library version to list: \"1.0\" (source) or \"2.0\" (target). Default: target version.")]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListComponentsResult {
    pub components: Vec<ComponentSummary>,
    pub total_count: usize,
    pub version: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetComponentRequest {
    /// Component name
    #[schemars(description = "Component name: simple name ('button'), tag ('modus-wc-button') or table key ('modus-wc-button.tsx').")]
    #[serde(alias = "name")]
    pub component_name: String,

    #[schemars(description = "Component library version: \"1.0\" or \"2.0\". Default: target version.")]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetComponentResult {
    pub component_name: String,
    pub tag_name: String,
    pub version: String,
    /// Table key the name resolved to.
    pub key: String,
    pub resolved_by: ResolutionRule,
    #[serde(flatten)]
    pub record: ComponentRecord,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComponentMigrationDataRequest {
    #[schemars(description = "Source component name ('button', 'modus-button' or 'modus-button.js').")]
    #[serde(alias = "name")]
    pub component_name: String,
}

#[derive(Debug, Serialize)]
pub struct ComponentSide {
    pub tag: String,
    pub key: Option<String>,
    pub version: String,
    pub record: Option<ComponentRecord>,
}

#[derive(Debug, Serialize)]
pub struct ComponentMigrationDataResult {
    pub component_name: String,
    pub source: ComponentSide,
    pub target: Option<ComponentSide>,
    pub mapping: Option<MappingEntry>,
    pub member_mappings: MemberMappingReport,
    pub related_components: Vec<RelatedComponent>,
    pub verification_rules: Vec<VerificationRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
