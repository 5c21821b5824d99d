use super::super::*;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_router};

pub(super) fn build_tool_router() -> ToolRouter<MigrationService> {
    MigrationService::tool_router()
}

#[tool_router]
impl MigrationService {
    /// Handshake (server version, data paths, start route).
    #[tool(
        description = "Return server version, source/target Modus versions, resolved data/prompt/output directories, the tool list and the recommended first call."
    )]
    pub async fn server_capabilities(
        &self,
        Parameters(request): Parameters<CapabilitiesRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::capabilities::capabilities(self, request))
    }

    #[tool(
        description = "List every component of a Modus version (default: the target version) with its description and up to five capabilities, sorted by name."
    )]
    pub async fn list_components(
        &self,
        Parameters(request): Parameters<ListComponentsRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::components::list_components(self, request))
    }

    /// Single component record with fuzzy name resolution.
    #[tool(
        description = "Return the full record (props, events, slots, documentation, examples) of one component. Accepts tag names, prefixed or bare names, any case; e.g. 'button', 'modus-wc-button'."
    )]
    pub async fn get_component(
        &self,
        Parameters(request): Parameters<GetComponentRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::components::get_component(self, request))
    }

    #[tool(
        description = "Join everything needed to migrate one source component: source and target records, mapping entry, prop/event name suggestions, related target components and the verification rules that apply."
    )]
    pub async fn get_component_migration_data(
        &self,
        Parameters(request): Parameters<ComponentMigrationDataRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::components::get_component_migration_data(
            self, request,
        ))
    }

    #[tool(
        description = "Return the component mapping table, the derived migration plan, the verification rules and the workflow narrative."
    )]
    pub async fn get_migration_guide(
        &self,
        Parameters(request): Parameters<MigrationGuideRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::migration::get_migration_guide(self, request))
    }

    /// One-shot bundle; agents are told to cache it.
    #[tool(
        description = "Return mapping, migration plan, verification rules and the entire target component table in one call. Call once and cache the result."
    )]
    pub async fn get_all_migration_data(
        &self,
        Parameters(request): Parameters<AllMigrationDataRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::migration::get_all_migration_data(self, request))
    }

    #[tool(
        description = "Count source-version component tags in markup and suggest target tags. Set save_analysis=true to write analysis_report.json to the output directory."
    )]
    pub async fn analyze_code_for_migration(
        &self,
        Parameters(request): Parameters<AnalyzeCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::migration::analyze_code_for_migration(self, request))
    }

    #[tool(
        description = "Rewrite source tags to target tags using a complete analysis report (object or JSON string). Unmapped tags are annotated in place, never dropped."
    )]
    pub async fn generate_migrated_code(
        &self,
        Parameters(request): Parameters<GenerateMigratedCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::migration::generate_migrated_code(request))
    }

    #[tool(
        description = "Return the verification checklist and rules. When migrated_file_content is given, also list source-version tags still present in it."
    )]
    pub async fn get_verification_rules(
        &self,
        Parameters(request): Parameters<VerificationRulesRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::migration::get_verification_rules(self, request))
    }

    #[tool(
        description = "Combine the analysis, code generation and verification reports into a timestamped migration log. Set save_log=true to write migration_log.json."
    )]
    pub async fn log_migration_summary(
        &self,
        Parameters(request): Parameters<LogMigrationSummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::migration::log_migration_summary(self, request))
    }

    /// Caller-held state machine over the migration steps.
    #[tool(
        description = "Drive the migration step by step. Pass back the returned state as previous_state with a short instruction ('analyze', 'save', 'proceed', 'verify', 'log'). Without previous_state the analysis step runs."
    )]
    pub async fn run_migration_workflow(
        &self,
        Parameters(request): Parameters<RunMigrationWorkflowRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::workflow::run_migration_workflow(self, request))
    }

    #[tool(
        description = "Return the markdown guidance, data tables and output directories for one workflow step (analysis, migrate, verify, log, workflow) of the 'modus' or 'mui' family."
    )]
    pub async fn get_guidance(
        &self,
        Parameters(request): Parameters<GuidanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::guidance::get_guidance(self, request))
    }

    #[tool(
        description = "List MUI components that have a Modus equivalent and those that do not, with the mapping rate."
    )]
    pub async fn list_mui_components(
        &self,
        Parameters(request): Parameters<ListMuiComponentsRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::mui::list_mui_components(self, request))
    }

    #[tool(
        description = "Return the Modus equivalent, prop mapping and migration notes for one MUI component (e.g. 'Button')."
    )]
    pub async fn get_mui_component_mapping(
        &self,
        Parameters(request): Parameters<MuiComponentMappingRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::mui::get_mui_component_mapping(self, request))
    }

    #[tool(
        description = "Translate a MUI props object to Modus attributes. Props without an equivalent are returned in unmapped_props with notes."
    )]
    pub async fn transform_mui_props(
        &self,
        Parameters(request): Parameters<TransformMuiPropsRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(super::mui::transform_mui_props(self, request))
    }
}
