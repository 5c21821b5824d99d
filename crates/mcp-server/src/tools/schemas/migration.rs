use modus_migrate_catalog::AnalysisReport;
use modus_migrate_markup::RewriteChange;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct MigrationGuideRequest {}

#[derive(Debug, Serialize)]
pub struct MigrationGuideResult {
    pub component_mapping: Value,
    pub migration_plan: Vec<Value>,
    pub verification_rules: Value,
    pub workflow_md: String,
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct AllMigrationDataRequest {}

#[derive(Debug, Clone, Serialize)]
pub struct AllMigrationDataResult {
    pub component_mapping: Value,
    pub migration_plan: Vec<Value>,
    pub verification_rules: Value,
    pub target_components: Value,
    pub migrate_md: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeCodeRequest {
    #[schemars(description = "Markup/source text to scan for source-version component tags.")]
    pub file_content: String,

    #[schemars(description = "Free-form context for the analysis (logged only).")]
    pub additional_info: Option<String>,

    #[schemars(description = "Write the report to analysis_report.json in the output directory. Default: false (preview).")]
    pub save_analysis: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalyzeCodeResult {
    Preview {
        analysis_report: AnalysisReport,
        analysis_md: String,
        prompt: String,
    },
    Saved {
        status: String,
        message: String,
        analysis_file: String,
        analysis_report: AnalysisReport,
    },
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateMigratedCodeRequest {
    #[schemars(description = "Original markup to rewrite.")]
    pub file_content: String,

    #[schemars(description = "Report returned by analyze_code_for_migration (object or JSON string). Must have status 'Analysis Complete'.")]
    pub analysis_report: Value,
}

#[derive(Debug, Serialize)]
pub struct GenerateMigratedCodeResult {
    pub migrated_file_content: String,
    pub changes_applied: Vec<String>,
    pub changes: Vec<RewriteChange>,
    pub status: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VerificationRulesRequest {
    #[schemars(description = "Migrated markup to check for leftover source-version tags.")]
    #[serde(default)]
    pub migrated_file_content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub verify_md: String,
    pub rules: Value,
    pub remaining_source_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationRulesResult {
    pub verification_report: VerificationReport,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LogMigrationSummaryRequest {
    #[schemars(description = "Analysis report (object or JSON string).")]
    pub analysis_report: Option<Value>,

    #[schemars(description = "Code generation / migration data report (object or JSON string).")]
    pub generation_report: Option<Value>,

    #[schemars(description = "Verification report (object or JSON string).")]
    pub verification_report: Option<Value>,

    #[schemars(description = "Final notes appended to the log.")]
    pub additional_info: Option<String>,

    #[schemars(description = "Write migration_log.json to the output directory. Default: false (preview).")]
    pub save_log: Option<bool>,
}

/// Body of `migration_log.json`.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationLog {
    pub summary: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_generation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LogMigrationSummaryResult {
    Preview {
        log_file_suggestion: String,
        log_content: MigrationLog,
        log_md: String,
        prompt: String,
    },
    Saved {
        log_file: String,
        message: String,
        status: String,
        prompt: String,
    },
}
