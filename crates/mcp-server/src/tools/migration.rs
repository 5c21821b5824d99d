use super::context::ToolContext;
use super::errors::{catalog_error, report_value, ToolOutcome};
use super::persist::write_json_atomic;
use super::schemas::migration::{
    AllMigrationDataResult, AnalyzeCodeRequest, AnalyzeCodeResult, GenerateMigratedCodeRequest,
    GenerateMigratedCodeResult, LogMigrationSummaryRequest, LogMigrationSummaryResult,
    MigrationGuideResult, MigrationLog, VerificationReport, VerificationRulesRequest,
    VerificationRulesResult,
};
use modus_migrate_catalog::{analyze_markup, AnalysisReport, ANALYSIS_FAILED};
use modus_migrate_markup::{extract_prefixed_tags, rewrite};
use modus_migrate_protocol::{ErrorCode, ErrorEnvelope};
use serde_json::{json, Value};

pub(crate) const ANALYSIS_FILE: &str = "analysis_report.json";
pub(crate) const LOG_FILE: &str = "migration_log.json";

pub(crate) const CODE_GENERATION_BLOCKED: &str = "Code Generation Blocked";
pub(crate) const CODE_GENERATION_COMPLETE: &str = "Code Generation Complete";
pub(crate) const LOGGING_COMPLETE: &str = "Logging Complete";
pub(crate) const LOGGING_FAILED: &str = "Logging Failed";

const CACHE_PROMPT: &str =
    "Cache this data for the entire migration session. Use it for all lookups and migration steps.";

pub(crate) fn compute_migration_guide(ctx: &ToolContext) -> ToolOutcome<MigrationGuideResult> {
    let mapping = ctx.mapping().map_err(|err| catalog_error(&err))?;
    Ok(MigrationGuideResult {
        component_mapping: mapping.mapping_json(),
        migration_plan: mapping.migration_plan().to_vec(),
        verification_rules: json!(mapping.verification_rules()),
        workflow_md: ctx.prompt("workflow.md"),
        prompt: "Follow workflow_md: analyze the file, migrate each component, verify, then log."
            .to_string(),
    })
}

/// Mapping, plan, rules and the whole target table in one payload.
pub(crate) fn compute_all_migration_data(
    ctx: &ToolContext,
) -> ToolOutcome<AllMigrationDataResult> {
    let mapping = ctx.mapping().map_err(|err| {
        log::error!("get_all_migration_data: {err}");
        catalog_error(&err)
    })?;
    let target = ctx
        .document(&ctx.target().components_file)
        .map_err(|err| catalog_error(&err))?;

    Ok(AllMigrationDataResult {
        component_mapping: mapping.mapping_json(),
        migration_plan: mapping.migration_plan().to_vec(),
        verification_rules: json!(mapping.verification_rules()),
        target_components: (*target).clone(),
        migrate_md: ctx.prompt("migrate.md"),
        prompt: CACHE_PROMPT.to_string(),
    })
}

/// Count source tags in the markup. Load failures yield a failed report, not an error.
pub(crate) fn analyze(ctx: &ToolContext, file_content: &str) -> AnalysisReport {
    let loaded = ctx
        .source_table()
        .and_then(|table| ctx.mapping().map(|mapping| (table, mapping)));
    match loaded {
        Ok((table, mapping)) => {
            analyze_markup(file_content, &table, &ctx.source().naming(), &mapping)
        }
        Err(err) => {
            log::error!("component data load failed: {err}");
            AnalysisReport::failed(file_content, format!("Failed to load component data: {err}"))
        }
    }
}

fn analysis_prompt(report: &AnalysisReport) -> String {
    match report.error.as_deref() {
        Some(error) => format!(
            "Analysis encountered an error but produced partial results. {error}. Reply 'save' to persist or 'proceed' to continue migration."
        ),
        None => {
            "Review analysis. Reply 'save' to persist or 'proceed' to continue migration."
                .to_string()
        }
    }
}

/// Write the report to the output directory.
pub(crate) fn save_analysis(
    ctx: &ToolContext,
    report: AnalysisReport,
) -> ToolOutcome<AnalyzeCodeResult> {
    let path = ctx.output_path(ANALYSIS_FILE);
    match write_json_atomic(&path, &report) {
        Ok(()) => Ok(AnalyzeCodeResult::Saved {
            status: "Saved".to_string(),
            message: format!("Analysis saved to {}", path.display()),
            analysis_file: path.display().to_string(),
            analysis_report: report,
        }),
        Err(err) => {
            log::error!("saving analysis failed: {err}");
            let message = format!("Failed to save analysis: {err}");
            Err(ErrorEnvelope::new(ErrorCode::WriteFailed, message.clone())
                .with_detail("status", "SaveFailed")
                .with_detail("message", message)
                .with_detail("analysis_report", json!(report)))
        }
    }
}

pub(crate) fn compute_analysis(
    ctx: &ToolContext,
    request: AnalyzeCodeRequest,
) -> ToolOutcome<AnalyzeCodeResult> {
    if let Some(info) = request.additional_info.as_deref() {
        log::info!("analysis context: {info}");
    }
    let report = analyze(ctx, &request.file_content);

    if request.save_analysis.unwrap_or(false) {
        return save_analysis(ctx, report);
    }
    Ok(AnalyzeCodeResult::Preview {
        analysis_md: ctx.prompt("analysis.md"),
        prompt: analysis_prompt(&report),
        analysis_report: report,
    })
}

fn blocked(code: ErrorCode, error: String) -> ErrorEnvelope {
    ErrorEnvelope::new(code, error)
        .with_detail("status", CODE_GENERATION_BLOCKED)
        .with_tip("Run analyze_code_for_migration first and pass its analysis_report unchanged.")
}

pub(crate) fn compute_generated_code(
    request: GenerateMigratedCodeRequest,
) -> ToolOutcome<GenerateMigratedCodeResult> {
    let raw = report_value(&request.analysis_report).map_err(|err| {
        blocked(
            ErrorCode::Serialization,
            format!("Invalid analysis_report JSON: {err}"),
        )
        .with_detail("parse_error", err.to_string())
    })?;
    let report: AnalysisReport = serde_json::from_value(raw).map_err(|err| {
        blocked(
            ErrorCode::Serialization,
            format!("Malformed analysis_report: {err}"),
        )
        .with_detail("parse_error", err.to_string())
    })?;
    if !report.is_complete() {
        return Err(blocked(
            ErrorCode::InvalidState,
            format!(
                "analysis_report status is '{}', expected 'Analysis Complete'",
                report.status
            ),
        ));
    }

    let outcome = rewrite(&request.file_content, &report.tag_mappings()).map_err(|err| {
        blocked(ErrorCode::InvalidArgument, format!("Rewrite failed: {err}"))
    })?;
    Ok(GenerateMigratedCodeResult {
        changes_applied: outcome.change_summaries(),
        migrated_file_content: outcome.output,
        changes: outcome.changes,
        status: CODE_GENERATION_COMPLETE.to_string(),
    })
}

/// Source-family tags still present in migrated markup, first occurrence order.
fn remaining_source_tags(ctx: &ToolContext, content: &str) -> Vec<String> {
    let source_prefix = ctx.source().prefix.as_str();
    let target_prefix = ctx.target().prefix.as_str();
    let tags = match extract_prefixed_tags(content, source_prefix) {
        Ok(tags) => tags,
        Err(err) => {
            log::warn!("tag scan failed: {err}");
            return Vec::new();
        }
    };
    let mut remaining: Vec<String> = Vec::new();
    for tag in tags {
        if tag.starts_with(target_prefix) || remaining.contains(&tag) {
            continue;
        }
        remaining.push(tag);
    }
    remaining
}

pub(crate) fn verification_report(ctx: &ToolContext, migrated: &str) -> VerificationReport {
    let mut warnings = Vec::new();
    let rules = match ctx.mapping() {
        Ok(mapping) => json!(mapping.verification_rules()),
        Err(err) => {
            log::warn!("verification rules unavailable: {err}");
            warnings.push(format!("Verification rules unavailable: {err}"));
            json!([])
        }
    };
    VerificationReport {
        verify_md: ctx.prompt("verify.md"),
        rules,
        remaining_source_tags: remaining_source_tags(ctx, migrated),
        warnings,
    }
}

pub(crate) fn compute_verification_rules(
    ctx: &ToolContext,
    request: VerificationRulesRequest,
) -> VerificationRulesResult {
    VerificationRulesResult {
        verification_report: verification_report(ctx, &request.migrated_file_content),
    }
}

fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// Assemble the log body. Unparsable reports are recorded, not fatal.
pub(crate) fn build_log(request: &LogMigrationSummaryRequest) -> MigrationLog {
    let mut entry = MigrationLog {
        summary: "Migration Process Log".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        analysis: None,
        code_generation: None,
        verification: None,
        logging_error: None,
        final_notes: request.additional_info.clone(),
    };

    let sections = [
        (&request.analysis_report, &mut entry.analysis),
        (&request.generation_report, &mut entry.code_generation),
        (&request.verification_report, &mut entry.verification),
    ];
    for (raw, slot) in sections {
        let Some(raw) = present(raw) else { continue };
        match report_value(raw) {
            Ok(value) => *slot = Some(value),
            Err(err) => {
                log::error!("unparsable report in migration log: {err}");
                entry.logging_error
                    .get_or_insert_with(|| format!("Failed to parse one or more reports: {err}"));
            }
        }
    }
    entry
}

pub(crate) fn compute_log_summary(
    ctx: &ToolContext,
    request: LogMigrationSummaryRequest,
) -> ToolOutcome<LogMigrationSummaryResult> {
    let log_content = build_log(&request);

    if !request.save_log.unwrap_or(false) {
        return Ok(LogMigrationSummaryResult::Preview {
            log_file_suggestion: LOG_FILE.to_string(),
            log_content,
            log_md: ctx.prompt("log.md"),
            prompt: "Review the proposed log. Reply 'save' to write it to migration_log.json."
                .to_string(),
        });
    }

    let path = ctx.output_path(LOG_FILE);
    match write_json_atomic(&path, &log_content) {
        Ok(()) => Ok(LogMigrationSummaryResult::Saved {
            log_file: path.display().to_string(),
            message: format!("Migration summary logged to {}", path.display()),
            status: LOGGING_COMPLETE.to_string(),
            prompt: "Migration summary logged. Workflow complete.".to_string(),
        }),
        Err(err) => {
            log::error!("failed to write migration log: {err}");
            let message = format!("Failed to write migration log: {err}");
            Err(ErrorEnvelope::new(ErrorCode::WriteFailed, message.clone())
                .with_detail("status", LOGGING_FAILED)
                .with_detail("message", message)
                .with_detail("prompt", "Fix the output directory and reply 'save' again."))
        }
    }
}

/// Report analysis failures to callers that expect a complete report.
pub(crate) fn analysis_failed(report: &AnalysisReport) -> bool {
    report.status == ANALYSIS_FAILED
}
