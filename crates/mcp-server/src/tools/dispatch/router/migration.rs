use super::super::{
    compute_all_migration_data, compute_analysis, compute_generated_code, compute_log_summary,
    compute_migration_guide, compute_verification_rules, AllMigrationDataRequest,
    AnalyzeCodeRequest, CallToolResult, GenerateMigratedCodeRequest, LogMigrationSummaryRequest,
    MigrationGuideRequest, MigrationService, VerificationRulesRequest,
};
use super::error::{respond, tool_success};

pub(in crate::tools::dispatch) fn get_migration_guide(
    service: &MigrationService,
    _request: MigrationGuideRequest,
) -> CallToolResult {
    log::info!("get_migration_guide");
    respond("get_migration_guide", compute_migration_guide(&service.ctx))
}

pub(in crate::tools::dispatch) fn get_all_migration_data(
    service: &MigrationService,
    _request: AllMigrationDataRequest,
) -> CallToolResult {
    log::info!("get_all_migration_data");
    respond(
        "get_all_migration_data",
        compute_all_migration_data(&service.ctx),
    )
}

pub(in crate::tools::dispatch) fn analyze_code_for_migration(
    service: &MigrationService,
    request: AnalyzeCodeRequest,
) -> CallToolResult {
    log::info!(
        "analyze_code_for_migration bytes={} save={:?}",
        request.file_content.len(),
        request.save_analysis
    );
    respond(
        "analyze_code_for_migration",
        compute_analysis(&service.ctx, request),
    )
}

pub(in crate::tools::dispatch) fn generate_migrated_code(
    request: GenerateMigratedCodeRequest,
) -> CallToolResult {
    log::info!(
        "generate_migrated_code bytes={}",
        request.file_content.len()
    );
    respond("generate_migrated_code", compute_generated_code(request))
}

pub(in crate::tools::dispatch) fn get_verification_rules(
    service: &MigrationService,
    request: VerificationRulesRequest,
) -> CallToolResult {
    log::info!(
        "get_verification_rules bytes={}",
        request.migrated_file_content.len()
    );
    tool_success(
        "get_verification_rules",
        &compute_verification_rules(&service.ctx, request),
    )
}

pub(in crate::tools::dispatch) fn log_migration_summary(
    service: &MigrationService,
    request: LogMigrationSummaryRequest,
) -> CallToolResult {
    log::info!("log_migration_summary save={:?}", request.save_log);
    respond(
        "log_migration_summary",
        compute_log_summary(&service.ctx, request),
    )
}
