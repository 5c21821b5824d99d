use super::super::{
    compute_workflow_step, CallToolResult, MigrationService, RunMigrationWorkflowRequest,
};
use super::error::respond;

pub(in crate::tools::dispatch) fn run_migration_workflow(
    service: &MigrationService,
    request: RunMigrationWorkflowRequest,
) -> CallToolResult {
    let step = request
        .previous_state
        .as_ref()
        .and_then(|state| state.get("step"))
        .and_then(|step| step.as_str())
        .unwrap_or("start")
        .to_string();
    log::info!(
        "run_migration_workflow step={step} input={:?}",
        request.user_input
    );
    respond(
        "run_migration_workflow",
        compute_workflow_step(&service.ctx, request),
    )
}
