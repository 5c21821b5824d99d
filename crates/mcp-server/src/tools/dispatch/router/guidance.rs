use super::super::{compute_guidance, CallToolResult, GuidanceRequest, MigrationService};
use super::error::respond;

pub(in crate::tools::dispatch) fn get_guidance(
    service: &MigrationService,
    request: GuidanceRequest,
) -> CallToolResult {
    log::info!(
        "get_guidance step={:?} family={:?}",
        request.step,
        request.family
    );
    respond("get_guidance", compute_guidance(&service.ctx, request))
}
