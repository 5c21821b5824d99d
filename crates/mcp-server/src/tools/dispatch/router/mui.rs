use super::super::{
    compute_mui_listing, compute_mui_mapping, compute_mui_transform, CallToolResult,
    ListMuiComponentsRequest, MigrationService, MuiComponentMappingRequest,
    TransformMuiPropsRequest,
};
use super::error::respond;

pub(in crate::tools::dispatch) fn list_mui_components(
    service: &MigrationService,
    _request: ListMuiComponentsRequest,
) -> CallToolResult {
    log::info!("list_mui_components");
    respond("list_mui_components", compute_mui_listing(&service.ctx))
}

pub(in crate::tools::dispatch) fn get_mui_component_mapping(
    service: &MigrationService,
    request: MuiComponentMappingRequest,
) -> CallToolResult {
    log::info!(
        "get_mui_component_mapping name={:?}",
        request.component_name
    );
    respond(
        "get_mui_component_mapping",
        compute_mui_mapping(&service.ctx, request),
    )
}

pub(in crate::tools::dispatch) fn transform_mui_props(
    service: &MigrationService,
    request: TransformMuiPropsRequest,
) -> CallToolResult {
    log::info!(
        "transform_mui_props name={:?} props={}",
        request.component_name,
        request.props.len()
    );
    respond(
        "transform_mui_props",
        compute_mui_transform(&service.ctx, request),
    )
}
