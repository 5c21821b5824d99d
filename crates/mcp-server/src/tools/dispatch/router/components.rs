use super::super::{
    compute_component_migration_data, compute_get_component, compute_list_components,
    CallToolResult, ComponentMigrationDataRequest, GetComponentRequest, ListComponentsRequest,
    MigrationService,
};
use super::error::respond;

pub(in crate::tools::dispatch) fn list_components(
    service: &MigrationService,
    request: ListComponentsRequest,
) -> CallToolResult {
    log::info!("list_components version={:?}", request.version);
    respond(
        "list_components",
        compute_list_components(&service.ctx, request),
    )
}

pub(in crate::tools::dispatch) fn get_component(
    service: &MigrationService,
    request: GetComponentRequest,
) -> CallToolResult {
    log::info!(
        "get_component name={:?} version={:?}",
        request.component_name,
        request.version
    );
    respond("get_component", compute_get_component(&service.ctx, request))
}

pub(in crate::tools::dispatch) fn get_component_migration_data(
    service: &MigrationService,
    request: ComponentMigrationDataRequest,
) -> CallToolResult {
    log::info!(
        "get_component_migration_data name={:?}",
        request.component_name
    );
    respond(
        "get_component_migration_data",
        compute_component_migration_data(&service.ctx, request),
    )
}
