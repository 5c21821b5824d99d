use super::context::ToolContext;
use super::errors::{catalog_error, ToolOutcome};
use super::schemas::mui::{MuiComponentMappingRequest, TransformMuiPropsRequest};
use modus_migrate_catalog::{MuiListing, MuiLookup, MuiMappingDocument, PropTransform};
use modus_migrate_protocol::{ErrorCode, ErrorEnvelope, ToolNextAction};
use serde_json::{json, Value};
use std::sync::Arc;

fn load(ctx: &ToolContext) -> ToolOutcome<Arc<MuiMappingDocument>> {
    ctx.mui_mapping().map_err(|err| {
        log::error!("MUI mapping unavailable: {err}");
        catalog_error(&err)
    })
}

fn unknown_component(doc: &MuiMappingDocument, component: &str) -> ErrorEnvelope {
    ErrorEnvelope::new(
        ErrorCode::NotFound,
        format!("Unknown MUI component: {component}"),
    )
    .with_detail("mui_component", component)
    .with_detail("available_components", json!(doc.component_names()))
    .with_next_action(ToolNextAction {
        tool: "list_mui_components".to_string(),
        args: json!({}),
        reason: "See which MUI components have a Modus mapping.".to_string(),
    })
}

pub(crate) fn compute_mui_listing(ctx: &ToolContext) -> ToolOutcome<MuiListing> {
    Ok(load(ctx)?.listing())
}

pub(crate) fn compute_mui_mapping(
    ctx: &ToolContext,
    request: MuiComponentMappingRequest,
) -> ToolOutcome<Value> {
    let doc = load(ctx)?;
    let component = request.component_name.trim();
    if doc.lookup(component) == MuiLookup::Unknown {
        return Err(unknown_component(&doc, component));
    }
    Ok(doc.mapping_details(component))
}

pub(crate) fn compute_mui_transform(
    ctx: &ToolContext,
    request: TransformMuiPropsRequest,
) -> ToolOutcome<PropTransform> {
    let doc = load(ctx)?;
    let component = request.component_name.trim();
    match doc.lookup(component) {
        MuiLookup::Unknown => {
            Err(unknown_component(&doc, component).with_detail("original_props", request.props))
        }
        MuiLookup::NoDirectMapping | MuiLookup::Mapped(_) => doc
            .transform_props(component, &request.props)
            .ok_or_else(|| {
                ErrorEnvelope::new(
                    ErrorCode::NotFound,
                    format!("No Modus equivalent found for {component}"),
                )
                .with_detail("mui_component", component)
                .with_detail("original_props", request.props.clone())
                .with_tip("Use get_mui_component_mapping for migration alternatives.")
            }),
    }
}
