//! Domain failures rendered as [`ErrorEnvelope`]s.
//!
//! Tool bodies return `ToolOutcome<T>`; the router turns the error side into an
//! `is_error` tool result instead of a protocol fault.

use modus_migrate_catalog::CatalogError;
use modus_migrate_protocol::{ErrorCode, ErrorEnvelope, ToolNextAction};
use serde::Serialize;
use serde_json::{json, Value};

pub(crate) type ToolOutcome<T> = Result<T, ErrorEnvelope>;

pub(crate) fn catalog_error(err: &CatalogError) -> ErrorEnvelope {
    match err {
        CatalogError::DataLoad { path, .. } | CatalogError::Parse { path, .. } => {
            ErrorEnvelope::new(
                ErrorCode::DataLoad,
                format!("Error loading component data: {err}"),
            )
            .with_detail("path", path.display().to_string())
        }
        CatalogError::InvalidArgument(message) => invalid_argument(message.clone()),
        CatalogError::Markup(_) => ErrorEnvelope::new(ErrorCode::InvalidArgument, err.to_string()),
        CatalogError::Write { path, .. } => {
            ErrorEnvelope::new(ErrorCode::WriteFailed, err.to_string())
                .with_detail("path", path.display().to_string())
        }
    }
}

pub(crate) fn invalid_argument(message: impl Into<String>) -> ErrorEnvelope {
    ErrorEnvelope::new(ErrorCode::InvalidArgument, message)
}

pub(crate) fn unknown_version(version: &str, known: &[&str]) -> ErrorEnvelope {
    invalid_argument(format!("Unknown component version '{version}'"))
        .with_detail("known_versions", json!(known))
        .with_tip(format!("Use one of: {}", known.join(", ")))
}

/// Unresolved component name, always paired with the names that do exist.
pub(crate) fn component_not_found(
    name: &str,
    table_file: &str,
    version: &str,
    available: Vec<String>,
) -> ErrorEnvelope {
    ErrorEnvelope::new(
        ErrorCode::NotFound,
        format!("Component '{name}' not found in {table_file}"),
    )
    .with_detail("available_components", json!(available))
    .with_tip(format!(
        "Use list_components(version='{version}') to see all available components with descriptions"
    ))
    .with_next_action(ToolNextAction {
        tool: "list_components".to_string(),
        args: json!({ "version": version }),
        reason: "Browse the component names this version knows about.".to_string(),
    })
}

/// Previous workflow state lacks fields the requested transition reads.
pub(crate) fn invalid_state(
    message: impl Into<String>,
    missing: &[&str],
    received: &Value,
) -> ErrorEnvelope {
    ErrorEnvelope::new(ErrorCode::InvalidState, message)
        .with_detail("missing_fields", json!(missing))
        .with_detail("previous_state_received", received.clone())
}

pub(crate) fn serialization(what: &str, err: &serde_json::Error) -> ErrorEnvelope {
    ErrorEnvelope::new(ErrorCode::Serialization, format!("Invalid {what}: {err}"))
        .with_detail("parse_error", err.to_string())
}

/// Serialize a typed payload for embedding into a larger JSON document.
pub(crate) fn to_payload<T: Serialize>(value: &T) -> ToolOutcome<Value> {
    serde_json::to_value(value).map_err(|err| serialization("payload", &err))
}

/// Accept a caller report either as a JSON object or as a JSON-encoded string.
pub(crate) fn report_value(raw: &Value) -> Result<Value, serde_json::Error> {
    match raw {
        Value::String(text) => serde_json::from_str(text),
        other => Ok(other.clone()),
    }
}
