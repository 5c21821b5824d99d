use super::super::{CallToolResult, Content, ToolOutcome};
use modus_migrate_protocol::{serialize_json_pretty, ErrorCode, ErrorEnvelope};
use serde::Serialize;
use serde_json::Value;

fn render(value: &Value) -> String {
    serialize_json_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Error result: the envelope as pretty JSON text plus the same object as structured content.
pub(in crate::tools::dispatch) fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    let value = match serde_json::to_value(&error) {
        Ok(value) => value,
        Err(_) => Value::String(error.error.clone()),
    };
    let mut result = CallToolResult::error(vec![Content::text(render(&value))]);
    if value.is_object() {
        result.structured_content = Some(value);
    }
    result
}

pub(in crate::tools::dispatch) fn tool_success<T: Serialize>(
    tool: &str,
    payload: &T,
) -> CallToolResult {
    match serde_json::to_value(payload) {
        Ok(value) => {
            let mut result = CallToolResult::success(vec![Content::text(render(&value))]);
            result.structured_content = Some(value);
            result
        }
        Err(err) => {
            log::error!("{tool}: failed to serialize result: {err}");
            tool_error_envelope(
                ErrorEnvelope::new(
                    ErrorCode::Serialization,
                    format!("Failed to serialize {tool} result: {err}"),
                )
                .with_detail("tool", tool),
            )
        }
    }
}

pub(in crate::tools::dispatch) fn respond<T: Serialize>(
    tool: &str,
    outcome: ToolOutcome<T>,
) -> CallToolResult {
    match outcome {
        Ok(payload) => tool_success(tool, &payload),
        Err(error) => {
            log::warn!("{tool} failed [{}]: {}", error.code.as_str(), error.error);
            tool_error_envelope(error)
        }
    }
}
