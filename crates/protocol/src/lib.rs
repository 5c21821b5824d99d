use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CAPABILITIES_SCHEMA_VERSION: u32 = 1;

/// Machine-readable error class carried by every error payload.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Backing JSON or markdown is missing or unparsable.
    DataLoad,
    /// A component name did not resolve; always paired with suggestions.
    NotFound,
    /// Workflow state lacks fields required by the requested transition.
    InvalidState,
    /// Caller passed malformed JSON where a structured report was expected.
    Serialization,
    InvalidArgument,
    WriteFailed,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DataLoad => "data_load",
            ErrorCode::NotFound => "not_found",
            ErrorCode::InvalidState => "invalid_state",
            ErrorCode::Serialization => "serialization",
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::WriteFailed => "write_failed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ToolNextAction {
    pub tool: String,
    pub args: Value,
    pub reason: String,
}

/// Structured error object returned by tools instead of protocol-level faults.
///
/// `details` is flattened into the top level so domain-specific fields
/// (`available_components`, `status`, `missing_fields`, ...) sit next to `error`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ErrorEnvelope {
    pub error: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<ToolNextAction>,
}

impl ErrorEnvelope {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            tip: None,
            details: Map::new(),
            next_actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        // Reserved keys stay owned by the envelope itself.
        if !matches!(key, "error" | "code" | "tip" | "next_actions") {
            self.details.insert(key.to_string(), value.into());
        }
        self
    }

    #[must_use]
    pub fn with_next_action(mut self, action: ToolNextAction) -> Self {
        self.next_actions.push(action);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CapabilitiesServer {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CapabilitiesPaths {
    pub install_root: String,
    pub data_dir: String,
    pub prompts_dir: String,
    pub output_dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct Capabilities {
    pub schema_version: u32,
    pub server: CapabilitiesServer,
    pub source_version: String,
    pub target_version: String,
    pub paths: CapabilitiesPaths,
    pub tools: Vec<String>,
    pub start_route: ToolNextAction,
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn envelope_flattens_details_next_to_error() {
        let envelope = ErrorEnvelope::new(ErrorCode::NotFound, "Component 'x' not found")
            .with_tip("Use list_components")
            .with_detail("available_components", json!(["alert", "button"]));

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "error": "Component 'x' not found",
                "code": "not_found",
                "tip": "Use list_components",
                "available_components": ["alert", "button"],
            })
        );
    }

    #[test]
    fn reserved_detail_keys_are_ignored() {
        let envelope = ErrorEnvelope::new(ErrorCode::DataLoad, "boom").with_detail("error", "other");
        assert_eq!(envelope.error, "boom");
        assert!(envelope.details.is_empty());
    }

    #[test]
    fn error_code_strings_match_serde_names() {
        for code in [
            ErrorCode::DataLoad,
            ErrorCode::NotFound,
            ErrorCode::InvalidState,
            ErrorCode::Serialization,
            ErrorCode::InvalidArgument,
            ErrorCode::WriteFailed,
        ] {
            let value = serde_json::to_value(code).unwrap();
            assert_eq!(value, Value::String(code.as_str().to_string()));
        }
    }
}
