use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ordered::{null_as_default, OrderedMap};

/// Mapping value meaning "no target equivalent".
pub const NOT_FOUND_SENTINEL: &str = "Not Found";

/// `None` for absent, blank or sentinel targets.
pub fn normalize_target(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty() && *t != NOT_FOUND_SENTINEL)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingEntry {
    pub source_tag: String,
    pub target_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl VerificationRule {
    /// Rules without a component apply everywhere.
    pub fn applies_to(&self, tag: &str) -> bool {
        match self.component.as_deref() {
            None => true,
            Some(component) => component == tag,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingValue {
    Tag(String),
    Detailed {
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        verified: Option<bool>,
        #[serde(default)]
        notes: Option<String>,
    },
    Missing(()),
}

#[derive(Deserialize, Default)]
struct MappingDocument {
    #[serde(rename = "Mapping_v1_v2", default)]
    mapping: OrderedMap<MappingValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    migration_plan: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    verification_rules: Vec<VerificationRule>,
}

/// Source tag → target tag, plus the plan and rules that ship alongside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    migration_plan: Vec<Value>,
    verification_rules: Vec<VerificationRule>,
}

impl MappingTable {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let doc: MappingDocument = serde_json::from_value(value)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        let doc: MappingDocument = serde_json::from_str(text)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: MappingDocument) -> Self {
        let entries = doc
            .mapping
            .into_entries()
            .into_iter()
            .map(|(source_tag, value)| {
                let (target, verified, notes) = match value {
                    MappingValue::Tag(target) => (Some(target), None, None),
                    MappingValue::Detailed {
                        target,
                        verified,
                        notes,
                    } => (target, verified, notes),
                    MappingValue::Missing(()) => (None, None, None),
                };
                MappingEntry {
                    target_tag: normalize_target(target.as_deref()).map(str::to_string),
                    source_tag,
                    verified,
                    notes,
                }
            })
            .collect();
        Self {
            entries,
            migration_plan: doc.migration_plan,
            verification_rules: doc.verification_rules,
        }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn entry(&self, source_tag: &str) -> Option<&MappingEntry> {
        self.entries.iter().find(|e| e.source_tag == source_tag)
    }

    pub fn target_for(&self, source_tag: &str) -> Option<&str> {
        self.entry(source_tag)
            .and_then(|e| e.target_tag.as_deref())
    }

    pub fn migration_plan(&self) -> &[Value] {
        &self.migration_plan
    }

    pub fn verification_rules(&self) -> &[VerificationRule] {
        &self.verification_rules
    }

    /// Rules for either side of a migration plus the global ones.
    pub fn rules_for(&self, source_tag: &str, target_tag: Option<&str>) -> Vec<&VerificationRule> {
        self.verification_rules
            .iter()
            .filter(|rule| {
                rule.applies_to(source_tag) || target_tag.is_some_and(|t| rule.applies_to(t))
            })
            .collect()
    }

    /// The `Mapping_v1_v2` object, with unmapped entries rendered as the sentinel.
    pub fn mapping_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|e| {
                let target = e.target_tag.as_deref().unwrap_or(NOT_FOUND_SENTINEL);
                (e.source_tag.clone(), Value::String(target.to_string()))
            })
            .collect();
        Value::Object(map)
    }
}
