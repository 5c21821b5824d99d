use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::ordered::{null_as_default, OrderedMap};

/// One MUI component's Modus counterpart as recorded in the mapping document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuiComponentMapping {
    #[serde(default)]
    pub modus_component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuiMappingDocument {
    #[serde(default)]
    mapping: OrderedMap<MuiComponentMapping>,
    #[serde(default, deserialize_with = "null_as_default")]
    no_direct_mapping: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    migration_notes: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MuiLookup<'a> {
    Mapped(&'a MuiComponentMapping),
    NoDirectMapping,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuiListing {
    pub mapped_components: Vec<String>,
    pub no_mapping_components: Vec<String>,
    pub total_components: usize,
    pub mapping_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropTransform {
    pub modus_component: String,
    pub modus_props: Map<String, Value>,
    pub unmapped_props: Map<String, Value>,
    pub transformation_notes: Vec<String>,
}

enum PropRule {
    Rename(&'static str),
    Values(&'static [(&'static str, &'static str)]),
}

const SIZES_SM_LG: &[(&str, &str)] = &[("small", "sm"), ("medium", "md"), ("large", "lg")];

const BUTTON_RULES: &[(&str, PropRule)] = &[
    (
        "variant",
        PropRule::Values(&[
            ("contained", "filled"),
            ("outlined", "outlined"),
            ("text", "borderless"),
        ]),
    ),
    (
        "color",
        PropRule::Values(&[
            ("primary", "primary"),
            ("secondary", "secondary"),
            ("error", "danger"),
            ("warning", "warning"),
        ]),
    ),
    ("size", PropRule::Values(SIZES_SM_LG)),
    ("disabled", PropRule::Rename("disabled")),
    ("fullWidth", PropRule::Rename("full-width")),
];

const TEXT_FIELD_RULES: &[(&str, PropRule)] = &[
    ("error", PropRule::Rename("invalid")),
    ("disabled", PropRule::Rename("disabled")),
    ("required", PropRule::Rename("required")),
    ("placeholder", PropRule::Rename("placeholder")),
    ("value", PropRule::Rename("value")),
    ("defaultValue", PropRule::Rename("value")),
];

const CHECKBOX_RULES: &[(&str, PropRule)] = &[
    ("checked", PropRule::Rename("checked")),
    ("disabled", PropRule::Rename("disabled")),
    ("required", PropRule::Rename("required")),
    (
        "color",
        PropRule::Values(&[("primary", "primary"), ("secondary", "secondary")]),
    ),
    ("size", PropRule::Values(&[("small", "sm"), ("medium", "md")])),
];

fn prop_rules(component: &str) -> Option<&'static [(&'static str, PropRule)]> {
    match component {
        "Button" => Some(BUTTON_RULES),
        "TextField" => Some(TEXT_FIELD_RULES),
        "Checkbox" => Some(CHECKBOX_RULES),
        _ => None,
    }
}

impl MuiMappingDocument {
    pub fn lookup(&self, component: &str) -> MuiLookup<'_> {
        if let Some(mapping) = self.mapping.get(component) {
            MuiLookup::Mapped(mapping)
        } else if self.no_direct_mapping.iter().any(|c| c == component) {
            MuiLookup::NoDirectMapping
        } else {
            MuiLookup::Unknown
        }
    }

    /// Every MUI component the document knows about, mapped or not, sorted.
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .mapping
            .iter()
            .map(|(name, _)| name)
            .chain(self.no_direct_mapping.iter().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn migration_notes(&self) -> &Map<String, Value> {
        &self.migration_notes
    }

    /// Mapping details for one component, with the general migration notes attached.
    pub fn mapping_details(&self, component: &str) -> Value {
        let mut details = Map::new();
        details.insert("mui_component".into(), json!(component));
        match self.lookup(component) {
            MuiLookup::Mapped(mapping) => {
                if let Ok(Value::Object(fields)) = serde_json::to_value(mapping) {
                    details.extend(fields);
                }
            }
            MuiLookup::NoDirectMapping => {
                details.insert("modus_component".into(), Value::Null);
                details.insert("confidence".into(), json!("none"));
                details.insert(
                    "notes".into(),
                    json!("No direct Modus equivalent. See migration_notes for alternatives."),
                );
                details.insert("complexity".into(), json!("high"));
            }
            MuiLookup::Unknown => {
                details.insert(
                    "error".into(),
                    json!(format!("Unknown MUI component: {component}")),
                );
            }
        }
        details.insert(
            "migration_notes".into(),
            Value::Object(self.migration_notes.clone()),
        );
        Value::Object(details)
    }

    pub fn listing(&self) -> MuiListing {
        let mut mapped: Vec<String> = self
            .mapping
            .iter()
            .map(|(component, mapping)| {
                format!(
                    "{component} → {} ({} confidence)",
                    mapping.modus_component.as_deref().unwrap_or("N/A"),
                    mapping.confidence.as_deref().unwrap_or("unknown"),
                )
            })
            .collect();
        let mut no_mapping = self.no_direct_mapping.clone();
        mapped.sort();
        no_mapping.sort();

        let total = mapped.len() + no_mapping.len();
        let rate = if total == 0 {
            0.0
        } else {
            mapped.len() as f64 / total as f64 * 100.0
        };
        MuiListing {
            mapped_components: mapped,
            no_mapping_components: no_mapping,
            total_components: total,
            mapping_rate: format!("{rate:.1}%"),
        }
    }

    /// Apply the built-in prop rules. `None` when the component has no Modus counterpart.
    pub fn transform_props(
        &self,
        component: &str,
        props: &Map<String, Value>,
    ) -> Option<PropTransform> {
        let MuiLookup::Mapped(mapping) = self.lookup(component) else {
            return None;
        };
        let modus_component = mapping.modus_component.clone()?;

        let mut modus_props = Map::new();
        let mut unmapped_props = Map::new();
        let mut notes = Vec::new();

        match prop_rules(component) {
            Some(rules) => {
                for (prop, value) in props {
                    match rules
                        .iter()
                        .find(|(name, _)| *name == prop.as_str())
                        .map(|(_, rule)| rule)
                    {
                        None => {
                            unmapped_props.insert(prop.clone(), value.clone());
                        }
                        Some(PropRule::Rename(target)) => {
                            modus_props.insert((*target).to_string(), value.clone());
                        }
                        Some(PropRule::Values(values)) => {
                            let mapped = value
                                .as_str()
                                .and_then(|v| values.iter().find(|(from, _)| *from == v));
                            match mapped {
                                Some((_, to)) => {
                                    modus_props.insert(prop.clone(), json!(to));
                                }
                                None => {
                                    unmapped_props.insert(prop.clone(), value.clone());
                                    notes.push(format!(
                                        "No mapping for {prop}='{}'",
                                        display_value(value)
                                    ));
                                }
                            }
                        }
                    }
                }
            }
            None => {
                unmapped_props.extend(props.iter().map(|(k, v)| (k.clone(), v.clone())));
                if !props.is_empty() {
                    notes.push(format!(
                        "No prop rules for {component}; map its props to {modus_component} manually"
                    ));
                }
            }
        }

        if component == "Button" && props.contains_key("startIcon") {
            notes.push("startIcon requires nested modus-wc-icon element".to_string());
        }
        if component == "TextField" && props.contains_key("label") {
            notes.push("label requires separate modus-wc-input-label element".to_string());
        }

        Some(PropTransform {
            modus_component,
            modus_props,
            unmapped_props,
            transformation_notes: notes,
        })
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document() -> MuiMappingDocument {
        serde_json::from_value(json!({
            "mapping": {
                "TextField": {"modus_component": "modus-wc-text-input", "confidence": "high", "complexity": "medium"},
                "Button": {"modus_component": "modus-wc-button", "confidence": "high", "complexity": "low", "notes": "variants differ"},
                "Chip": {"modus_component": "modus-wc-chip", "confidence": "medium"}
            },
            "no_direct_mapping": ["Tooltip", "Backdrop"],
            "migration_notes": {"theming": "use Modus CSS variables"}
        }))
        .unwrap()
    }

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn lookup_distinguishes_three_cases() {
        let doc = document();
        assert!(matches!(doc.lookup("Button"), MuiLookup::Mapped(m) if m.modus_component.as_deref() == Some("modus-wc-button")));
        assert_eq!(doc.lookup("Tooltip"), MuiLookup::NoDirectMapping);
        assert_eq!(doc.lookup("Nope"), MuiLookup::Unknown);
    }

    #[test]
    fn component_names_cover_mapped_and_unmapped() {
        assert_eq!(
            document().component_names(),
            vec!["Backdrop", "Button", "Chip", "TextField", "Tooltip"]
        );
    }

    #[test]
    fn mapping_details_attach_notes() {
        let doc = document();
        assert_eq!(
            doc.mapping_details("Button"),
            json!({
                "mui_component": "Button",
                "modus_component": "modus-wc-button",
                "confidence": "high",
                "complexity": "low",
                "notes": "variants differ",
                "migration_notes": {"theming": "use Modus CSS variables"}
            })
        );
        assert_eq!(doc.mapping_details("Backdrop")["confidence"], json!("none"));
        assert_eq!(
            doc.mapping_details("Nope")["error"],
            json!("Unknown MUI component: Nope")
        );
    }

    #[test]
    fn listing_sorts_and_reports_rate() {
        let listing = document().listing();
        assert_eq!(
            listing.mapped_components,
            vec![
                "Button → modus-wc-button (high confidence)",
                "Chip → modus-wc-chip (medium confidence)",
                "TextField → modus-wc-text-input (high confidence)",
            ]
        );
        assert_eq!(listing.no_mapping_components, vec!["Backdrop", "Tooltip"]);
        assert_eq!(listing.total_components, 5);
        assert_eq!(listing.mapping_rate, "60.0%");
    }

    #[test]
    fn empty_document_rate_is_zero() {
        let listing = MuiMappingDocument::default().listing();
        assert_eq!(listing.total_components, 0);
        assert_eq!(listing.mapping_rate, "0.0%");
    }

    #[test]
    fn transforms_button_props() {
        let out = document()
            .transform_props(
                "Button",
                &props(json!({
                    "variant": "contained",
                    "color": "info",
                    "fullWidth": true,
                    "startIcon": "<AddIcon />",
                    "onClick": "handle"
                })),
            )
            .unwrap();
        assert_eq!(out.modus_component, "modus-wc-button");
        assert_eq!(
            Value::Object(out.modus_props),
            json!({"variant": "filled", "full-width": true})
        );
        assert_eq!(
            Value::Object(out.unmapped_props),
            json!({"color": "info", "startIcon": "<AddIcon />", "onClick": "handle"})
        );
        assert_eq!(
            out.transformation_notes,
            vec![
                "No mapping for color='info'",
                "startIcon requires nested modus-wc-icon element",
            ]
        );
    }

    #[test]
    fn transforms_text_field_props() {
        let out = document()
            .transform_props(
                "TextField",
                &props(json!({"error": true, "defaultValue": "x", "label": "Name"})),
            )
            .unwrap();
        assert_eq!(
            Value::Object(out.modus_props),
            json!({"invalid": true, "value": "x"})
        );
        assert_eq!(
            out.transformation_notes,
            vec!["label requires separate modus-wc-input-label element"]
        );
    }

    #[test]
    fn component_without_rules_keeps_props_unmapped() {
        let out = document()
            .transform_props("Chip", &props(json!({"label": "x"})))
            .unwrap();
        assert!(out.modus_props.is_empty());
        assert_eq!(Value::Object(out.unmapped_props), json!({"label": "x"}));
        assert_eq!(out.transformation_notes.len(), 1);
    }

    #[test]
    fn unmapped_components_cannot_transform() {
        let doc = document();
        assert!(doc.transform_props("Tooltip", &Map::new()).is_none());
        assert!(doc.transform_props("Nope", &Map::new()).is_none());
    }
}
