use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ordered::{null_as_default, OrderedMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Extractor-specific fields (`required`, `attribute`, ...) passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRepr")]
pub struct EventSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventRepr {
    Name(String),
    Full {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<EventRepr> for EventSpec {
    fn from(repr: EventRepr) -> Self {
        match repr {
            EventRepr::Name(name) => Self {
                name,
                description: None,
            },
            EventRepr::Full { name, description } => Self { name, description },
        }
    }
}

/// A named slot; `"default"` is the unnamed slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlotRepr")]
pub struct SlotSpec {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotRepr {
    Name(String),
    Full {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
    },
}

impl From<SlotRepr> for SlotSpec {
    fn from(repr: SlotRepr) -> Self {
        match repr {
            SlotRepr::Name(name) | SlotRepr::Full { name } => Self { name },
        }
    }
}

impl SlotSpec {
    pub const DEFAULT_SLOT: &'static str = "default";

    pub fn is_default(&self) -> bool {
        self.name == Self::DEFAULT_SLOT
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storybook {
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prop_usage: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Extracted metadata for one component. Missing or `null` fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub props: Vec<PropSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<EventSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: Vec<SlotSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documentation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storybook: Option<Storybook>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComponentRecord {
    /// Prop lookup; with duplicate names the last declaration wins.
    pub fn prop(&self, name: &str) -> Option<&PropSpec> {
        self.props.iter().rev().find(|p| p.name == name)
    }

    /// Distinct non-empty prop names in declaration order.
    pub fn prop_names(&self) -> Vec<&str> {
        distinct(self.props.iter().map(|p| p.name.as_str()))
    }

    pub fn event_names(&self) -> Vec<&str> {
        distinct(self.events.iter().map(|e| e.name.as_str()))
    }

    pub fn examples(&self) -> &[String] {
        self.storybook
            .as_ref()
            .map(|s| s.examples.as_slice())
            .unwrap_or_default()
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for name in names {
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Tag key → record, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTable {
    records: OrderedMap<ComponentRecord>,
}

impl ComponentTable {
    pub fn get(&self, key: &str) -> Option<&ComponentRecord> {
        self.records.get(key)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &ComponentRecord)> {
        self.records.get_key_value(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentRecord)> {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.len() == 0
    }
}

impl FromIterator<(String, ComponentRecord)> for ComponentTable {
    fn from_iter<I: IntoIterator<Item = (String, ComponentRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
