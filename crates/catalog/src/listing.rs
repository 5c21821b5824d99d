use serde::Serialize;

use crate::model::{ComponentRecord, ComponentTable};
use crate::naming::TagNaming;

pub const MAX_CAPABILITIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub name: String,
    pub tag_name: String,
    pub version: String,
    pub description: String,
    pub capabilities: Vec<String>,
}

/// Summaries for every family key in `table`, sorted by name.
pub fn summarize_table(
    table: &ComponentTable,
    naming: &TagNaming,
    version: &str,
) -> Vec<ComponentSummary> {
    let mut components: Vec<ComponentSummary> = table
        .iter()
        .filter(|(key, _)| naming.is_family_key(key))
        .map(|(key, record)| {
            let name = naming.simple_name(key).to_string();
            ComponentSummary {
                tag_name: naming.tag_for(&name),
                name,
                version: version.to_string(),
                description: describe(record),
                capabilities: capabilities(record),
            }
        })
        .collect();
    components.sort_by(|a, b| a.name.cmp(&b.name));
    components
}

fn describe(record: &ComponentRecord) -> String {
    if !record.documentation.is_empty() {
        return record.documentation.clone();
    }
    record
        .props
        .iter()
        .filter_map(|p| p.description.as_deref())
        .find(|d| !d.is_empty())
        .map(|d| format!("A component that supports {d}"))
        .unwrap_or_default()
}

fn capabilities(record: &ComponentRecord) -> Vec<String> {
    let props = record
        .props
        .iter()
        .filter(|p| !p.name.is_empty())
        .map(|p| format!("Can be configured with '{}'", p.name));
    let events = record
        .events
        .iter()
        .filter(|e| !e.name.is_empty())
        .map(|e| format!("Emits '{}' event", e.name));
    let slots = record
        .slots
        .iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| {
            if s.is_default() {
                "Accepts content in default slot".to_string()
            } else {
                format!("Accepts content in '{}' slot", s.name)
            }
        });
    props.chain(events).chain(slots).take(MAX_CAPABILITIES).collect()
}
