use serde::Serialize;

use crate::model::ComponentRecord;
use crate::naming::normalize_prop_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    /// Same name on both sides.
    Exact,
    /// Same name after kebab-case normalization (`fullWidth` ↔ `full-width`).
    Normalized,
    Unmapped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameSuggestion {
    pub source: String,
    pub target: Option<String>,
    #[serde(rename = "match")]
    pub match_kind: NameMatch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingCoverage {
    pub mapped_props: Vec<String>,
    pub unmapped_props: Vec<String>,
    pub mapped_events: Vec<String>,
    pub unmapped_events: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberMappingReport {
    pub props: Vec<NameSuggestion>,
    pub events: Vec<NameSuggestion>,
    pub coverage: MappingCoverage,
}

/// Suggest target attribute/event names for every source prop and event.
///
/// Suggestions are name-based only; a match says nothing about value compatibility.
pub fn suggest_name_mappings(
    source: &ComponentRecord,
    target: Option<&ComponentRecord>,
) -> MemberMappingReport {
    let target_props = target.map(|t| t.prop_names()).unwrap_or_default();
    let target_events = target.map(|t| t.event_names()).unwrap_or_default();

    let props: Vec<NameSuggestion> = source
        .prop_names()
        .into_iter()
        .map(|name| suggest(name, &target_props))
        .collect();
    let events: Vec<NameSuggestion> = source
        .event_names()
        .into_iter()
        .map(|name| suggest(name, &target_events))
        .collect();

    let (mapped_props, unmapped_props) = split_coverage(&props);
    let (mapped_events, unmapped_events) = split_coverage(&events);

    MemberMappingReport {
        props,
        events,
        coverage: MappingCoverage {
            mapped_props,
            unmapped_props,
            mapped_events,
            unmapped_events,
        },
    }
}

fn suggest(name: &str, candidates: &[&str]) -> NameSuggestion {
    if candidates.contains(&name) {
        return NameSuggestion {
            source: name.to_string(),
            target: Some(name.to_string()),
            match_kind: NameMatch::Exact,
        };
    }
    let wanted = normalize_prop_name(name);
    match candidates
        .iter()
        .find(|candidate| normalize_prop_name(candidate) == wanted)
    {
        Some(candidate) => NameSuggestion {
            source: name.to_string(),
            target: Some(candidate.to_string()),
            match_kind: NameMatch::Normalized,
        },
        None => NameSuggestion {
            source: name.to_string(),
            target: None,
            match_kind: NameMatch::Unmapped,
        },
    }
}

fn split_coverage(suggestions: &[NameSuggestion]) -> (Vec<String>, Vec<String>) {
    let mut mapped = Vec::new();
    let mut unmapped = Vec::new();
    for suggestion in suggestions {
        if suggestion.target.is_some() {
            mapped.push(suggestion.source.clone());
        } else {
            unmapped.push(suggestion.source.clone());
        }
    }
    (mapped, unmapped)
}
