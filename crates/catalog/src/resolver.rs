use serde::Serialize;

use crate::error::{CatalogError, Result};
use crate::model::{ComponentRecord, ComponentTable};
use crate::naming::TagNaming;

/// Which fallback rule produced a match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionRule {
    PrefixNameSuffix,
    PrefixName,
    NameSuffix,
    Bare,
    CaseInsensitive,
    Substring,
}

#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub key: &'a str,
    pub record: &'a ComponentRecord,
    pub rule: ResolutionRule,
}

/// Resolve a user-supplied component name to a table entry.
///
/// Rules run in order and the first hit wins: exact `prefix+name+suffix`, `prefix+name`,
/// `name+suffix`, bare `name`; then the same four candidates case-insensitively; then the first
/// key (table order) whose lowercase form contains the lowercase name. Later rules are looser
/// and can produce false positives, so the order must not change.
///
/// `Ok(None)` means nothing matched. An empty name is rejected because the substring rule would
/// match every key.
pub fn resolve<'a>(
    raw_name: &str,
    table: &'a ComponentTable,
    naming: &TagNaming,
) -> Result<Option<Resolution<'a>>> {
    let raw = raw_name.trim();
    if raw.is_empty() {
        return Err(CatalogError::InvalidArgument(
            "component name must not be empty".to_string(),
        ));
    }

    let prefix = naming.prefix();
    let suffix = naming.suffix();
    let candidates = [
        (format!("{prefix}{raw}{suffix}"), ResolutionRule::PrefixNameSuffix),
        (format!("{prefix}{raw}"), ResolutionRule::PrefixName),
        (format!("{raw}{suffix}"), ResolutionRule::NameSuffix),
        (raw.to_string(), ResolutionRule::Bare),
    ];

    for (candidate, rule) in &candidates {
        if let Some((key, record)) = table.get_key_value(candidate) {
            log::debug!("resolved {raw:?} to {key:?} via {rule:?}");
            return Ok(Some(Resolution {
                key,
                record,
                rule: *rule,
            }));
        }
    }

    for (candidate, _) in &candidates {
        let wanted = candidate.to_lowercase();
        if let Some((key, record)) = table.iter().find(|(key, _)| key.to_lowercase() == wanted) {
            log::debug!("resolved {raw:?} to {key:?} case-insensitively");
            return Ok(Some(Resolution {
                key,
                record,
                rule: ResolutionRule::CaseInsensitive,
            }));
        }
    }

    let needle = raw.to_lowercase();
    if let Some((key, record)) = table
        .iter()
        .find(|(key, _)| key.to_lowercase().contains(&needle))
    {
        log::debug!("resolved {raw:?} to {key:?} by substring");
        return Ok(Some(Resolution {
            key,
            record,
            rule: ResolutionRule::Substring,
        }));
    }

    Ok(None)
}

/// Family keys stripped of prefix/suffix, sorted ascending and de-duplicated.
pub fn suggestions(table: &ComponentTable, naming: &TagNaming) -> Vec<String> {
    let mut names: Vec<String> = table
        .keys()
        .filter(|key| naming.is_family_key(key))
        .map(|key| naming.simple_name(key).to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}
