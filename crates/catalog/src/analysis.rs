use modus_migrate_markup::{count_opening_tags, TagMapping};
use serde::{Deserialize, Serialize};

use crate::mapping::{normalize_target, MappingTable, NOT_FOUND_SENTINEL};
use crate::model::ComponentTable;
use crate::naming::TagNaming;

pub const ANALYSIS_COMPLETE: &str = "Analysis Complete";
pub const ANALYSIS_FAILED: &str = "Analysis Failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedComponent {
    pub name: String,
    pub count: usize,
    #[serde(alias = "v2_equivalent")]
    pub target_equivalent: String,
}

/// Per-tag usage of source components in a piece of markup.
///
/// Round-trips through callers: `identified_components` and `status` are required when a
/// report comes back in, everything else defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub lines_of_code: usize,
    #[serde(alias = "identified_v1_components")]
    pub identified_components: Vec<IdentifiedComponent>,
    #[serde(default)]
    pub migration_suggestions: Vec<String>,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Report for markup that could not be analyzed at all.
    pub fn failed(text: &str, error: impl Into<String>) -> Self {
        Self {
            lines_of_code: text.lines().count(),
            identified_components: Vec::new(),
            migration_suggestions: Vec::new(),
            status: ANALYSIS_FAILED.to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ANALYSIS_COMPLETE
    }

    /// Rewrite instructions in report order.
    pub fn tag_mappings(&self) -> Vec<TagMapping> {
        self.identified_components
            .iter()
            .map(|c| TagMapping {
                source_tag: c.name.clone(),
                target_tag: normalize_target(Some(&c.target_equivalent)).map(str::to_string),
            })
            .collect()
    }
}

/// Count every source-family tag in `text` and attach its target equivalent.
///
/// Tags are matched boundary-aware, so `<modus-button-group>` is not counted as a
/// `modus-button`. Suggestions are only produced for tags that occur.
pub fn analyze_markup(
    text: &str,
    source: &ComponentTable,
    naming: &TagNaming,
    mapping: &MappingTable,
) -> AnalysisReport {
    let mut report = AnalysisReport {
        lines_of_code: text.lines().count(),
        identified_components: Vec::new(),
        migration_suggestions: Vec::new(),
        status: ANALYSIS_COMPLETE.to_string(),
        error: None,
    };

    for key in source.keys().filter(|key| naming.is_family_key(key)) {
        let tag = naming.tag_of_key(key);
        if report.identified_components.iter().any(|c| c.name == tag) {
            continue;
        }
        let count = match count_opening_tags(text, tag) {
            Ok(count) => count,
            Err(err) => {
                log::warn!("skipping component key {key:?}: {err}");
                continue;
            }
        };
        if count == 0 {
            continue;
        }

        let target = mapping.target_for(tag);
        report.migration_suggestions.push(match target {
            Some(target) => {
                format!("Consider migrating '{tag}' (found {count} times) to '{target}'.")
            }
            None => format!(
                "'{tag}' (found {count} times) has no direct target mapping; migrate it manually."
            ),
        });
        report.identified_components.push(IdentifiedComponent {
            name: tag.to_string(),
            count,
            target_equivalent: target.unwrap_or(NOT_FOUND_SENTINEL).to_string(),
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn source() -> ComponentTable {
        ["modus-button.js", "modus-button-group.js", "modus-card.js", "modus-alert.js", "util.js"]
            .into_iter()
            .map(|k| (k.to_string(), ComponentRecord::default()))
            .collect()
    }

    fn mapping() -> MappingTable {
        MappingTable::from_value(json!({
            "Mapping_v1_v2": {
                "modus-button": "modus-wc-button",
                "modus-button-group": "modus-wc-button-group",
                "modus-card": "Not Found"
            }
        }))
        .unwrap()
    }

    #[test]
    fn counts_tags_and_attaches_targets() {
        let text = "<modus-button-group>\n  <modus-button>A</modus-button>\n  <modus-button size=\"s\">B</modus-button>\n</modus-button-group>\n<modus-card/>";
        let report = analyze_markup(text, &source(), &TagNaming::new("modus-", ".js"), &mapping());

        assert!(report.is_complete());
        assert_eq!(report.lines_of_code, 5);
        assert_eq!(
            report.identified_components,
            vec![
                IdentifiedComponent {
                    name: "modus-button".into(),
                    count: 2,
                    target_equivalent: "modus-wc-button".into(),
                },
                IdentifiedComponent {
                    name: "modus-button-group".into(),
                    count: 1,
                    target_equivalent: "modus-wc-button-group".into(),
                },
                IdentifiedComponent {
                    name: "modus-card".into(),
                    count: 1,
                    target_equivalent: "Not Found".into(),
                },
            ]
        );
        assert_eq!(report.migration_suggestions.len(), 3);
        assert_eq!(
            report.migration_suggestions[0],
            "Consider migrating 'modus-button' (found 2 times) to 'modus-wc-button'."
        );
    }

    #[test]
    fn markup_without_source_tags_is_complete_and_empty() {
        let report = analyze_markup("<div></div>", &source(), &TagNaming::new("modus-", ".js"), &mapping());
        assert!(report.is_complete());
        assert!(report.identified_components.is_empty());
        assert!(report.migration_suggestions.is_empty());
    }

    #[test]
    fn irregular_key_is_skipped_without_failing_the_report() {
        let source: ComponentTable = ["modus-button.js", "modus-odd key.js"]
            .into_iter()
            .map(|k| (k.to_string(), ComponentRecord::default()))
            .collect();
        let report = analyze_markup(
            "<modus-button>x</modus-button>",
            &source,
            &TagNaming::new("modus-", ".js"),
            &mapping(),
        );

        assert!(report.is_complete());
        assert_eq!(report.error, None);
        assert_eq!(
            report.identified_components,
            vec![IdentifiedComponent {
                name: "modus-button".into(),
                count: 1,
                target_equivalent: "modus-wc-button".into(),
            }]
        );
    }

    #[test]
    fn tag_mappings_follow_report() {
        let text = "<modus-card></modus-card><modus-button></modus-button>";
        let report = analyze_markup(text, &source(), &TagNaming::new("modus-", ".js"), &mapping());
        assert_eq!(
            report.tag_mappings(),
            vec![
                TagMapping::mapped("modus-button", "modus-wc-button"),
                TagMapping::unmapped("modus-card"),
            ]
        );
    }

    #[test]
    fn accepts_legacy_field_names() {
        let report: AnalysisReport = serde_json::from_value(json!({
            "identified_v1_components": [
                {"name": "modus-button", "count": 1, "v2_equivalent": "modus-wc-button"}
            ],
            "status": "Analysis Complete"
        }))
        .unwrap();
        assert_eq!(report.identified_components[0].target_equivalent, "modus-wc-button");
        assert_eq!(report.lines_of_code, 0);
    }

    #[test]
    fn report_without_status_is_rejected() {
        let parsed = serde_json::from_value::<AnalysisReport>(json!({"identified_components": []}));
        assert!(parsed.is_err());
    }

    #[test]
    fn failed_report_counts_lines() {
        let report = AnalysisReport::failed("a\nb", "no data");
        assert_eq!(report.status, ANALYSIS_FAILED);
        assert_eq!(report.lines_of_code, 2);
        assert!(!report.is_complete());
    }
}
