use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::pattern::TagPattern;

/// One source tag and its target equivalent, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMapping {
    pub source_tag: String,
    pub target_tag: Option<String>,
}

impl TagMapping {
    pub fn mapped(source_tag: impl Into<String>, target_tag: impl Into<String>) -> Self {
        Self {
            source_tag: source_tag.into(),
            target_tag: Some(target_tag.into()),
        }
    }

    pub fn unmapped(source_tag: impl Into<String>) -> Self {
        Self {
            source_tag: source_tag.into(),
            target_tag: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Replaced,
    Annotated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteChange {
    pub source_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_tag: Option<String>,
    pub kind: ChangeKind,
    /// Replaced: opening + closing substitutions. Annotated: markers inserted.
    pub count: usize,
}

impl fmt::Display for RewriteChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.target_tag.as_deref()) {
            (ChangeKind::Replaced, Some(target)) => write!(
                f,
                "Replaced '{}' with '{}' ({} substitutions)",
                self.source_tag, target, self.count
            ),
            _ => write!(
                f,
                "'{}' has no target equivalent, annotated ({} occurrences)",
                self.source_tag, self.count
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    pub output: String,
    pub changes: Vec<RewriteChange>,
}

impl RewriteOutcome {
    pub fn change_summaries(&self) -> Vec<String> {
        self.changes.iter().map(ToString::to_string).collect()
    }
}

/// Marker comment inserted in front of a tag that has no target equivalent.
pub fn unmapped_marker(source_tag: &str) -> String {
    format!("<!-- MIGRATION NOTE: '{source_tag}' has no target equivalent; migrate manually -->")
}

/// Apply `mappings` to `text` in the order given.
///
/// Each mapping sees the output of the previous one, so a target tag that is also a later
/// source tag gets rewritten twice. Callers fix the order upstream.
pub fn rewrite(text: &str, mappings: &[TagMapping]) -> Result<RewriteOutcome> {
    let mut output = text.to_string();
    let mut changes = Vec::new();

    for mapping in mappings {
        let pattern = TagPattern::new(&mapping.source_tag)?;
        let opening = pattern.count_opening(&output);

        match mapping.target_tag.as_deref().map(str::trim) {
            Some(target) if !target.is_empty() => {
                let closing = pattern.count_closing(&output);
                if opening + closing == 0 {
                    continue;
                }
                output = pattern.rename_opening(&output, target);
                output = pattern.rename_closing(&output, target);
                log::debug!(
                    "rewrote {} -> {target} ({} substitutions)",
                    pattern.tag(),
                    opening + closing
                );
                changes.push(RewriteChange {
                    source_tag: pattern.tag().to_string(),
                    target_tag: Some(target.to_string()),
                    kind: ChangeKind::Replaced,
                    count: opening + closing,
                });
            }
            _ => {
                if opening == 0 {
                    continue;
                }
                output = pattern.prefix_opening(&output, &unmapped_marker(pattern.tag()));
                changes.push(RewriteChange {
                    source_tag: pattern.tag().to_string(),
                    target_tag: None,
                    kind: ChangeKind::Annotated,
                    count: opening,
                });
            }
        }
    }

    Ok(RewriteOutcome { output, changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_mapping_list_is_identity() {
        for text in ["", "plain text", "<modus-button>X</modus-button>", "<<>>"] {
            let outcome = rewrite(text, &[]).unwrap();
            assert_eq!(outcome.output, text);
            assert!(outcome.changes.is_empty());
        }
    }

    #[test]
    fn renames_opening_and_closing_tags() {
        let outcome = rewrite(
            "<modus-button>X</modus-button>",
            &[TagMapping::mapped("modus-button", "modus-wc-button")],
        )
        .unwrap();
        assert_eq!(outcome.output, "<modus-wc-button>X</modus-wc-button>");
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].kind, ChangeKind::Replaced);
        assert_eq!(outcome.changes[0].count, 2);
        assert_eq!(
            outcome.change_summaries(),
            vec!["Replaced 'modus-button' with 'modus-wc-button' (2 substitutions)"]
        );
    }

    #[test]
    fn keeps_attributes_and_boundary_characters() {
        let outcome = rewrite(
            "<modus-button color=\"primary\"\n  size=\"large\">Go</modus-button><modus-button/>",
            &[TagMapping::mapped("modus-button", "modus-wc-button")],
        )
        .unwrap();
        assert_eq!(
            outcome.output,
            "<modus-wc-button color=\"primary\"\n  size=\"large\">Go</modus-wc-button><modus-wc-button/>"
        );
        assert_eq!(outcome.changes[0].count, 3);
    }

    #[test]
    fn unmapped_tags_get_a_marker_before_each_opening_tag() {
        let outcome = rewrite(
            "<modus-foo>Y</modus-foo>",
            &[TagMapping::unmapped("modus-foo")],
        )
        .unwrap();
        let marker = unmapped_marker("modus-foo");
        assert_eq!(outcome.output, format!("{marker}<modus-foo>Y</modus-foo>"));
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].kind, ChangeKind::Annotated);
        assert!(outcome.change_summaries()[0].contains("no target equivalent, annotated"));
    }

    #[test]
    fn blank_target_is_treated_as_unmapped() {
        let outcome = rewrite(
            "<modus-foo></modus-foo>",
            &[TagMapping {
                source_tag: "modus-foo".to_string(),
                target_tag: Some("  ".to_string()),
            }],
        )
        .unwrap();
        assert_eq!(outcome.changes[0].kind, ChangeKind::Annotated);
    }

    #[test]
    fn absent_tags_produce_no_change_entry() {
        let outcome = rewrite(
            "<div>nothing here</div>",
            &[
                TagMapping::mapped("modus-button", "modus-wc-button"),
                TagMapping::unmapped("modus-foo"),
            ],
        )
        .unwrap();
        assert_eq!(outcome.output, "<div>nothing here</div>");
        assert!(outcome.changes.is_empty());
    }

    // Opening tags are matched on a tag boundary: a source tag that prefixes another tag name
    // leaves the longer tag alone.
    #[test]
    fn prefix_tag_names_are_not_rewritten() {
        let outcome = rewrite(
            "<modus-button-group><modus-button>A</modus-button></modus-button-group>",
            &[TagMapping::mapped("modus-button", "modus-wc-button")],
        )
        .unwrap();
        assert_eq!(
            outcome.output,
            "<modus-button-group><modus-wc-button>A</modus-wc-button></modus-button-group>"
        );
        assert_eq!(outcome.changes[0].count, 2);
    }

    // Known limitation: mappings apply sequentially over the evolving text.
    #[test]
    fn mapping_order_matters_when_a_target_is_a_later_source() {
        let text = "<a-tag></a-tag>";
        let forward = rewrite(
            text,
            &[
                TagMapping::mapped("a-tag", "b-tag"),
                TagMapping::mapped("b-tag", "c-tag"),
            ],
        )
        .unwrap();
        assert_eq!(forward.output, "<c-tag></c-tag>");

        let reverse = rewrite(
            text,
            &[
                TagMapping::mapped("b-tag", "c-tag"),
                TagMapping::mapped("a-tag", "b-tag"),
            ],
        )
        .unwrap();
        assert_eq!(reverse.output, "<b-tag></b-tag>");
    }

    #[test]
    fn rewrite_is_deterministic() {
        let text = "<modus-alert></modus-alert><modus-foo/><modus-button>x</modus-button>";
        let mappings = vec![
            TagMapping::mapped("modus-alert", "modus-wc-alert"),
            TagMapping::unmapped("modus-foo"),
            TagMapping::mapped("modus-button", "modus-wc-button"),
        ];
        let first = rewrite(text, &mappings).unwrap();
        let second = rewrite(text, &mappings).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.changes.len(), 3);
    }

    #[test]
    fn invalid_source_tag_is_an_error() {
        let err = rewrite("<x>", &[TagMapping::unmapped("")]).unwrap_err();
        assert!(matches!(err, MarkupError::InvalidTag(_)));
    }

    #[test]
    fn target_with_dollar_sign_is_literal() {
        let outcome = rewrite("<a-tag>", &[TagMapping::mapped("a-tag", "b$1")]).unwrap();
        assert_eq!(outcome.output, "<b$1>");
    }
}
