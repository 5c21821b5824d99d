use regex::Regex;

use crate::error::Result;
use crate::pattern::TagPattern;

/// Count opening occurrences of `tag` in `text` (self-closing tags included).
pub fn count_opening_tags(text: &str, tag: &str) -> Result<usize> {
    Ok(TagPattern::new(tag)?.count_opening(text))
}

/// Extract every `<prefix…` opening-tag name in occurrence order (duplicates kept).
///
/// Closing tags are skipped because they start with `</`.
pub fn extract_prefixed_tags(text: &str, prefix: &str) -> Result<Vec<String>> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Ok(Vec::new());
    }
    let token = Regex::new(&format!(
        r"<({}[A-Za-z0-9_-]+)",
        regex::escape(prefix)
    ))?;
    Ok(token
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tags_in_occurrence_order() {
        let text = r#"<modus-wc-card><modus-wc-button>Go</modus-wc-button><modus-wc-icon/></modus-wc-card>
<modus-wc-button color="primary">Again</modus-wc-button>"#;
        let tags = extract_prefixed_tags(text, "modus-wc-").unwrap();
        assert_eq!(
            tags,
            vec![
                "modus-wc-card",
                "modus-wc-button",
                "modus-wc-icon",
                "modus-wc-button",
            ]
        );
    }

    #[test]
    fn bare_prefix_is_not_a_tag() {
        assert!(extract_prefixed_tags("<modus-wc->", "modus-wc-")
            .unwrap()
            .is_empty());
        assert!(extract_prefixed_tags("<modus-wc-x>", "").unwrap().is_empty());
    }

    #[test]
    fn counts_only_boundary_matches() {
        let text = "<modus-button><modus-button-group></modus-button-group></modus-button>";
        assert_eq!(count_opening_tags(text, "modus-button").unwrap(), 1);
        assert_eq!(count_opening_tags(text, "modus-button-group").unwrap(), 1);
    }
}
