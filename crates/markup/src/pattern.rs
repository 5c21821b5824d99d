use regex::{Captures, Regex};

use crate::error::{MarkupError, Result};

/// Compiled opening/closing patterns for one literal tag name.
///
/// The opening pattern requires the tag name to be followed by whitespace, `>` or `/`, so
/// `modus-button` never matches inside `<modus-button-group>`. The closing pattern is the exact
/// literal `</tag>`.
#[derive(Debug, Clone)]
pub struct TagPattern {
    tag: String,
    opening: Regex,
    closing: Regex,
}

impl TagPattern {
    pub fn new(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if !is_valid_tag_name(tag) {
            return Err(MarkupError::InvalidTag(tag.to_string()));
        }
        let escaped = regex::escape(tag);
        let opening = Regex::new(&format!(r"<{escaped}([\s>/])"))?;
        let closing = Regex::new(&format!(r"</{escaped}>"))?;
        Ok(Self {
            tag: tag.to_string(),
            opening,
            closing,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn count_opening(&self, text: &str) -> usize {
        self.opening.find_iter(text).count()
    }

    pub fn count_closing(&self, text: &str) -> usize {
        self.closing.find_iter(text).count()
    }

    /// Rename every opening tag, keeping the boundary character that followed the name.
    pub(crate) fn rename_opening(&self, text: &str, target: &str) -> String {
        self.opening
            .replace_all(text, |caps: &Captures| format!("<{target}{}", &caps[1]))
            .into_owned()
    }

    pub(crate) fn rename_closing(&self, text: &str, target: &str) -> String {
        self.closing
            .replace_all(text, |_: &Captures| format!("</{target}>"))
            .into_owned()
    }

    /// Insert `marker` directly in front of every opening tag, leaving the tag untouched.
    pub(crate) fn prefix_opening(&self, text: &str, marker: &str) -> String {
        let tag = &self.tag;
        self.opening
            .replace_all(text, |caps: &Captures| format!("{marker}<{tag}{}", &caps[1]))
            .into_owned()
    }
}

fn is_valid_tag_name(tag: &str) -> bool {
    !tag.is_empty()
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\''))
}
