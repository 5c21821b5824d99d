/// How a table spells its keys: `<prefix><name><suffix>`, e.g. `modus-wc-` + `button` + `.tsx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNaming {
    prefix: String,
    suffix: String,
}

impl TagNaming {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether a key belongs to the listed family (starts with the prefix).
    pub fn is_family_key(&self, key: &str) -> bool {
        key.starts_with(&self.prefix)
    }

    /// Key with the suffix removed: the rendered tag for family keys.
    pub fn tag_of_key<'a>(&self, key: &'a str) -> &'a str {
        if self.suffix.is_empty() {
            return key;
        }
        key.strip_suffix(self.suffix.as_str()).unwrap_or(key)
    }

    /// Key with prefix and suffix removed.
    pub fn simple_name<'a>(&self, key: &'a str) -> &'a str {
        let tag = self.tag_of_key(key);
        tag.strip_prefix(self.prefix.as_str()).unwrap_or(tag)
    }

    pub fn tag_for(&self, simple_name: &str) -> String {
        format!("{}{simple_name}", self.prefix)
    }
}

/// `fullWidth` → `full-width`, `aria_label` → `aria-label`.
pub fn normalize_prop_name(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        if ch.is_uppercase() {
            out.push('-');
            out.extend(ch.to_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out.trim_start_matches('-').to_lowercase()
}
