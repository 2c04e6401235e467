//! Search filter applied to page contents.

use std::fmt;

/// Case-insensitive substring filter.
///
/// The empty query matches everything. Whitespace around the raw text is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    /// Build a query from user input.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// The query that matches everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The query text as entered (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this query filters nothing.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether `text` passes the filter.
    pub fn matches(&self, text: &str) -> bool {
        self.folded.is_empty() || text.to_lowercase().contains(&self.folded)
    }

    /// Whether any of `texts` passes the filter.
    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> bool {
        if self.folded.is_empty() {
            return true;
        }
        texts.into_iter().any(|text| self.matches(text))
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
