use serde::{Deserialize, Serialize};

/// A language configured for content variants.
///
/// Languages form a directed fallback graph through `fallback_iso_code`.
/// The graph may contain cycles; traversals must guard against them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO culture code, e.g. `en-US`
    pub iso_code: String,
    pub culture_name: Option<String>,
    pub is_default: bool,
    pub is_mandatory: bool,
    /// Language to fall back to when a value is missing in this one
    pub fallback_iso_code: Option<String>,
}

impl Language {
    pub fn new(iso_code: impl Into<String>) -> Self {
        Self {
            iso_code: iso_code.into(),
            culture_name: None,
            is_default: false,
            is_mandatory: false,
            fallback_iso_code: None,
        }
    }

    pub fn with_fallback(mut self, iso_code: impl Into<String>) -> Self {
        self.fallback_iso_code = Some(iso_code.into());
        self
    }

    pub fn with_culture_name(mut self, name: impl Into<String>) -> Self {
        self.culture_name = Some(name.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn as_mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    /// Whether this language is identified by `culture`.
    pub fn matches(&self, culture: &str) -> bool {
        cultures_match(&self.iso_code, culture)
    }
}

/// Culture-insensitive comparison of two culture codes.
pub fn cultures_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
