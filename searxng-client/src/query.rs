//! Query intent and its mapping onto SearXNG's query parameters.

use serde::{Deserialize, Serialize};

/// Output format requested from the instance.
pub const OUTPUT_FORMAT: &str = "json";

/// Legacy locale prefix stripped from language codes (`lang_en` → `en`).
const LEGACY_LANG_PREFIX: &str = "lang_";

/// What the caller wants to search for.
///
/// Values are forwarded as given; the instance is authoritative on what is
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text.
    pub text: String,
    /// SearXNG category (`general`, `images`, `news`, ...).
    pub category: String,
    /// Language code, optionally with a legacy `lang_` prefix.
    pub language: String,
    /// 1-based page number.
    pub page: u32,
    /// Time window token (`day`, `week`, `month`, `year`), or empty.
    pub time_range: String,
    /// Safe search level: 0 off, 1 moderate, 2 strict.
    pub safe_search: u8,
    /// Comma-separated engine override. Empty uses the client default.
    pub engines: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: "general".to_owned(),
            language: String::new(),
            page: 1,
            time_range: String::new(),
            safe_search: 0,
            engines: String::new(),
        }
    }
}

impl SearchQuery {
    /// A general-category, first-page query for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = time_range.into();
        self
    }

    pub fn with_safe_search(mut self, level: u8) -> Self {
        self.safe_search = level;
        self
    }

    pub fn with_engines(mut self, engines: impl Into<String>) -> Self {
        self.engines = engines.into();
        self
    }

    /// Build the query parameters sent to `{instance}/search`.
    ///
    /// `q`, `format`, `categories`, `pageno` and `safesearch` are always
    /// present. `engines` falls back to `default_engines` and is omitted when
    /// both are empty. `language` has any `lang_` token removed and is
    /// omitted when nothing is left. `time_range` is omitted when empty.
    pub fn to_params(&self, default_engines: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.text.clone()),
            ("format", OUTPUT_FORMAT.to_owned()),
            ("categories", self.category.clone()),
            ("pageno", self.page.to_string()),
            ("safesearch", self.safe_search.to_string()),
        ];

        let engines = if self.engines.is_empty() {
            default_engines
        } else {
            &self.engines
        };
        if !engines.is_empty() {
            params.push(("engines", engines.to_owned()));
        }

        let language = strip_legacy_lang_prefix(&self.language);
        if !language.is_empty() {
            params.push(("language", language));
        }

        if !self.time_range.is_empty() {
            params.push(("time_range", self.time_range.clone()));
        }

        params
    }
}

/// Remove every legacy `lang_` token from a language code.
fn strip_legacy_lang_prefix(language: &str) -> String {
    language.replace(LEGACY_LANG_PREFIX, "")
}
