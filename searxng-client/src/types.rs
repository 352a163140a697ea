//! Canonical result model shared by the normaliser and the renderer.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, SearchError};

/// Category assigned to results that do not name one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Category SearXNG uses for image results.
pub const IMAGE_CATEGORY: &str = "images";

/// A single hit returned by a SearXNG instance.
///
/// [`Default`] is the fallback table used when an upstream entry is missing
/// fields: empty text, zero score, `"general"` category, no image fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title.
    pub title: String,
    /// Destination link.
    pub url: String,
    /// Snippet text.
    pub content: String,
    /// Engine that produced the hit. May be empty.
    pub engine: String,
    /// Relevance weight, never negative.
    pub score: f64,
    /// SearXNG category, e.g. `general` or `images`.
    pub category: String,
    /// Full-size image URL (image results only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,
    /// Thumbnail URL as reported by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_source: Option<String>,
    /// Secondary thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            content: String::new(),
            engine: String::new(),
            score: 0.0,
            category: DEFAULT_CATEGORY.to_owned(),
            image_source: None,
            thumbnail_source: None,
            thumbnail: None,
        }
    }
}

impl SearchResult {
    /// Create a text result with the remaining fields defaulted.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if this hit should be laid out as an image.
    pub fn is_image(&self) -> bool {
        self.category == IMAGE_CATEGORY || self.image_source.is_some()
    }
}

/// The outcome of one query against a SearXNG instance.
///
/// Either a success carrying results and metadata, or an error state with an
/// error message and nothing else. Fields are read through accessors so the
/// two states cannot be mixed after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    results: Vec<SearchResult>,
    query: String,
    number_of_results: u64,
    suggestions: Vec<String>,
    corrections: Vec<String>,
    answers: Vec<String>,
    infoboxes: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
}

impl SearchResponse {
    /// Start a successful response for `query` with the given results.
    ///
    /// Metadata defaults to zero/empty and can be filled with the `with_*`
    /// methods.
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            results,
            query: query.into(),
            number_of_results: 0,
            suggestions: Vec::new(),
            corrections: Vec::new(),
            answers: Vec::new(),
            infoboxes: serde_json::Value::Array(Vec::new()),
            error: None,
            error_kind: None,
        }
    }

    /// Build an error-state response. Results and metadata are left empty.
    pub fn from_error(query: impl Into<String>, error: &SearchError) -> Self {
        let mut response = Self::new(query, Vec::new());
        response.error = Some(error.to_string());
        response.error_kind = error.kind();
        response
    }

    /// Build an error-state response from a bare message.
    pub fn with_error_message(query: impl Into<String>, message: impl Into<String>) -> Self {
        let mut response = Self::new(query, Vec::new());
        response.error = Some(message.into());
        response
    }

    /// Fold a normalisation outcome into a response.
    pub fn from_outcome(query: &str, outcome: Result<Self, SearchError>) -> Self {
        match outcome {
            Ok(response) => response,
            Err(e) => Self::from_error(query, &e),
        }
    }

    /// Set the upstream total-result estimate.
    pub fn with_number_of_results(mut self, total: u64) -> Self {
        self.number_of_results = total;
        self
    }

    /// Set alternative query suggestions.
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Set spelling corrections.
    pub fn with_corrections(mut self, corrections: Vec<String>) -> Self {
        self.corrections = corrections;
        self
    }

    /// Set direct-answer snippets.
    pub fn with_answers(mut self, answers: Vec<String>) -> Self {
        self.answers = answers;
        self
    }

    /// Attach infobox data exactly as upstream sent it.
    pub fn with_infoboxes(mut self, infoboxes: serde_json::Value) -> Self {
        self.infoboxes = infoboxes;
        self
    }

    /// Results in upstream order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// The query text this response answers.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Upstream's estimate of the total number of matches.
    ///
    /// Unrelated to [`result_count`](Self::result_count): the instance may
    /// report far more matches than it returned on this page.
    pub fn number_of_results(&self) -> u64 {
        self.number_of_results
    }

    /// Number of results on this page.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn corrections(&self) -> &[String] {
        &self.corrections
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn infoboxes(&self) -> &serde_json::Value {
        &self.infoboxes
    }

    /// The error message, if this response is in error state.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// The error classification, when the error came from a [`SearchError`].
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn has_error(&self) -> bool {
        self.error().is_some()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Returns `true` if any result should use the image layout.
    pub fn is_image_search(&self) -> bool {
        self.results.iter().any(SearchResult::is_image)
    }
}
