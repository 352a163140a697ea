//! # searxng-client
//!
//! Search provider adapter for SearXNG instances.
//!
//! This crate queries a SearXNG instance's JSON API, normalises the reply into
//! a canonical [`SearchResponse`], and renders that response as the
//! Google-style result markup the downstream result filter understands.
//!
//! ## Design
//!
//! - One blocking `GET {instance}/search` per call, no retries, no failover
//! - Every failure (HTTP status, upstream error, timeout, connection, bad
//!   payload) is folded into [`SearchResponse::error`]; searches never return
//!   `Err`
//! - Each upstream result entry is mapped independently with per-field
//!   defaults, so one malformed entry never drops the page
//! - All visible text in rendered markup is HTML-escaped exactly once
//!
//! ## Security
//!
//! - Search queries are logged only at trace level
//! - Upstream text is escaped before it reaches markup

pub mod client;
pub mod config;
pub mod error;
pub mod escape;
pub mod http;
pub mod normalize;
pub mod query;
pub mod render;
pub mod types;

pub use client::SearchClient;
pub use config::{ClientConfig, DEFAULT_INSTANCES};
pub use error::{ErrorKind, Result, SearchError};
pub use escape::escape_html;
pub use normalize::normalize;
pub use query::SearchQuery;
pub use render::{render, render_with, ImageItem, ImageLayout, ImagePage};
pub use types::{SearchResponse, SearchResult};

/// Run one search against the instance in `config`.
///
/// Builds a short-lived client that owns its connection and releases it
/// before returning. Long-running callers should keep a [`SearchClient`]
/// instead so the connection pool is reused.
///
/// Configuration errors are reported like any other failure, through the
/// returned response's error field.
///
/// # Examples
///
/// ```no_run
/// let config = searxng_client::ClientConfig::new("https://searx.example.com");
/// let query = searxng_client::SearchQuery::new("weather today").with_language("lang_en");
/// let response = searxng_client::search(&config, &query);
/// for result in response.results() {
///     println!("{}: {}", result.title, result.url);
/// }
/// ```
pub fn search(config: &ClientConfig, query: &SearchQuery) -> SearchResponse {
    match SearchClient::new(config.clone()) {
        Ok(client) => client.search(query),
        Err(e) => {
            tracing::debug!(error = %e, "SearXNG client construction failed");
            SearchResponse::with_error_message(&query.text, e.to_string())
        }
    }
}
