//! Blocking SearXNG client.
//!
//! A [`SearchClient`] issues exactly one `GET {instance}/search` per call and
//! always returns a [`SearchResponse`]; failures are reported through
//! [`SearchResponse::error`], never as `Err`.
//!
//! # Connection ownership
//!
//! The client either builds its own HTTP connection pool or borrows one the
//! caller already has. An owned pool is released exactly once, by
//! [`SearchClient::close`] or on drop, whichever comes first. A borrowed pool
//! is never released by the client.

use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::http;
use crate::normalize;
use crate::query::SearchQuery;
use crate::types::SearchResponse;

/// The HTTP connection pool behind a [`SearchClient`].
enum Connection<'c> {
    /// Built by the client; `None` once released.
    Owned(Option<reqwest::blocking::Client>),
    /// Supplied by the caller, who keeps responsibility for it.
    Borrowed(&'c reqwest::blocking::Client),
}

/// Client for a single SearXNG instance.
///
/// # Example
///
/// ```no_run
/// use searxng_client::{render, ClientConfig, SearchClient, SearchQuery};
///
/// # fn example() -> searxng_client::Result<()> {
/// let client = SearchClient::new(ClientConfig::new("https://searx.example.com"))?;
/// let response = client.search(&SearchQuery::new("rust programming"));
/// if let Some(error) = response.error() {
///     eprintln!("search failed: {error}");
/// }
/// let html = render(&response, "rust programming");
/// # let _ = html;
/// # Ok(())
/// # }
/// ```
pub struct SearchClient<'c> {
    base_url: String,
    engines: String,
    connection: Connection<'c>,
}

impl SearchClient<'static> {
    /// Create a client that owns its HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Ok(Self::from_parts(&config, Connection::Owned(Some(client))))
    }
}

impl<'c> SearchClient<'c> {
    /// Create a client on top of a caller-supplied HTTP client.
    ///
    /// The caller's client is used as-is (its timeout and headers apply) and
    /// is never closed by this client.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn with_http_client(
        config: ClientConfig,
        http_client: &'c reqwest::blocking::Client,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self::from_parts(&config, Connection::Borrowed(http_client)))
    }

    fn from_parts(config: &ClientConfig, connection: Connection<'c>) -> Self {
        Self {
            base_url: config.normalized_instance_url().to_owned(),
            engines: config.engines.clone(),
            connection,
        }
    }

    /// Instance base URL, without trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.base_url
    }

    /// Engines used when a query does not override them.
    pub fn engines(&self) -> &str {
        &self.engines
    }

    /// Whether this client owns (and will release) its connection pool.
    pub fn owns_connection(&self) -> bool {
        matches!(self.connection, Connection::Owned(_))
    }

    /// Whether an owned connection pool has already been released.
    pub fn is_closed(&self) -> bool {
        matches!(self.connection, Connection::Owned(None))
    }

    /// Run `query` against the instance.
    ///
    /// Blocks until the instance answers, the timeout elapses, or the
    /// connection fails. Never fails: errors are folded into the response.
    pub fn search(&self, query: &SearchQuery) -> SearchResponse {
        tracing::trace!(query = %query.text, page = query.page, "SearXNG search");

        let Some(client) = self.http_client() else {
            return SearchResponse::from_error(
                &query.text,
                &SearchError::Connection("client is closed".into()),
            );
        };

        let url = format!("{}/search", self.base_url);
        let params = query.to_params(&self.engines);

        let reply = client
            .get(&url)
            .query(&params)
            .send()
            .map_err(|e| http::classify_transport_error(&e))
            .and_then(|resp| {
                let status = resp.status().as_u16();
                resp.bytes()
                    .map(|body| (status, body))
                    .map_err(|e| http::classify_transport_error(&e))
            });

        match reply {
            Ok((status, body)) => {
                tracing::trace!(status, bytes = body.len(), "SearXNG response received");
                normalize::normalize(status, &body, &query.text)
            }
            Err(e) => {
                tracing::debug!(error = %e, "SearXNG request failed");
                SearchResponse::from_error(&query.text, &e)
            }
        }
    }

    /// Release the connection pool if this client owns it.
    ///
    /// Idempotent; a borrowed pool is left untouched.
    pub fn close(&mut self) {
        if let Connection::Owned(slot) = &mut self.connection {
            if slot.take().is_some() {
                tracing::debug!(instance = %self.base_url, "released owned HTTP client");
            }
        }
    }

    fn http_client(&self) -> Option<&reqwest::blocking::Client> {
        match &self.connection {
            Connection::Owned(client) => client.as_ref(),
            Connection::Borrowed(client) => Some(*client),
        }
    }
}

impl Drop for SearchClient<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for SearchClient<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .field("engines", &self.engines)
            .field("owns_connection", &self.owns_connection())
            .field("closed", &self.is_closed())
            .finish()
    }
}
