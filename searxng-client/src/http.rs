//! Blocking HTTP client construction and transport error classification.
//!
//! Provides a [`reqwest::blocking::Client`] with browser-like headers so
//! public instances do not reject requests as automated traffic.

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::SearchError;

/// Realistic browser User-Agent strings, one picked per built client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0",
];

/// Build a blocking client configured for SearXNG JSON requests.
///
/// Every request carries `Accept: application/json` and the configured
/// User-Agent, or a browser one from the rotation list. Redirects are followed
/// up to 10 hops and the whole exchange is bounded by `timeout_seconds`.
///
/// Fails with [`SearchError::Config`] if the TLS backend cannot be set up.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::blocking::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| random_user_agent().to_owned());

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// One entry of the User-Agent rotation list, chosen uniformly.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())]
}

/// Classify a transport failure into the search error taxonomy.
///
/// Used for both sending the request and reading the body. A reply cut off
/// mid-body is a connection failure; unparseable payloads are classified
/// later, by the normaliser.
pub fn classify_transport_error(err: &reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_picks_browser_agents() {
        for _ in 0..20 {
            let ua = random_user_agent();
            assert!(USER_AGENTS.contains(&ua));
            assert!(ua.starts_with("Mozilla/5.0"));
        }
    }

    #[test]
    fn default_and_custom_agent_clients_build() {
        assert!(build_client(&ClientConfig::default()).is_ok());
        let custom = ClientConfig::default().with_user_agent("searxng-bridge/0.1");
        assert!(build_client(&custom).is_ok());
    }

    #[test]
    fn connection_refused_is_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let client = build_client(&ClientConfig::default().with_timeout_secs(2))
            .expect("client builds");
        let err = client
            .get(format!("http://{addr}/search"))
            .send()
            .expect_err("nothing listens on a released port");
        let classified = classify_transport_error(&err);
        assert!(
            matches!(classified, SearchError::Connection(_) | SearchError::Timeout),
            "unexpected classification: {classified:?}"
        );
    }
}
