//! HTTP client for duckduckgo.com
//!
//! Wraps a single `reqwest::Client` configured once at construction.
//! Every operation is a single attempt: no retries, no backoff. Retry
//! policy is the caller's responsibility.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::{Proxy, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{DdgImageError, Result};
use crate::parser::extract_vqd_token;
use crate::url::DEFAULT_BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root endpoint of the search provider. Overridable for tests
    /// against a mock server.
    pub base_url: String,
    /// Request timeout in seconds, applied to every request (default: 10)
    pub timeout_secs: u64,
    /// Proxy URL applied to all requests (e.g. "socks5://127.0.0.1:9050")
    pub proxy: Option<String>,
    /// Extra headers merged over the defaults
    pub headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            proxy: None,
            headers: HeaderMap::new(),
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static("https://duckduckgo.com/"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers
}

/// Low-level HTTP client shared by search, scrape, and download
///
/// Holds the connection pool; cloning the wrapper is not needed since
/// all operations borrow it. Safe for concurrent use.
pub struct DdgImageClient {
    client: reqwest::Client,
    base_url: String,
}

impl DdgImageClient {
    /// Creates a client with default configuration
    ///
    /// # Returns
    /// A new `DdgImageClient` instance
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// Custom headers override defaults with the same name; the proxy,
    /// when set, is applied to all requests.
    ///
    /// # Arguments
    /// * `config` - Custom client configuration
    ///
    /// # Returns
    /// A new `DdgImageClient` instance
    ///
    /// # Errors
    /// Returns error if the proxy URL is rejected or HTTP client
    /// initialization fails.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = default_headers();
        headers.extend(config.headers);

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .default_headers(headers);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url,
        })
    }

    /// Fetches the vqd session token for a keyword set
    ///
    /// Issues one form-encoded POST to the provider's root endpoint and
    /// scans the body for the token pattern. Single attempt.
    ///
    /// # Arguments
    /// * `keywords` - Search keywords the token will be used with
    ///
    /// # Returns
    /// The vqd token string
    ///
    /// # Errors
    /// - `Network` if the request fails or returns a non-success status
    /// - `TokenExtraction` if the body is unreadable or contains no token
    pub async fn fetch_token(&self, keywords: &str) -> Result<String> {
        debug!(keywords, "requesting vqd token");

        let response = self
            .client
            .post(format!("{}/", self.base_url.trim_end_matches('/')))
            .form(&[("q", keywords)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await.map_err(|e| {
            DdgImageError::TokenExtraction(format!("unreadable response body: {}", e))
        })?;

        extract_vqd_token(&body)
    }

    /// Fetches a URL and decodes the body as JSON
    ///
    /// # Arguments
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    /// The decoded JSON value
    ///
    /// # Errors
    /// - `Network` if the request fails or returns a non-success status
    /// - `Parsing` if the body is not valid JSON
    pub async fn get_json(&self, url: Url) -> Result<Value> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| DdgImageError::Parsing(format!("malformed JSON: {}", e)))
    }

    /// Fetches a URL and returns the body as text
    ///
    /// # Arguments
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    /// The response body
    ///
    /// # Errors
    /// Returns `Network` if the request fails or returns a non-success
    /// status.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Issues a GET and returns the raw response for streaming
    ///
    /// # Arguments
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    /// The raw response, body unconsumed
    ///
    /// # Errors
    /// Returns `Network` if the request fails or returns a non-success
    /// status.
    pub async fn get_response(&self, url: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(url).send().await?.error_for_status()?)
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a reference to the underlying reqwest client
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> DdgImageClient {
        DdgImageClient::with_config(ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.proxy.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_client_creation() {
        assert!(DdgImageClient::new().is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Custom", HeaderValue::from_static("yes"));
        let client = DdgImageClient::with_config(ClientConfig {
            timeout_secs: 30,
            headers,
            ..Default::default()
        });
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_token_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_string_contains("q=cats"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<script>nrj('/d.js?q=cats&vqd="4-567890"');</script>"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let token = client.fetch_token("cats").await.unwrap();
        assert_eq!(token, "4-567890");
    }

    #[tokio::test]
    async fn test_fetch_token_missing_pattern() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>no token</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.fetch_token("cats").await;
        assert!(matches!(result, Err(DdgImageError::TokenExtraction(_))));
    }

    #[tokio::test]
    async fn test_fetch_token_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.fetch_token("cats").await;
        assert!(matches!(result, Err(DdgImageError::Network(_))));
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = Url::parse(&format!("{}/data", server.uri())).unwrap();
        let result = client.get_json(url).await;
        assert!(matches!(result, Err(DdgImageError::Parsing(_))));
    }

    #[tokio::test]
    async fn test_get_json_valid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[]}"#))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = Url::parse(&format!("{}/data", server.uri())).unwrap();
        let value = client.get_json(url).await.unwrap();
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
