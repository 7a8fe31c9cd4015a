//! Thin HTTP client wrapper.
//!
//! `HttpClient` issues GET and POST requests with a configurable user agent and
//! returns response bodies verbatim. Transport failures are reported through
//! `HttpError` rather than folded into the body.

use crate::config::Config;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a request that did not produce a response body.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl HttpError {
    /// Render as a `{"error": "<message>"}` JSON string.
    pub fn to_json_envelope(&self) -> String {
        serde_json::json!({ "error": self.to_string() }).to_string()
    }
}

/// HTTP client with a mutable user agent.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a client with an empty user agent and no request timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: String::new(),
        }
    }

    /// Create a client using the configured user agent and request timeout.
    pub fn from_config(config: &Config) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(HttpError::Client)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Set the `User-Agent` header for subsequent requests. An empty value
    /// sends no header.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// Get the configured user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Append `params` to `base` as a form-urlencoded query string.
    ///
    /// `base` is returned unchanged when there are no params.
    pub fn build_url<K, V>(base: &str, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if params.is_empty() {
            return base.to_string();
        }
        format!("{}?{}", base, encode_form(params))
    }

    /// HTTP GET on `url` with `params` appended as a query string.
    ///
    /// # Returns
    /// The raw response body, whatever the status code.
    pub async fn get<K, V>(&self, url: &str, params: &[(K, V)]) -> Result<String, HttpError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = Self::build_url(url, params);
        debug!("GET {}", url);

        let request = self.client.get(&url);
        self.execute(request, url).await
    }

    /// HTTP POST on `url` with `form` sent as a form-urlencoded body.
    ///
    /// # Returns
    /// The raw response body, whatever the status code.
    pub async fn post<K, V>(&self, url: &str, form: &[(K, V)]) -> Result<String, HttpError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        debug!("POST {} ({} fields)", url, form.len());

        let request = self
            .client
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(encode_form(form));

        self.execute(request, url.to_string()).await
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<String, HttpError> {
        // An empty user agent means the header is left out entirely
        let request = if self.user_agent.is_empty() {
            request
        } else {
            request.header(reqwest::header::USER_AGENT, self.user_agent.as_str())
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                warn!("Request to {} failed: {}", url, source);
                return Err(HttpError::Transport { url, source });
            }
        };

        debug!("{} responded with {}", url, response.status());

        response
            .text()
            .await
            .map_err(|source| HttpError::Body { url, source })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_form<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const NO_PARAMS: &[(&str, &str)] = &[];

    // ==================== build_url Tests ====================

    #[test]
    fn test_build_url_without_params() {
        assert_eq!(HttpClient::build_url("http://x", NO_PARAMS), "http://x");
    }

    #[test]
    fn test_build_url_with_params() {
        assert_eq!(
            HttpClient::build_url("http://x", &[("a", "1"), ("b", "2")]),
            "http://x?a=1&b=2"
        );
    }

    #[test]
    fn test_build_url_encodes_form_style() {
        assert_eq!(
            HttpClient::build_url("http://x/search", &[("q", "rust lang"), ("tag", "a&b=c")]),
            "http://x/search?q=rust+lang&tag=a%26b%3Dc"
        );
    }

    #[test]
    fn test_build_url_accepts_owned_strings() {
        let params = vec![("page".to_string(), 2.to_string())];
        assert_eq!(HttpClient::build_url("http://x", &params), "http://x?page=2");
    }

    // ==================== User Agent Tests ====================

    #[test]
    fn test_user_agent_default_empty() {
        assert_eq!(HttpClient::new().user_agent(), "");
    }

    #[test]
    fn test_set_user_agent() {
        let mut client = HttpClient::new();
        client.set_user_agent("Agent/1.0");
        assert_eq!(client.user_agent(), "Agent/1.0");
    }

    #[test]
    fn test_from_config_uses_user_agent() {
        let config = Config {
            user_agent: "Configured/2.0".to_string(),
            ..Config::default()
        };
        let client = HttpClient::from_config(&config).expect("Should build client");
        assert_eq!(client.user_agent(), "Configured/2.0");
    }

    // ==================== GET Tests ====================

    #[tokio::test]
    async fn test_get_returns_body_and_sends_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("page", "2"))
            .and(header("user-agent", "TestAgent/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("item list"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = HttpClient::new();
        client.set_user_agent("TestAgent/1.0");

        let body = client
            .get(&format!("{}/items", mock_server.uri()), &[("page", "2")])
            .await
            .expect("Should succeed");
        assert_eq!(body, "item list");
    }

    #[tokio::test]
    async fn test_get_passes_error_status_body_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&mock_server)
            .await;

        let body = HttpClient::new()
            .get(&format!("{}/missing", mock_server.uri()), NO_PARAMS)
            .await
            .expect("Status codes are not transport errors");
        assert_eq!(body, "not here");
    }

    // ==================== POST Tests ====================

    #[tokio::test]
    async fn test_post_sends_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(header("user-agent", "Poster/1.0"))
            .and(body_string("name=Ada+Lovelace&lang=en"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = HttpClient::new();
        client.set_user_agent("Poster/1.0");

        let body = client
            .post(
                &format!("{}/submit", mock_server.uri()),
                &[("name", "Ada Lovelace"), ("lang", "en")],
            )
            .await
            .expect("Should succeed");
        assert_eq!(body, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_post_empty_form() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ping"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&mock_server)
            .await;

        let body = HttpClient::new()
            .post(&format!("{}/ping", mock_server.uri()), NO_PARAMS)
            .await
            .expect("Should succeed");
        assert_eq!(body, "pong");
    }

    // ==================== Error Tests ====================

    #[tokio::test]
    async fn test_get_unreachable_host_is_transport_error() {
        // Port 1 on localhost is not expected to accept connections
        let result = HttpClient::new()
            .get("http://127.0.0.1:1/", NO_PARAMS)
            .await;

        let err = result.expect_err("Should fail");
        assert!(matches!(err, HttpError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_post_unreachable_host_json_envelope() {
        let err = HttpClient::new()
            .post("http://127.0.0.1:1/", &[("a", "1")])
            .await
            .expect_err("Should fail");

        let envelope: serde_json::Value =
            serde_json::from_str(&err.to_json_envelope()).expect("Should be valid JSON");
        let message = envelope["error"].as_str().expect("Should have error key");
        assert!(message.contains("127.0.0.1:1"));
    }
}
