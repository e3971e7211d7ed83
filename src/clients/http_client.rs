//! HTTP client for FreshBooks API communication.
//!
//! This module provides the [`HttpClient`] type, the `reqwest`-backed
//! [`Transport`] used by [`FreshBooksClient`](crate::FreshBooksClient).

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::{BaseUrl, FreshBooksConfig};

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the FreshBooks API.
///
/// The client handles:
/// - URL construction from the configured API host
/// - Default headers including `User-Agent` and the bearer token
/// - Connect and request timeouts from the configuration
/// - Retry logic for 429 and 500 responses, up to `max_tries` attempts
///
/// When retries are exhausted the last response is returned as-is so the
/// envelope parser can report the API's own error message.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use freshbooks_api::{ClientId, FreshBooksConfig};
/// use freshbooks_api::clients::HttpClient;
///
/// let config = FreshBooksConfig::builder()
///     .client_id(ClientId::new("my-client-id").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config).unwrap();
/// assert!(client.default_headers()["User-Agent"].contains("client_id my-client-id"));
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
    max_tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the SDK configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying `reqwest`
    /// client cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &FreshBooksConfig) -> Result<Self, TransportError> {
        let user_agent = config.user_agent().map_or_else(
            || {
                format!(
                    "FreshBooks rust sdk/{SDK_VERSION} client_id {}",
                    config.client_id()
                )
            },
            String::from,
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(token) = config.access_token() {
            default_headers.insert("Authorization".to_string(), token.bearer());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout().max(config.write_timeout()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url().clone(),
            default_headers,
            max_tries: config.max_tries(),
        })
    }

    /// Returns the API host requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns how many attempts are made for 429 and 500 responses.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.base_url.join(url)
        }
    }

    async fn send_once(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let status = res.status();
        let code = status.as_u16();
        let status_message = status.canonical_reason().unwrap_or_default().to_string();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            None
        } else {
            let value = serde_json::from_str(&body_text).map_err(|source| {
                TransportError::MalformedBody {
                    code,
                    status_message: status_message.clone(),
                    source,
                }
            })?;
            Some(value)
        };

        Ok(HttpResponse::new(code, status_message, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        // Retry-After is only honoured on 429; unrepresentable values fall back
        if response.code == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|retry_after| Duration::try_from_secs_f64(retry_after).ok())
            {
                return delay;
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}

impl Transport for HttpClient {
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(url);

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(
                method = %method,
                url = %url,
                attempt = tries,
                "Sending FreshBooks API request"
            );

            let response = self.send_once(method, &url, body).await?;

            let should_retry = response.code == 429 || response.code == 500;
            if !should_retry || tries >= self.max_tries {
                return Ok(response);
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::warn!(
                "FreshBooks API responded {} to {} {}, retrying in {:?} (attempt {} of {})",
                response.code,
                method,
                url,
                delay,
                tries,
                self.max_tries
            );
            tokio::time::sleep(delay).await;
        }
    }
}
