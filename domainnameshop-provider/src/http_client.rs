//! HTTP transport
//!
//! The provider talks to the API through the [`Transport`] trait: one
//! authenticated request in, status and body out. [`HttpTransport`] is the
//! default implementation on top of `reqwest`; tests substitute an
//! in-memory fake.
//!
//! # Design principles
//! - **No classification here** - a status >= 400 is returned as-is and
//!   mapped to a [`ProviderError`] by the provider, which knows the context
//! - **No retries** - every failure reaches the caller immediately
//! - **Bodies are logged truncated** - record data can be large and sensitive

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::types::Credentials;
use crate::utils::log_sanitizer::{mask_secret, truncate_for_log};

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body (may be empty).
    pub body: String,
    /// `Retry-After` header in seconds, if present.
    pub retry_after: Option<u64>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    /// `true` for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes authenticated API requests.
///
/// `path` is relative to the API base (e.g. `/domains/42/dns`) and already
/// carries any query string. Only network-level failures are errors; HTTP
/// error statuses come back as an [`ApiResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, method: Method, path: &str, body: Option<String>)
    -> Result<ApiResponse>;
}

/// Default [`Transport`]: `reqwest` with HTTP Basic auth.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    credentials: Credentials,
    provider_name: &'static str,
}

impl HttpTransport {
    /// Build a transport with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NetworkError`] if the HTTP client cannot be
    /// built (e.g. the TLS backend fails to initialize).
    pub fn new(
        provider_name: &'static str,
        base_url: impl Into<String>,
        credentials: Credentials,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = create_http_client(connect_timeout, request_timeout).map_err(|e| {
            ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            }
        })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            provider_name,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_token", &mask_secret(&self.credentials.api_token))
            .field("api_secret", &"****")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .basic_auth(&self.credentials.api_token, Some(&self.credentials.api_secret))
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            log::debug!(
                "[{}] Request Body: {}",
                self.provider_name,
                truncate_for_log(&body)
            );
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        HttpUtils::execute_request(request, self.provider_name, method.as_str(), path).await
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request and reads the whole response.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, auth, headers, body)
    /// * `provider_name` - provider name (for logging and errors)
    /// * `method_name` - HTTP method (for logging)
    /// * `path` - request path (for logging)
    ///
    /// # Returns
    /// * `Ok(ApiResponse)` - any status, including >= 400
    /// * `Err(ProviderError::Timeout)` - the connect or request timeout elapsed
    /// * `Err(ProviderError::NetworkError)` - any other transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        path: &str,
    ) -> Result<ApiResponse> {
        log::debug!("[{provider_name}] {method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&body)
        );

        Ok(ApiResponse {
            status,
            body,
            retry_after,
        })
    }

    /// Parse a JSON response body.
    ///
    /// # Errors
    /// * `ProviderError::ParseError` - the body is not valid JSON for `T`
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
