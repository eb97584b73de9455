//! Thin wrapper around a configured `reqwest::Client`.
//!
//! # Design
//! `HttpClient` owns one connection pool configured with a base URL, a
//! per-request timeout (10 s unless overridden), and default headers merged
//! over a fixed `Content-Type: application/json`. Every verb takes optional
//! [`RequestOptions`] that override the timeout or add headers for that one
//! call, and returns the decoded payload, not the response envelope. The
//! wrapper observes 404 and 500 responses in the log before the failure
//! propagates unchanged; it does no retries and no auth.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Configuration for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Extra default headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Per-call overrides layered on top of the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Replaces the client timeout for this call only.
    pub timeout: Option<Duration>,
    /// Extra headers for this call, on top of the client defaults.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn apply(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }
}

/// Async HTTP client bound to a base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let header_name: HeaderName = name
                .parse()
                .map_err(|e| ApiError::Config(format!("invalid header name {name}: {e}")))?;
            let header_value: HeaderValue = value
                .parse()
                .map_err(|e| ApiError::Config(format!("invalid value for header {name}: {e}")))?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> Result<T, ApiError> {
        let request = Self::prepare(self.client.get(self.url(path)), options);
        let body = self.execute(request).await?;
        Self::decode(&body)
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Self::prepare(self.client.post(self.url(path)).json(body), options);
        let response = self.execute(request).await?;
        Self::decode(&response)
    }

    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Self::prepare(self.client.put(self.url(path)).json(body), options);
        let response = self.execute(request).await?;
        Self::decode(&response)
    }

    pub async fn patch<B, T>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Self::prepare(self.client.patch(self.url(path)).json(body), options);
        let response = self.execute(request).await?;
        Self::decode(&response)
    }

    /// DELETE carries no response payload, so nothing is decoded.
    pub async fn delete(&self, path: &str, options: Option<&RequestOptions>) -> Result<(), ApiError> {
        let request = Self::prepare(self.client.delete(self.url(path)), options);
        self.execute(request).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn prepare(
        request: reqwest::RequestBuilder,
        options: Option<&RequestOptions>,
    ) -> reqwest::RequestBuilder {
        match options {
            Some(options) => options.apply(request),
            None => request,
        }
    }

    /// Run the request and return the raw body of a successful response.
    ///
    /// 404 and 500 responses get a diagnostic log line before the error
    /// propagates unchanged; other error statuses propagate silently.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::transport)?;

        if !status.is_success() {
            match status.as_u16() {
                404 => tracing::error!("resource not found"),
                500 => tracing::error!(status = 500, body = %body, "internal server error"),
                _ => {}
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().map(str::to_string),
                body,
            });
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_ten_second_timeout() {
        let config = HttpConfig::new("http://localhost:8081");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = HttpClient::new(HttpConfig::new("http://localhost:8081/")).unwrap();
        assert_eq!(client.url("/tasks"), "http://localhost:8081/tasks");
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = HttpClient::new(HttpConfig::new("http://localhost:8081/api/v1")).unwrap();
        assert_eq!(
            client.url("/tasks/abc?size=10"),
            "http://localhost:8081/api/v1/tasks/abc?size=10"
        );
    }

    #[test]
    fn extra_default_headers_are_accepted() {
        let config = HttpConfig::new("http://localhost:8081")
            .with_header("x-request-source", "tests")
            .with_timeout(Duration::from_secs(2));
        assert!(HttpClient::new(config).is_ok());
    }

    #[test]
    fn invalid_header_name_is_a_config_error() {
        let config = HttpConfig::new("http://localhost:8081").with_header("bad header", "v");
        let err = HttpClient::new(config).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn per_call_options_set_timeout_and_headers() {
        let client = HttpClient::new(HttpConfig::new("http://localhost:8081")).unwrap();
        let options = RequestOptions::new()
            .with_timeout(Duration::from_secs(2))
            .with_header("x-trace-id", "abc");

        let request = HttpClient::prepare(client.client.get(client.url("/tasks")), Some(&options))
            .build()
            .unwrap();
        assert_eq!(request.timeout(), Some(&Duration::from_secs(2)));
        assert_eq!(request.headers().get("x-trace-id").unwrap(), "abc");
    }

    #[test]
    fn absent_options_leave_the_request_untouched() {
        let client = HttpClient::new(HttpConfig::new("http://localhost:8081")).unwrap();
        let request = HttpClient::prepare(client.client.get(client.url("/tasks")), None)
            .build()
            .unwrap();
        assert!(request.timeout().is_none());
    }

    #[test]
    fn decode_failure_maps_to_decode_error() {
        let result: Result<Vec<i32>, ApiError> = HttpClient::decode("not json");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
