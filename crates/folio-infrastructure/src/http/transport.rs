//! Time-bounded HTTP transport.
//!
//! Every exchange (send plus body read) runs under a single deadline. On
//! expiry the in-flight future is dropped, which cancels the request, and the
//! call fails with [`FolioError::Timeout`]. Anything else that goes wrong
//! below the HTTP status level is a [`FolioError::Network`]. There are no
//! retries here.

use folio_core::config::DEFAULT_REQUEST_TIMEOUT_MS;
use folio_core::{FolioError, Result};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const TIMEOUT_MESSAGE: &str = "Request timed out";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A file sent as one multipart form field.
#[derive(Debug, Clone)]
pub struct MultipartFile {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartFile),
}

/// A request against an absolute URL.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn multipart(mut self, file: MultipartFile) -> Self {
        self.body = RequestBody::Multipart(file);
        self
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Extracts a server-supplied `error` or `message` string, if any.
    pub fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = self.json().ok()?;
        ["error", "message"]
            .iter()
            .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|message| !message.is_empty())
            .map(str::to_string)
    }
}

/// Joins a caller-supplied base URL and an endpoint path.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// HTTP transport with a fixed per-request deadline.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(Client::new(), timeout)
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs the request under the configured deadline.
    pub async fn request(&self, request: HttpRequest) -> Result<RawResponse> {
        let method = request.method;
        let url = request.url.clone();

        match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => {
                if let Ok(response) = &result {
                    tracing::debug!(
                        "[HttpTransport] {:?} {} -> {}",
                        method,
                        url,
                        response.status()
                    );
                }
                result
            }
            Err(_) => {
                tracing::warn!(
                    "[HttpTransport] {:?} {} timed out after {:?}",
                    method,
                    url,
                    self.timeout
                );
                Err(FolioError::Timeout(TIMEOUT_MESSAGE.to_string()))
            }
        }
    }

    async fn exchange(&self, request: HttpRequest) -> Result<RawResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(mime.essence_str())
                    .map_err(network_error)?;
                builder.multipart(Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS))
    }
}

fn network_error(err: reqwest::Error) -> FolioError {
    if err.is_timeout() {
        FolioError::Timeout(TIMEOUT_MESSAGE.to_string())
    } else {
        FolioError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_trims_slashes() {
        assert_eq!(join_url("http://h:5000/", "/data"), "http://h:5000/data");
        assert_eq!(join_url("http://h/api", "verify"), "http://h/api/verify");
    }

    #[test]
    fn test_server_message_prefers_error_then_message() {
        let response = RawResponse::new(401, br#"{"error":"Token has expired"}"#.to_vec());
        assert_eq!(response.server_message().as_deref(), Some("Token has expired"));

        let response = RawResponse::new(400, br#"{"message":"Password required"}"#.to_vec());
        assert_eq!(response.server_message().as_deref(), Some("Password required"));

        let response = RawResponse::new(500, b"<html>oops</html>".to_vec());
        assert_eq!(response.server_message(), None);

        let response = RawResponse::new(500, br#"{"error":"  "}"#.to_vec());
        assert_eq!(response.server_message(), None);
    }

    #[test]
    fn test_is_success_range() {
        assert!(RawResponse::new(204, Vec::new()).is_success());
        assert!(!RawResponse::new(302, Vec::new()).is_success());
    }
}
