//! HTTP plumbing shared by the adapters.
//!
//! [`ProxyFetch`] is the indirection a host provides when the backend is only
//! reachable from a privileged context. It reports failures in the returned
//! [`ProxyResponse`] instead of erroring.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TranslateError;

/// Message a proxy puts on a successful response whose body is not JSON
pub const NON_JSON_MESSAGE: &str = "Response is not valid JSON";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl FetchOptions {
    pub fn post_json(body: Value) -> Self {
        Self {
            method: Method::POST,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Structured outcome of a proxied request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub error: bool,
    /// Absent when no response was received at all
    pub status: Option<u16>,
    pub data: Option<Value>,
    pub message: Option<String>,
}

impl ProxyResponse {
    pub fn success(status: u16, data: Value) -> Self {
        Self {
            error: false,
            status: Some(status),
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            status,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[async_trait::async_trait]
pub trait ProxyFetch: Send + Sync {
    async fn proxy_fetch(&self, url: &str, options: FetchOptions) -> ProxyResponse;
}

/// Proxy that performs the request itself with reqwest
#[derive(Clone, Default)]
pub struct HttpProxy {
    client: reqwest::Client,
}

impl HttpProxy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ProxyFetch for HttpProxy {
    async fn proxy_fetch(&self, url: &str, options: FetchOptions) -> ProxyResponse {
        let mut request = self.client.request(options.method, url);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Proxy request to {url} failed: {e}");
                return ProxyResponse::failure(None, e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ProxyResponse::failure(Some(status.as_u16()), e.to_string()),
        };
        let data = serde_json::from_str::<Value>(&text).ok();

        if status.is_success() {
            return match data {
                Some(data) => ProxyResponse::success(status.as_u16(), data),
                None => ProxyResponse::failure(Some(status.as_u16()), NON_JSON_MESSAGE),
            };
        }

        let message = data
            .as_ref()
            .and_then(|body| error_field(body, "message"))
            .unwrap_or_else(|| reason(status));
        ProxyResponse {
            error: true,
            status: Some(status.as_u16()),
            data,
            message: Some(message),
        }
    }
}

/// Build an [`TranslateError::Http`] from a non-2xx response, reading the
/// `error.{message, code, type, status}` fields providers put in the body
pub async fn error_from_response(response: reqwest::Response, key_configured: bool) -> TranslateError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<Value>(&body).ok();
    error_from_parts(status.as_u16(), parsed.as_ref(), key_configured)
}

pub fn error_from_parts(status: u16, body: Option<&Value>, key_configured: bool) -> TranslateError {
    let message = body
        .and_then(|body| error_field(body, "message"))
        .or_else(|| StatusCode::from_u16(status).ok().map(reason))
        .unwrap_or_default();
    let code = body.and_then(|body| {
        error_field(body, "code")
            .or_else(|| error_field(body, "type"))
            .or_else(|| error_field(body, "status"))
    });

    TranslateError::Http {
        status,
        message,
        code,
        key_configured,
    }
}

/// A field of the provider's `error` object, when present and non-empty.
/// Numeric codes are rendered as text.
pub fn error_field(body: &Value, field: &str) -> Option<String> {
    match &body["error"][field] {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
