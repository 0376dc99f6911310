//! HTTP request executor.
//!
//! [`HttpExecutor`] is the seam between the `request` tool and the network.
//! [`ReqwestExecutor`] is the production implementation.
//!
//! Success policy: any 2xx status is a success. Everything else, including a
//! transport failure, is an [`Error::Request`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::types::{Error, HttpConfig, Result};

/// Methods the `request` tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Post,
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent for this method.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::validation(format!("type: unsupported method '{}'", s)))
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A validated outbound request.
///
/// `body` is already serialized JSON text; the executor never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    #[serde(rename = "type")]
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpRequest {
    /// Body that will actually go on the wire, if any.
    pub fn outbound_body(&self) -> Option<&str> {
        if self.method.sends_body() {
            self.body.as_deref()
        } else {
            None
        }
    }
}

/// Normalized result of a successful request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOutcome {
    pub status: u16,
    pub data: String,
    pub headers: BTreeMap<String, String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpOutcome>;
}

/// [`HttpExecutor`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn header_map(request: &HttpRequest) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::validation(format!("headers: invalid name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                Error::validation(format!("headers: invalid value for '{}': {}", name, e))
            })?;
            headers.insert(name, value);
        }
        if request.outbound_body().is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpOutcome> {
        let headers = Self::header_map(&request)?;
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(headers);
        if let Some(body) = request.outbound_body() {
            builder = builder.body(body.to_string());
        }

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(url = %request.url, "request failed: {}", e);
            Error::request(e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::request(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let data = response
            .text()
            .await
            .map_err(|e| Error::request(Some(status.as_u16()), e.to_string()))?;

        Ok(HttpOutcome {
            status: status.as_u16(),
            data,
            headers,
        })
    }
}
