use std::time::Duration;

use derive_more::Display;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Config;
use crate::utils::mappers::{EncodingError, Mapping, to_camel_case};

pub mod leave_request;
pub mod leave_type;
pub mod user;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "request to {} failed: {}", url, source)]
    Transport { url: String, source: reqwest::Error },
    #[display(fmt = "bad request to {}: {}", url, body)]
    BadRequest { url: String, body: String },
    #[display(fmt = "{} answered {}: {}", url, status, body)]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[display(fmt = "unexpected response from {}: {}", path, source)]
    Decode {
        path: String,
        source: serde_json::Error,
    },
    #[display(fmt = "{}", _0)]
    Encoding(EncodingError),
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport { source, .. } => Some(source),
            ApiError::Decode { source, .. } => Some(source),
            ApiError::Encoding(e) => Some(e),
            ApiError::BadRequest { .. } | ApiError::Status { .. } => None,
        }
    }
}

impl From<EncodingError> for ApiError {
    fn from(e: EncodingError) -> Self {
        ApiError::Encoding(e)
    }
}

/// Client of the leave API. Outbound bodies are expected in wire
/// (snake_case) form; responses are camel-cased before decoding.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the parsed body, `Null` when empty.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Mapping>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %url, "leave api request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            error!(error = %source, url = %url, "Leave API unreachable");
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        if status == StatusCode::BAD_REQUEST {
            error!(url = %url, body = %text, "Bad Request (400)");
            return Err(ApiError::BadRequest { url, body: text });
        }
        if !status.is_success() {
            error!(url = %url, status = %status, "Leave API request failed");
            return Err(ApiError::Status {
                url,
                status,
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

/// Camel-cases an object body; anything else passes through.
fn entity(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(to_camel_case(&map)),
        other => other,
    }
}

/// Collection endpoints answer with a bare array of records.
fn entities(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(entity).collect()),
        other => entity(other),
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}
