use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{build_api_url, ClientConfig};

#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        details: Option<Value>,
    },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Cannot resolve relative API URL {0} without an API origin")]
    InvalidUrl(String),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    fn from_status(status: u16, details: Option<Value>) -> Self {
        let message = details
            .as_ref()
            .and_then(|d| {
                d.get("message")
                    .and_then(Value::as_str)
                    .or_else(|| d.get("error").and_then(Value::as_str))
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed: {}", status));

        HttpError::Status {
            status,
            message,
            details,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            HttpError::Status { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

/// Thin wrapper over `reqwest` that resolves paths against the configured
/// API base and normalises error handling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        ApiClient {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn resolve_url(&self, path: &str) -> Result<String, HttpError> {
        if path.starts_with("http") {
            return Ok(path.to_string());
        }

        let url = self.config.build_api_url(path);
        if url.starts_with("http") {
            return Ok(url);
        }

        match &self.config.api_origin {
            Some(origin) => Ok(build_api_url(origin, &url)),
            None => Err(HttpError::InvalidUrl(url)),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(path)?;
        debug!("[http] {} {}", method, url);

        let mut builder = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            // Also sets Content-Type: application/json.
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let payload = read_payload(response).await;

        if !status.is_success() {
            warn!("[http] {} answered {}", url, status);
            return Err(HttpError::from_status(status.as_u16(), payload));
        }

        Ok(serde_json::from_value(payload.unwrap_or(Value::Null))?)
    }
}

/// JSON bodies are parsed, anything else is kept as a string.
async fn read_payload(response: Response) -> Option<Value> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        response.json::<Value>().await.ok()
    } else {
        response.text().await.ok().map(Value::String)
    }
}
