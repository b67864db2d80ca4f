//! HTTP client for the metrics backend: one `POST /api/monitor` per request.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::form::{validate_credentials, FieldErrors};
use crate::types::{Credentials, MonitorReport, MonitorResponse};

/// Appended to the backend URL, after any path prefix it already carries.
pub const MONITOR_PATH: &str = "api/monitor";
pub const DEFAULT_BACKEND: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const FALLBACK_MESSAGE: &str = "Failed to connect to server";

/// Failure categories shown to the user. Raw transport errors are only logged.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("{0}")]
    InvalidInput(FieldErrors),
    #[error("Connection timeout. The server took too long to respond.")]
    Timeout,
    #[error("Network error. Make sure the backend server is running on {0}")]
    NetworkUnreachable(String),
    #[error("{0}")]
    Backend(String),
    #[error("No response from server. Is the backend running?")]
    NoResponse,
    #[error("invalid backend URL: {0}")]
    BadEndpoint(String),
    #[error("failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct MonitorClient {
    http: reqwest::Client,
    base: Url,
    endpoint: Url,
}

impl MonitorClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, MonitorError> {
        let endpoint = monitor_endpoint(&base)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MonitorError::Setup)?;
        Ok(Self {
            http,
            base,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch one snapshot. Input is validated before anything touches the network.
    pub async fn monitor(&self, creds: &Credentials) -> Result<MonitorReport, MonitorError> {
        validate_credentials(creds).map_err(MonitorError::InvalidInput)?;
        debug!(server = %creds.server, endpoint = %self.endpoint, "requesting metrics");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(creds)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(MonitorError::Backend(error_message(status, &body)));
        }

        match serde_json::from_str::<MonitorResponse>(&body) {
            Ok(MonitorResponse {
                success: true,
                server,
                data: Some(snapshot),
                ..
            }) => Ok(MonitorReport { server, snapshot }),
            Ok(r) => Err(MonitorError::Backend(
                r.message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            )),
            Err(e) => {
                warn!("undecodable backend response: {e}");
                Err(MonitorError::Backend("Invalid response from backend".into()))
            }
        }
    }

    fn classify(&self, e: reqwest::Error) -> MonitorError {
        warn!("monitor request failed: {e}");
        if e.is_timeout() {
            MonitorError::Timeout
        } else if e.is_connect() {
            MonitorError::NetworkUnreachable(self.base.as_str().trim_end_matches('/').to_string())
        } else {
            MonitorError::NoResponse
        }
    }
}

// `join` replaces the last path segment unless the path ends in '/'.
fn monitor_endpoint(base: &Url) -> Result<Url, MonitorError> {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    dir.join(MONITOR_PATH)
        .map_err(|e| MonitorError::BadEndpoint(format!("{base}: {e}")))
}

/// `detail` string, else `message` string, else a generic message. Empty strings
/// fall through to the next field.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let Ok(v) = serde_json::from_str::<Value>(body) else {
        debug!(%status, "non-JSON error body");
        return FALLBACK_MESSAGE.to_string();
    };
    ["detail", "message"]
        .iter()
        .find_map(|k| v.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
