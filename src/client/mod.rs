//! HTTP client for the relay endpoint.
//!
//! Transport failures, relay-reported failures (non-2xx) and application
//! errors (an `error` field in a 2xx body) all surface as [`ClientError`],
//! which the dashboard treats uniformly as a failed poll.

use std::future::Future;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use quotaboard_core::{QuotaSnapshot, RawSnapshot};

/// Failed fetch of a quota snapshot
#[derive(Debug, Error)]
pub enum ClientError {
    /// Relay unreachable or connection dropped
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Relay answered with a non-success status
    #[error("HTTP error! status: {}{}", .status.as_u16(), message_suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// Body carried an `error` field
    #[error("{0}")]
    Application(String),

    /// Body was JSON but not a readable quota document
    #[error("Invalid quota document: {0}")]
    Decode(#[from] serde_json::Error),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(" ({})", m),
        _ => String::new(),
    }
}

/// Anything the poller can fetch snapshots from
pub trait SnapshotSource: Send + Sync + 'static {
    /// Fetch the current snapshot
    fn fetch_snapshot(&self) -> impl Future<Output = Result<QuotaSnapshot, ClientError>> + Send;
}

/// Relay endpoint client
#[derive(Debug, Clone)]
pub struct QuotaClient {
    http: reqwest::Client,
    url: String,
}

impl QuotaClient {
    /// Create a client for the full endpoint URL (e.g. `http://localhost:3001/api/quota`)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SnapshotSource for QuotaClient {
    async fn fetch_snapshot(&self) -> Result<QuotaSnapshot, ClientError> {
        debug!("Fetching {}", self.url);
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.json::<serde_json::Value>().await.ok();
            return Err(ClientError::Status {
                status,
                message: body.as_ref().and_then(relay_message),
            });
        }

        let body: serde_json::Value = response.json().await?;
        snapshot_from_body(body)
    }
}

/// Describe a relay error document: `"Server Error: <message>"`
fn relay_message(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error").and_then(|e| e.as_str());
    let message = body.get("message").and_then(|m| m.as_str());
    match (error, message) {
        (Some(e), Some(m)) => Some(format!("{}: {}", e, m)),
        (Some(e), None) => Some(e.to_string()),
        (None, Some(m)) => Some(m.to_string()),
        (None, None) => None,
    }
}

/// Whether an `error` field is set to something meaningful
fn has_error_field(body: &serde_json::Value) -> bool {
    match body.get("error") {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => false,
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Turn a 2xx body into a snapshot, rejecting application error documents
pub(crate) fn snapshot_from_body(body: serde_json::Value) -> Result<QuotaSnapshot, ClientError> {
    if has_error_field(&body) {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or("API returned an error")
            .to_string();
        return Err(ClientError::Application(message));
    }

    Ok(RawSnapshot::new(body).snapshot()?)
}
