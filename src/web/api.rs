//! Relay endpoint handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use quotaboard_core::{CollectorError, QuotaCollector};

/// Error document returned with HTTP 500
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub message: String,
    /// Raw collector stdout, present for parse failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorBody {
    fn server_error(message: String) -> Self {
        Self {
            error: "Server Error".to_string(),
            message,
            raw: None,
        }
    }

    fn parse_error(raw: String) -> Self {
        Self {
            error: "Parse Error".to_string(),
            message: "Failed to parse script output".to_string(),
            raw: Some(raw),
        }
    }
}

/// Helper to create JSON error responses
fn json_error(body: ErrorBody) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Shared state for the relay handler
pub struct ApiState<C> {
    pub collector: C,
}

/// Run the collector once and relay its document.
///
/// Each request invokes the collector independently; nothing is cached.
pub async fn get_quota<C: QuotaCollector>(State(state): State<Arc<ApiState<C>>>) -> Response {
    match state.collector.fetch_snapshot().await {
        Ok(raw) => Json(raw.into_value()).into_response(),
        Err(CollectorError::Parse { raw, source }) => {
            error!("JSON Parse Error: {}", source);
            debug!("Raw Output: {}", raw);
            json_error(ErrorBody::parse_error(raw))
        }
        Err(e) => {
            error!("Execution error: {}", e);
            json_error(ErrorBody::server_error(e.to_string()))
        }
    }
}
