//! Catalyst Server
//!
//! REST API over the ROI projection engine: scenario catalog browsing,
//! calculations, comparisons, calculation history and catalog hot reload.

pub mod history;
pub mod http;
pub mod metrics;
pub mod state;

pub use history::{CalculationRecord, CalculationStore, InMemoryCalculationStore};
pub use http::create_router;
pub use crate::metrics::{init_metrics, record_calculation, record_fallback, Outcome};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalyst_core::ValidationError;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "validation_error",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::NotFound(_) => "not_found",
            ServerError::Catalog(_) => "catalog_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl From<catalyst_config::ConfigError> for ServerError {
    fn from(err: catalyst_config::ConfigError) -> Self {
        ServerError::Catalog(err.to_string())
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        StatusCode::from(&err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut body = serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        if let ServerError::Validation(e) = &self {
            body["field"] = serde_json::Value::from(e.field());
        }

        (status, Json(body)).into_response()
    }
}
