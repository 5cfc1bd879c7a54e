use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum VisitorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Store(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema initialization failed after {attempts} attempts")]
    InitExhausted { attempts: u32 },
}

/// Classifies failures that may clear up on their own.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for VisitorError {
    fn is_retryable(&self) -> bool {
        match self {
            VisitorError::Connection(_) => true,
            VisitorError::Store(e) => matches!(
                e,
                SqlxError::Io(_) | SqlxError::PoolTimedOut | SqlxError::PoolClosed
            ),
            VisitorError::Config(_) | VisitorError::InitExhausted { .. } => false,
        }
    }
}

impl VisitorError {
    /// Classify a failure while creating the schema: transport-level errors
    /// mean the store is not reachable yet, everything else is a store error.
    pub fn from_init(e: SqlxError) -> Self {
        match e {
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed => VisitorError::Connection(e.to_string()),
            other => VisitorError::Store(other),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            VisitorError::Connection(_) | VisitorError::Config(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            VisitorError::Store(_) | VisitorError::InitExhausted { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for VisitorError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match self {
            VisitorError::Connection(_) | VisitorError::Config(_) => ApiErrorBody {
                code: "STORE_UNAVAILABLE".to_string(),
                message: "The visitor store is unavailable.".to_string(),
            },
            // InitExhausted is produced by the initializer, which the guard
            // only logs; a handler never returns it.
            VisitorError::Store(_) | VisitorError::InitExhausted { .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred.".to_string(),
            },
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
