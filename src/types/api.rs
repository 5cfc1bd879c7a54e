use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Body of `GET /api`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitorListResponse {
    pub message: String,
    pub visitors: Vec<String>,
}

/// Outcome of a store round trip, rendered as the `/health` response.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    Ok,
    Error { details: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HealthStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HealthStatus::Ok => StatusCode::OK,
            HealthStatus::Error { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<HealthStatus> for HealthBody {
    fn from(value: HealthStatus) -> Self {
        match value {
            HealthStatus::Ok => HealthBody {
                status: "OK".to_string(),
                details: None,
            },
            HealthStatus::Error { details } => HealthBody {
                status: "error".to_string(),
                details: Some(details),
            },
        }
    }
}

impl IntoResponse for HealthStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Json(HealthBody::from(self))).into_response()
    }
}
