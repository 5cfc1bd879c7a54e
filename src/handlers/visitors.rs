use axum::{Json, extract::State};
use tracing::error;

use crate::service::visitors::record_visit;
use crate::types::VisitorListResponse;
use crate::{VisitorError, router::AppState};

/// Record a visit and list all visitors.
pub async fn visitors_handler(
    State(state): State<AppState>,
) -> Result<Json<VisitorListResponse>, VisitorError> {
    let resp = record_visit(state.store.as_ref())
        .await
        .inspect_err(|e| error!(error = %e, "recording visit failed"))?;
    Ok(Json(resp))
}
