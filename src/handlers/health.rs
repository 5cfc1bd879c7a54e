use axum::extract::State;

use crate::router::AppState;
use crate::service::visitors::check_health;
use crate::types::HealthStatus;

pub async fn health_handler(State(state): State<AppState>) -> HealthStatus {
    check_health(state.store.as_ref()).await
}
