use crate::config::GREETING;
use crate::db::{VisitorStore, visitor_name};
use crate::error::VisitorError;
use crate::types::{HealthStatus, VisitorListResponse};
use tracing::{debug, warn};

/// Record one visit and return every visitor name in insertion order.
///
/// Count and insert are separate round trips, so concurrent callers can
/// compute the same number and store duplicate names. Names are labels,
/// `id` is the key.
pub async fn record_visit(store: &dyn VisitorStore) -> Result<VisitorListResponse, VisitorError> {
    let existing = store.count().await?;
    let name = visitor_name(existing);
    store.insert(&name).await?;
    debug!(%name, "visitor recorded");

    let visitors = store
        .list_all()
        .await?
        .into_iter()
        .map(|v| v.name)
        .collect();

    Ok(VisitorListResponse {
        message: GREETING.to_string(),
        visitors,
    })
}

/// Probe the store. Never fails; errors become [`HealthStatus::Error`].
pub async fn check_health(store: &dyn VisitorStore) -> HealthStatus {
    match store.ping().await {
        Ok(()) => HealthStatus::Ok,
        Err(e) => {
            warn!(error = %e, "health probe failed");
            HealthStatus::Error {
                details: e.to_string(),
            }
        }
    }
}
