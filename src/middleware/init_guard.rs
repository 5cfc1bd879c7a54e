use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::router::AppState;

/// Make sure schema initialization has succeeded once before handling a
/// request. A failed attempt is logged and the request still goes through;
/// the handler reports the store failure on its own error path.
pub async fn init_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Err(e) = state.initializer.ensure_ready().await {
        warn!(
            path = %req.uri().path(),
            error = %e,
            "lazy schema initialization failed; continuing"
        );
    }
    next.run(req).await
}
