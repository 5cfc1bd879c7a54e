use axum::{Router, middleware::from_fn_with_state, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::db::VisitorStore;
use crate::handlers::{health::health_handler, visitors::visitors_handler};
use crate::middleware::init_guard::init_guard;
use crate::service::Initializer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VisitorStore>,
    pub initializer: Initializer,
}

impl AppState {
    pub fn new(store: Arc<dyn VisitorStore>, initializer: Initializer) -> Self {
        Self { store, initializer }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(visitors_handler))
        .route("/health", get(health_handler))
        .layer(from_fn_with_state(state.clone(), init_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
