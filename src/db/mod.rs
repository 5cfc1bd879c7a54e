//! Database module: visitor model, schema and store implementations.
//!
//! Layout:
//! - `models.rs`: the `Visitor` row and display-name rule
//! - `schema.rs`: SQL DDL per backend (PostgreSQL and SQLite)
//! - `store.rs`: the `VisitorStore` repository trait
//! - `sql.rs`: sqlx-backed store over the `Any` driver

pub mod models;
pub mod schema;
pub mod sql;
pub mod store;

pub use models::{Visitor, visitor_name};
pub use sql::{Backend, VisitorStorage};
pub use store::{UnavailableStore, VisitorStore};

use crate::config::Config;
use std::sync::Arc;
use tracing::{error, info};

/// Open the store described by `cfg`. Never fails: a bad `DATABASE_URL`
/// yields a store whose every call reports the configuration error.
pub fn open_store(cfg: &Config) -> Arc<dyn VisitorStore> {
    match VisitorStorage::connect_lazy(
        &cfg.database_url,
        cfg.db_max_connections,
        cfg.db_acquire_timeout(),
    ) {
        Ok(storage) => {
            info!(
                backend = ?storage.backend(),
                database_url = %cfg.redacted_database_url(),
                "visitor store configured"
            );
            Arc::new(storage)
        }
        Err(e) => {
            error!(error = %e, "visitor store unusable; requests will fail until fixed");
            Arc::new(UnavailableStore::new(e.to_string()))
        }
    }
}
