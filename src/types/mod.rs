pub mod api;

pub use api::{HealthBody, HealthStatus, VisitorListResponse};
