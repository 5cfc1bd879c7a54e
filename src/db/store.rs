use crate::db::models::Visitor;
use crate::error::VisitorError;
use async_trait::async_trait;

/// Repository seam between the request logic and the relational store.
#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Create the visitor table if absent. Must be idempotent.
    async fn init_schema(&self) -> Result<(), VisitorError>;

    async fn count(&self) -> Result<i64, VisitorError>;

    /// Insert and commit one row. A failure leaves no row behind.
    async fn insert(&self, name: &str) -> Result<(), VisitorError>;

    /// All rows in insertion (primary key) order.
    async fn list_all(&self) -> Result<Vec<Visitor>, VisitorError>;

    /// Trivial round trip with no side effects.
    async fn ping(&self) -> Result<(), VisitorError>;
}

/// Stand-in used when `DATABASE_URL` cannot produce a pool.
/// Every call fails with the same configuration error.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, VisitorError> {
        Err(VisitorError::Config(self.reason.clone()))
    }
}

#[async_trait]
impl VisitorStore for UnavailableStore {
    async fn init_schema(&self) -> Result<(), VisitorError> {
        self.fail()
    }

    async fn count(&self) -> Result<i64, VisitorError> {
        self.fail()
    }

    async fn insert(&self, _name: &str) -> Result<(), VisitorError> {
        self.fail()
    }

    async fn list_all(&self) -> Result<Vec<Visitor>, VisitorError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), VisitorError> {
        self.fail()
    }
}
