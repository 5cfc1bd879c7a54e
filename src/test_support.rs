//! In-memory `VisitorStore` with fault injection, for unit tests.

use crate::db::{Visitor, VisitorStore};
use crate::error::VisitorError;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::Barrier;

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Visitor>>,
    schema: AtomicBool,
    down: AtomicBool,
    fail_insert: AtomicBool,
    init_failures_left: AtomicU32,
    pub init_calls: AtomicU32,
    count_barrier: Option<Barrier>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `count` waits for `parties` callers before returning, which
    /// forces concurrent visits to interleave between count and insert.
    pub fn with_count_barrier(parties: usize) -> Self {
        Self {
            count_barrier: Some(Barrier::new(parties)),
            ..Self::default()
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn set_fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    pub fn fail_next_inits(&self, n: u32) {
        self.init_failures_left.store(n, Ordering::SeqCst);
    }

    pub fn names(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|v| v.name.clone())
            .collect()
    }

    fn check_up(&self) -> Result<(), VisitorError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(VisitorError::Store(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl VisitorStore for MemoryStore {
    async fn init_schema(&self) -> Result<(), VisitorError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.check_up()?;
        let left = self.init_failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.init_failures_left.store(left - 1, Ordering::SeqCst);
            return Err(VisitorError::Connection("connection refused".to_string()));
        }
        self.schema.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn count(&self) -> Result<i64, VisitorError> {
        self.check_up()?;
        let n = self.rows.lock().unwrap().len() as i64;
        if let Some(barrier) = &self.count_barrier {
            barrier.wait().await;
        }
        Ok(n)
    }

    async fn insert(&self, name: &str) -> Result<(), VisitorError> {
        self.check_up()?;
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(VisitorError::Store(sqlx::Error::Protocol(
                "insert rejected".to_string(),
            )));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(Visitor {
            id,
            name: name.to_string(),
            created_at: "2026-01-01 00:00:00".to_string(),
        });
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Visitor>, VisitorError> {
        self.check_up()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<(), VisitorError> {
        self.check_up()
    }
}
