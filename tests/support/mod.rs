#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    fs,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use visitor_counter::VisitorError;
use visitor_counter::db::{Visitor, VisitorStorage, VisitorStore};
use visitor_counter::router::{AppState, app_router};
use visitor_counter::service::{Initializer, Readiness, RetryPolicy};

/// A throwaway SQLite file removed on drop.
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    pub fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "visitor-counter-{label}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        Self { path }
    }

    pub fn url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path.display())
    }

    pub fn storage(&self) -> VisitorStorage {
        VisitorStorage::connect_lazy(&self.url(), 1, Duration::from_secs(5))
            .expect("failed to build sqlite pool")
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Single attempt, no delay: keeps the lazy guard cheap in tests.
pub fn quick_policy() -> RetryPolicy {
    RetryPolicy::new(1, Duration::ZERO)
}

pub fn app(store: Arc<dyn VisitorStore>) -> (axum::Router, Arc<Readiness>) {
    let readiness = Arc::new(Readiness::new());
    let initializer = Initializer::new(store.clone(), readiness.clone(), quick_policy());
    let state = AppState::new(store, initializer);
    (app_router(state), readiness)
}

/// Wraps a real store and can make it look unreachable, the way a database
/// container that has not finished booting would.
pub struct SwitchableStore {
    inner: VisitorStorage,
    down: AtomicBool,
}

impl SwitchableStore {
    pub fn down(inner: VisitorStorage) -> Self {
        Self {
            inner,
            down: AtomicBool::new(true),
        }
    }

    pub fn bring_up(&self) {
        self.down.store(false, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), VisitorError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(VisitorError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl VisitorStore for SwitchableStore {
    async fn init_schema(&self) -> Result<(), VisitorError> {
        self.check_up()?;
        self.inner.init_schema().await
    }

    async fn count(&self) -> Result<i64, VisitorError> {
        self.check_up()?;
        self.inner.count().await
    }

    async fn insert(&self, name: &str) -> Result<(), VisitorError> {
        self.check_up()?;
        self.inner.insert(name).await
    }

    async fn list_all(&self) -> Result<Vec<Visitor>, VisitorError> {
        self.check_up()?;
        self.inner.list_all().await
    }

    async fn ping(&self) -> Result<(), VisitorError> {
        self.check_up()?;
        self.inner.ping().await
    }
}
