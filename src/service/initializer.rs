use crate::db::VisitorStore;
use crate::error::{IsRetryable, VisitorError};
use crate::service::readiness::{Readiness, ReadinessState};
use crate::service::retry::{RetryPolicy, retry_bounded};
use std::sync::Arc;
use tokio::sync::MutexGuard;
use tracing::{error, info, warn};

/// Creates the visitor schema with a bounded retry budget and records the
/// outcome in the shared [`Readiness`].
#[derive(Clone)]
pub struct Initializer {
    store: Arc<dyn VisitorStore>,
    readiness: Arc<Readiness>,
    policy: RetryPolicy,
}

impl Initializer {
    pub fn new(
        store: Arc<dyn VisitorStore>,
        readiness: Arc<Readiness>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            readiness,
            policy,
        }
    }

    pub fn readiness(&self) -> &Arc<Readiness> {
        &self.readiness
    }

    /// Run schema creation unconditionally. Safe on an existing schema.
    pub async fn ensure_schema(&self) -> Result<(), VisitorError> {
        let mut state = self.readiness.lock().await;
        self.run(&mut state).await
    }

    /// Lazy variant: a no-op once the schema has been confirmed, otherwise
    /// the same bounded attempt as [`Self::ensure_schema`].
    ///
    /// Callers that queue behind a run already in flight take its outcome
    /// instead of starting another, so no caller waits past one budget.
    pub async fn ensure_ready(&self) -> Result<(), VisitorError> {
        if self.readiness.is_ready() {
            return Ok(());
        }
        let seen = self.readiness.generation();
        let mut state = self.readiness.lock().await;
        match *state {
            ReadinessState::Ready => Ok(()),
            _ if self.readiness.generation() != seen => Err(VisitorError::InitExhausted {
                attempts: self.policy.max_attempts(),
            }),
            _ => self.run(&mut state).await,
        }
    }

    async fn run(&self, state: &mut MutexGuard<'_, ReadinessState>) -> Result<(), VisitorError> {
        let max_attempts = self.policy.max_attempts();
        let store = &self.store;

        let res = retry_bounded(self.policy, |attempt| async move {
            match store.init_schema().await {
                Ok(()) => {
                    info!(attempt, max_attempts, "database connected and schema ready");
                    Ok(())
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts,
                        retryable = e.is_retryable(),
                        error = %e,
                        "schema initialization failed"
                    );
                    Err(e)
                }
            }
        })
        .await;

        match res {
            Ok(()) => {
                self.readiness.publish(state, ReadinessState::Ready);
                Ok(())
            }
            Err(e) => {
                error!(
                    attempts = max_attempts,
                    error = %e,
                    "unable to connect to database; serving in degraded mode"
                );
                self.readiness.publish(state, ReadinessState::Degraded);
                Err(VisitorError::InitExhausted {
                    attempts: max_attempts,
                })
            }
        }
    }
}
