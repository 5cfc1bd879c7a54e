use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// Process readiness as seen by the schema initializer.
///
/// `Uninitialized -> Ready` or `Uninitialized -> Degraded -> Ready | Degraded`.
/// There is no terminal failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Uninitialized,
    Ready,
    Degraded,
}

/// Process-wide flag holder. Reads are lock-free; transitions happen under
/// the mutex so only one initialization runs at a time.
///
/// `generation` counts finished initialization runs. A caller that read it
/// before queueing on the mutex can tell whether a run completed meanwhile.
#[derive(Debug)]
pub struct Readiness {
    ready: AtomicBool,
    generation: AtomicU64,
    state: Mutex<ReadinessState>,
}

impl Readiness {
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            state: Mutex::new(ReadinessState::Uninitialized),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn state(&self) -> ReadinessState {
        *self.state.lock().await
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, ReadinessState> {
        self.state.lock().await
    }

    pub(crate) fn publish(&self, guard: &mut MutexGuard<'_, ReadinessState>, next: ReadinessState) {
        **guard = next;
        self.ready.store(next == ReadinessState::Ready, Ordering::Release);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_uninitialized() {
        let r = Readiness::new();
        assert!(!r.is_ready());
        assert_eq!(r.state().await, ReadinessState::Uninitialized);
    }

    #[tokio::test]
    async fn degraded_can_recover() {
        let r = Readiness::new();
        {
            let mut g = r.lock().await;
            r.publish(&mut g, ReadinessState::Degraded);
        }
        assert!(!r.is_ready());
        assert_eq!(r.state().await, ReadinessState::Degraded);

        {
            let mut g = r.lock().await;
            r.publish(&mut g, ReadinessState::Ready);
        }
        assert!(r.is_ready());
        assert_eq!(r.state().await, ReadinessState::Ready);
        assert_eq!(r.generation(), 2);
    }
}
