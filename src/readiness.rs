//! Search readiness signal.
//!
//! A process-wide flag that is false while the index is being (re)built and
//! true once a rebuild has succeeded. Consumers either read it directly or
//! subscribe and wait for it to flip.

use crate::error::{QueryResult, SearchError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

/// Current readiness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Readiness {
    /// Whether search may be served
    pub ready: bool,

    /// When the flag last became true
    pub ready_since: Option<DateTime<Utc>>,
}

/// Publisher side of the readiness flag.
#[derive(Clone)]
pub struct ReadinessSignal {
    tx: Arc<watch::Sender<Readiness>>,
}

impl ReadinessSignal {
    /// Create a signal that starts out not ready.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Readiness::default());
        Self { tx: Arc::new(tx) }
    }

    /// Set the flag, notifying subscribers when it changes.
    pub fn set(&self, ready: bool) {
        self.tx.send_if_modified(|state| {
            if state.ready == ready {
                return false;
            }
            state.ready = ready;
            state.ready_since = ready.then(Utc::now);
            true
        });
    }

    /// Whether search may currently be served.
    pub fn is_ready(&self) -> bool {
        self.tx.borrow().ready
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> Readiness {
        *self.tx.borrow()
    }

    /// Fail with `SearchError::IndexNotReady` unless the flag is set.
    pub fn ensure_ready(&self) -> QueryResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(SearchError::IndexNotReady)
        }
    }

    /// Subscribe to readiness changes.
    pub fn subscribe(&self) -> ReadinessWatcher {
        ReadinessWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ReadinessSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber side of the readiness flag.
pub struct ReadinessWatcher {
    rx: watch::Receiver<Readiness>,
}

impl ReadinessWatcher {
    /// Wait until the flag is true; returns immediately if it already is.
    pub async fn wait_until_ready(&mut self) -> QueryResult<Readiness> {
        self.rx
            .wait_for(|state| state.ready)
            .await
            .map(|state| *state)
            .map_err(|_| SearchError::ExecutionError("readiness signal dropped".to_string()))
    }

    /// Wait for the next change of the flag.
    pub async fn changed(&mut self) -> QueryResult<Readiness> {
        self.rx
            .changed()
            .await
            .map_err(|_| SearchError::ExecutionError("readiness signal dropped".to_string()))?;
        Ok(*self.rx.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_not_ready() {
        let signal = ReadinessSignal::new();
        assert!(!signal.is_ready());
        assert!(matches!(
            signal.ensure_ready(),
            Err(SearchError::IndexNotReady)
        ));
    }

    #[test]
    fn test_set_records_ready_since() {
        let signal = ReadinessSignal::new();
        signal.set(true);
        assert!(signal.is_ready());
        assert!(signal.current().ready_since.is_some());

        signal.set(false);
        assert!(signal.current().ready_since.is_none());
    }

    #[tokio::test]
    async fn test_wait_until_ready() {
        let signal = ReadinessSignal::new();
        let mut watcher = signal.subscribe();

        let publisher = signal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            publisher.set(true);
        });

        let state = tokio::time::timeout(Duration::from_secs(1), watcher.wait_until_ready())
            .await
            .expect("readiness never arrived")
            .unwrap();
        assert!(state.ready);
    }

    #[test]
    fn test_wait_when_already_ready() {
        let signal = ReadinessSignal::new();
        signal.set(true);
        let mut watcher = signal.subscribe();
        let state = tokio_test::block_on(watcher.wait_until_ready()).unwrap();
        assert!(state.ready);
    }

    #[tokio::test]
    async fn test_changed_reports_transitions() {
        let signal = ReadinessSignal::new();
        let mut watcher = signal.subscribe();

        signal.set(true);
        assert!(watcher.changed().await.unwrap().ready);

        signal.set(false);
        assert!(!watcher.changed().await.unwrap().ready);
    }
}
