//! Single-writer synchronization worker.
//!
//! All index writes go through one task that drains a queue of triggers, so
//! no two runs ever interleave their writes or their readiness updates.

use crate::error::{SyncError, SyncResult};
use crate::sync::synchronizer::{IndexSynchronizer, SyncReport, SyncTrigger};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

struct SyncJob {
    trigger: SyncTrigger,
    reply: Option<oneshot::Sender<SyncResult<SyncReport>>>,
}

/// Handle for submitting triggers to the synchronizer worker.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<SyncJob>,
}

impl SyncHandle {
    /// Queue a trigger without waiting for its run.
    pub fn submit(&self, trigger: SyncTrigger) -> SyncResult<()> {
        self.tx
            .send(SyncJob {
                trigger,
                reply: None,
            })
            .map_err(|_| SyncError::QueueClosed)
    }

    /// Queue a trigger and wait for its run to finish.
    pub async fn run(&self, trigger: SyncTrigger) -> SyncResult<SyncReport> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SyncJob {
                trigger,
                reply: Some(reply),
            })
            .map_err(|_| SyncError::QueueClosed)?;

        rx.await.map_err(|_| SyncError::QueueClosed)?
    }
}

/// Start the worker task.
///
/// The worker exits once every [`SyncHandle`] has been dropped and the
/// queue is drained.
pub fn spawn_synchronizer(synchronizer: Arc<IndexSynchronizer>) -> (SyncHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<SyncJob>();

    let worker = tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let kind = job.trigger.kind();
            let result = synchronizer.run(job.trigger).await;

            if let Err(e) = &result {
                tracing::error!("Index synchronization failed ({}): {}", kind, e);
            }

            if let Some(reply) = job.reply {
                // Caller may have stopped waiting
                let _ = reply.send(result);
            }
        }
        tracing::debug!("Synchronizer worker stopped");
    });

    (SyncHandle { tx }, worker)
}
