//! SaveQueue - fire-and-forget persistence of progress patches.
//!
//! Patches are handed to a single worker task that saves them one at a
//! time in the order they were enqueued, so a later patch always lands
//! after an earlier one. Failures are logged and never reach the flow;
//! nothing is retried.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::foundation::UserId;
use crate::domain::progress::ProgressPatch;
use crate::ports::ProgressStore;

enum SaveJob {
    Save(UserId, ProgressPatch),
    Flush(oneshot::Sender<()>),
}

/// Dispatches saves without blocking the caller.
pub struct SaveQueue {
    store: Arc<dyn ProgressStore>,
    worker: Mutex<Option<mpsc::UnboundedSender<SaveJob>>>,
}

impl SaveQueue {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self {
            store,
            worker: Mutex::new(None),
        }
    }

    /// Queues a save of `patch` for `user_id` behind every earlier save.
    ///
    /// Outside a Tokio runtime the save is skipped with a warning.
    pub fn enqueue(&self, user_id: UserId, patch: ProgressPatch) {
        if patch.is_empty() {
            return;
        }

        let mut job = SaveJob::Save(user_id, patch);
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(tx) = worker.as_ref() {
            match tx.send(job) {
                Ok(()) => return,
                // The worker's runtime is gone; start a new one below.
                Err(mpsc::error::SendError(returned)) => job = returned,
            }
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                if let SaveJob::Save(user_id, _) = &job {
                    warn!(user_id = %user_id, "No async runtime available, progress not saved");
                }
                *worker = None;
                return;
            }
        };

        let fresh = self.spawn_worker(&handle);
        if fresh.send(job).is_err() {
            warn!("Progress save worker stopped before accepting a save");
        }
        *worker = Some(fresh);
    }

    /// Waits until every save enqueued so far has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        let sent = {
            let worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
            match worker.as_ref() {
                Some(tx) => tx.send(SaveJob::Flush(ack_tx)).is_ok(),
                None => return,
            }
        };

        if !sent || ack_rx.await.is_err() {
            warn!("Progress save worker stopped before flushing");
        }
    }

    /// Starts the task that drains saves in order; it ends when the sender is dropped.
    fn spawn_worker(&self, handle: &Handle) -> mpsc::UnboundedSender<SaveJob> {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveJob>();
        let store = Arc::clone(&self.store);

        handle.spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    SaveJob::Save(user_id, patch) => match store.save(&user_id, &patch).await {
                        Ok(()) => debug!(user_id = %user_id, "Progress saved"),
                        Err(e) => warn!(user_id = %user_id, error = %e, "Failed to save progress"),
                    },
                    SaveJob::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        tx
    }
}
