use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::{Result, SyncError};

/// Controls a load started with [`ResourceList::spawn_load`].
///
/// Dropping the handle cancels the load.
///
/// [`ResourceList::spawn_load`]: super::ResourceList::spawn_load
#[derive(Debug)]
pub struct LoadHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<usize>>>,
}

impl LoadHandle {
    pub(crate) fn new(cancel_tx: oneshot::Sender<()>, task: JoinHandle<Result<usize>>) -> Self {
        Self {
            cancel_tx: Some(cancel_tx),
            task: Some(task),
        }
    }

    /// Discards the load's result. The cache is left as it was.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the load. Resolves to the number of cached items, or
    /// `Cancelled` if the load was cancelled or already awaited.
    pub async fn wait(&mut self) -> Result<usize> {
        let Some(task) = self.task.as_mut() else {
            return Err(SyncError::Cancelled);
        };
        let outcome = task.await;
        self.task = None;
        match outcome {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, "load task did not complete");
                Err(SyncError::Cancelled)
            }
        }
    }

    pub async fn join(mut self) -> Result<usize> {
        self.wait().await
    }
}
