use crate::errors::{AppError, TrackerError};
use crate::storage::persist_data;
use crate::store::Tracker;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{watch, Mutex};
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub tracker: Arc<Mutex<Tracker>>,
    revision: Arc<watch::Sender<u64>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, tracker: Tracker) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            data_path,
            tracker: Arc::new(Mutex::new(tracker)),
            revision: Arc::new(revision),
        }
    }

    /// Runs `op` against a copy of the tracker and installs the copy only
    /// once it has been written. A failed operation or write leaves the
    /// in-memory state untouched.
    pub async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Tracker) -> Result<T, TrackerError>,
    ) -> Result<T, AppError> {
        let mut tracker = self.tracker.lock().await;
        let mut draft = tracker.clone();
        let value = op(&mut draft)?;
        self.commit(&draft).await?;
        *tracker = draft;
        Ok(value)
    }

    /// Writes the whole document, then tells subscribers it changed.
    async fn commit(&self, tracker: &Tracker) -> Result<(), AppError> {
        persist_data(&self.data_path, tracker.data()).await?;
        self.revision.send_modify(|rev| *rev += 1);
        debug!(revision = *self.revision.borrow(), "state committed");
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
