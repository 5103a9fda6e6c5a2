//! crates/juma_core/src/persistence.rs
//!
//! Fire-and-forget persistence of a single storage record.
//!
//! Each `Persister` owns one background task and one queue. Writes are
//! applied strictly in the order they were scheduled, so the last scheduled
//! value is the one left in storage. A failed write is logged and dropped;
//! it never reaches the caller and never touches in-memory state.

use crate::ports::DurableStorage;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum Command {
    Write(String),
    Remove,
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer for one record.
#[derive(Debug)]
pub struct Persister {
    key: String,
    tx: mpsc::UnboundedSender<Command>,
}

impl Persister {
    /// Spawns the writer task on the current tokio runtime.
    pub fn spawn(storage: Arc<dyn DurableStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key.clone(), rx));
        Self { key, tx }
    }

    /// Schedules a full write of `value`. Returns immediately.
    pub fn persist(&self, value: String) {
        self.send(Command::Write(value));
    }

    /// Schedules removal of the record.
    pub fn remove(&self) {
        self.send(Command::Remove);
    }

    /// Waits until every write scheduled before this call has been attempted.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            warn!(key = %self.key, "Persistence task is gone; change kept in memory only");
        }
    }
}

async fn run_writer(
    storage: Arc<dyn DurableStorage>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Write(value) => match storage.set_item(&key, &value).await {
                Ok(()) => debug!(key = %key, bytes = value.len(), "Record persisted"),
                Err(e) => warn!(key = %key, "Failed to persist record: {}", e),
            },
            Command::Remove => {
                if let Err(e) = storage.remove_item(&key).await {
                    warn!(key = %key, "Failed to remove record: {}", e);
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
