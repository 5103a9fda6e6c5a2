//! crates/juma_core/src/completion.rs
//!
//! Tracks which sermons the user has marked as completed. Persisted apart
//! from the sermons themselves.

use crate::domain::{CompletionProgress, SermonId};
use crate::persistence::Persister;
use crate::ports::DurableStorage;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, warn};

/// Storage key of the completed-id set.
pub const PROGRESS_STORAGE_KEY: &str = "juma_sermons_progress_v1";

/// The completed set. Like `CollectionStore`, it stops writing for the
/// session if its record could not be read.
#[derive(Debug)]
pub struct CompletionTracker {
    completed: BTreeSet<SermonId>,
    persister: Persister,
    persisting: bool,
}

impl CompletionTracker {
    /// Loads the completed set. A missing, unreadable or corrupted record
    /// yields an empty set; a corrupted one is removed.
    pub async fn open(storage: Arc<dyn DurableStorage>) -> Self {
        let (completed, persisting) = match load_completed(storage.as_ref()).await {
            Some(completed) => (completed, true),
            None => {
                warn!("Completion changes will not be saved this session");
                (BTreeSet::new(), false)
            }
        };
        Self {
            completed,
            persister: Persister::spawn(storage, PROGRESS_STORAGE_KEY),
            persisting,
        }
    }

    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    /// Flips the completion state of `id` and returns the new state.
    pub fn toggle(&mut self, id: SermonId) -> bool {
        let now_completed = if self.completed.remove(&id) {
            false
        } else {
            self.completed.insert(id);
            true
        };
        self.schedule_write();
        now_completed
    }

    pub fn is_completed(&self, id: SermonId) -> bool {
        self.completed.contains(&id)
    }

    /// Size of the raw completed set. Ids of sermons that no longer exist
    /// still count.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[cfg(test)]
    fn completed_ids(&self) -> impl Iterator<Item = SermonId> + '_ {
        self.completed.iter().copied()
    }

    /// Progress against a collection of `total` sermons.
    pub fn progress(&self, total: usize) -> CompletionProgress {
        let count = self.completed_count();
        let ratio = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        CompletionProgress {
            count,
            total,
            ratio,
        }
    }

    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    fn schedule_write(&self) {
        if !self.persisting {
            return;
        }
        match serde_json::to_string(&self.completed) {
            Ok(json) => self.persister.persist(json),
            Err(e) => error!("Failed to serialize completion state: {}", e),
        }
    }
}

/// `None` when the record could not be read at all.
async fn load_completed(storage: &dyn DurableStorage) -> Option<BTreeSet<SermonId>> {
    let raw = match storage.get_item(PROGRESS_STORAGE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Some(BTreeSet::new()),
        Err(e) => {
            error!("Failed to load completion state: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(completed) => Some(completed),
        Err(e) => {
            error!("Completion state is corrupted, starting empty: {}", e);
            if let Err(e) = storage.remove_item(PROGRESS_STORAGE_KEY).await {
                warn!("Failed to remove corrupted completion record: {}", e);
            }
            Some(BTreeSet::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStorage;

    #[tokio::test]
    async fn toggle_twice_restores_membership() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut tracker = CompletionTracker::open(storage).await;

        assert!(tracker.toggle(2));
        assert!(tracker.is_completed(2));
        assert_eq!(tracker.completed_count(), 1);

        assert!(!tracker.toggle(2));
        assert!(!tracker.is_completed(2));
        assert_eq!(tracker.completed_count(), 0);
    }

    #[tokio::test]
    async fn progress_ratio() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut tracker = CompletionTracker::open(storage).await;
        assert_eq!(tracker.progress(0).ratio, 0.0);

        tracker.toggle(1);
        tracker.toggle(3);
        let progress = tracker.progress(4);
        assert_eq!(progress.count, 2);
        assert_eq!(progress.total, 4);
        assert!((progress.ratio - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn stale_ids_still_count() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut tracker = CompletionTracker::open(storage).await;
        tracker.toggle(999);
        assert_eq!(tracker.progress(3).count, 1);
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut tracker = CompletionTracker::open(storage.clone()).await;
        tracker.toggle(3);
        tracker.toggle(1);
        tracker.flush().await;
        assert_eq!(storage.peek(PROGRESS_STORAGE_KEY).as_deref(), Some("[1,3]"));

        let reopened = CompletionTracker::open(storage).await;
        assert_eq!(reopened.completed_ids().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn corrupted_state_starts_empty_and_is_removed() {
        let storage = Arc::new(InMemoryStorage::new().with_item(PROGRESS_STORAGE_KEY, "{oops"));
        let tracker = CompletionTracker::open(storage.clone()).await;
        assert_eq!(tracker.completed_count(), 0);
        assert_eq!(storage.peek(PROGRESS_STORAGE_KEY), None);
    }

    #[tokio::test]
    async fn failed_read_keeps_the_stored_set() {
        let storage = Arc::new(InMemoryStorage::new().with_item(PROGRESS_STORAGE_KEY, "[5,8]"));
        storage.set_fail_reads(true);
        let mut tracker = CompletionTracker::open(storage.clone()).await;
        storage.set_fail_reads(false);

        assert!(!tracker.is_persisting());
        assert!(tracker.toggle(1));
        assert!(tracker.is_completed(1));
        tracker.flush().await;

        assert_eq!(storage.peek(PROGRESS_STORAGE_KEY).as_deref(), Some("[5,8]"));
        assert_eq!(storage.write_count(), 0);
    }
}
