//! crates/juma_core/src/store.rs
//!
//! The canonical, persisted sermon collection.
//!
//! The in-memory list is authoritative for the session. Every mutation
//! schedules a write of the whole collection; storage failures on either
//! side are logged and never surface to the caller.

use crate::domain::{SermonDocument, SermonId};
use crate::persistence::Persister;
use crate::ports::{DurableStorage, PortError, PortResult};
use crate::seed::seed_collection;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Storage key of the serialized collection.
pub const SERMONS_STORAGE_KEY: &str = "juma_sermons_data_v1";

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    /// No usable record existed; the seed was used.
    Seeded,
    /// Storage could not be read; the seed was used, and the stored record
    /// may still hold a real collection.
    ReadFailed,
}

/// In-memory sermon collection backed by a durable record.
///
/// After a failed read the store stops writing for the session, so a
/// fallback collection never replaces a stored one it could not see.
#[derive(Debug)]
pub struct CollectionStore {
    documents: Vec<SermonDocument>,
    persister: Persister,
    persisting: bool,
}

impl CollectionStore {
    /// Reads the persisted collection, falling back to the seed collection.
    ///
    /// A missing record, a failed read and an unparseable record all yield
    /// the seed. An unparseable record is also removed.
    pub async fn load(storage: &dyn DurableStorage) -> Vec<SermonDocument> {
        Self::load_with_source(storage).await.0
    }

    /// Like `load`, also reporting where the collection came from.
    pub async fn load_with_source(
        storage: &dyn DurableStorage,
    ) -> (Vec<SermonDocument>, LoadSource) {
        let raw = match storage.get_item(SERMONS_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No persisted sermons found; using the seed collection");
                return (seed_collection(), LoadSource::Seeded);
            }
            Err(e) => {
                error!("Failed to load sermons from storage: {}", e);
                return (seed_collection(), LoadSource::ReadFailed);
            }
        };

        match serde_json::from_str::<Vec<SermonDocument>>(&raw) {
            Ok(documents) => {
                info!(count = documents.len(), "Loaded persisted sermons");
                (documents, LoadSource::Persisted)
            }
            Err(e) => {
                error!("Persisted sermons are corrupted, discarding them: {}", e);
                if let Err(e) = storage.remove_item(SERMONS_STORAGE_KEY).await {
                    warn!("Failed to remove corrupted sermons record: {}", e);
                }
                (seed_collection(), LoadSource::Seeded)
            }
        }
    }

    /// Loads the collection and starts its background writer. The loaded
    /// collection is written back straight away, so a seeded first session
    /// leaves a persisted record behind. Nothing is written after a failed
    /// read.
    pub async fn open(storage: Arc<dyn DurableStorage>) -> Self {
        let (documents, source) = Self::load_with_source(storage.as_ref()).await;
        let persisting = source != LoadSource::ReadFailed;
        if !persisting {
            warn!("Sermon changes will not be saved this session");
        }
        let store = Self {
            documents,
            persister: Persister::spawn(storage, SERMONS_STORAGE_KEY),
            persisting,
        };
        store.schedule_write();
        store
    }

    /// `false` once a failed read has detached the store from storage.
    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    pub fn documents(&self) -> &[SermonDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: SermonId) -> Option<&SermonDocument> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: SermonId) -> bool {
        self.get(id).is_some()
    }

    /// The smallest id at or above `candidate` that is not yet taken.
    pub fn fresh_id(&self, candidate: SermonId) -> SermonId {
        let mut id = candidate;
        while self.contains(id) {
            id += 1;
        }
        id
    }

    /// Swaps in a whole new collection and schedules its write.
    pub fn replace(&mut self, documents: Vec<SermonDocument>) {
        self.documents = documents;
        self.schedule_write();
    }

    /// Prepends a sermon and schedules a write.
    ///
    /// Fails with `PortError::Conflict` if the id is already present, in
    /// which case the collection is untouched.
    pub fn merge(&mut self, document: SermonDocument) -> PortResult<()> {
        if self.contains(document.id) {
            return Err(PortError::Conflict(document.id));
        }
        info!(id = document.id, surah = document.surah_number, "Merging sermon");
        self.documents.insert(0, document);
        self.schedule_write();
        Ok(())
    }

    /// Waits for all scheduled writes to be attempted.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    fn schedule_write(&self) {
        if !self.persisting {
            return;
        }
        match serde_json::to_string(&self.documents) {
            Ok(json) => self.persister.persist(json),
            Err(e) => error!("Failed to serialize sermons: {}", e),
        }
    }
}
