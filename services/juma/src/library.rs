//! services/juma/src/library.rs
//!
//! The session object a presentation layer drives.
//!
//! `SermonLibrary` owns the three persisted stores, the generator, and the
//! view state (surah filter, query, selection). The projection is recomputed
//! from the current inputs on every call.

use chrono::Utc;
use juma_core::{
    completion::CompletionTracker,
    credential::CredentialStore,
    domain::{CompletionProgress, GenerationRequest, SermonDocument, SermonId, SurahNumber},
    ports::{DurableStorage, GenerationError, SermonGenerationService},
    projection::ProjectionFilter,
    reference::surah_name,
    store::CollectionStore,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Heading shown when no surah is selected.
pub const ALL_SERMONS_HEADING: &str = "كل الخطب";

/// Produces candidate ids for generated sermons.
pub type IdSource = Box<dyn Fn() -> SermonId + Send + Sync>;

/// What the presentation layer should render.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryView<'a> {
    List(Vec<&'a SermonDocument>),
    Detail(&'a SermonDocument),
}

pub struct SermonLibrary {
    store: CollectionStore,
    completion: CompletionTracker,
    credentials: CredentialStore,
    generator: Arc<dyn SermonGenerationService>,
    fallback_credential: Option<String>,
    id_source: IdSource,
    filter: ProjectionFilter,
    selected: Option<SermonId>,
    last_error: Option<GenerationError>,
}

impl SermonLibrary {
    /// Loads the collection, the completion state and the stored credential.
    /// Never fails: unusable records fall back to their defaults.
    pub async fn open(
        storage: Arc<dyn DurableStorage>,
        generator: Arc<dyn SermonGenerationService>,
        fallback_credential: Option<String>,
    ) -> Self {
        let store = CollectionStore::open(storage.clone()).await;
        let completion = CompletionTracker::open(storage.clone()).await;
        let credentials = CredentialStore::open(storage).await;
        info!(sermons = store.len(), "Sermon library opened");

        Self {
            store,
            completion,
            credentials,
            generator,
            fallback_credential,
            id_source: Box::new(|| Utc::now().timestamp_millis()),
            filter: ProjectionFilter::default(),
            selected: None,
            last_error: None,
        }
    }

    /// Replaces the clock used to mint ids for generated sermons.
    pub fn with_id_source<F>(mut self, source: F) -> Self
    where
        F: Fn() -> SermonId + Send + Sync + 'static,
    {
        self.id_source = Box::new(source);
        self
    }

    // --- Collection ---

    pub fn documents(&self) -> &[SermonDocument] {
        self.store.documents()
    }

    pub fn get(&self, id: SermonId) -> Option<&SermonDocument> {
        self.store.get(id)
    }

    /// `false` when storage could not be read at startup and changes to the
    /// sermons or the completion state stay in memory.
    pub fn is_persisting(&self) -> bool {
        self.store.is_persisting() && self.completion.is_persisting()
    }

    // --- View state ---

    pub fn surah_filter(&self) -> Option<SurahNumber> {
        self.filter.surah
    }

    /// Sets the surah facet (`None` is "all") and returns to the list.
    pub fn set_surah_filter(&mut self, surah: Option<SurahNumber>) {
        self.filter.surah = surah;
        self.selected = None;
    }

    pub fn query(&self) -> &str {
        &self.filter.query
    }

    /// Sets the free-text query. A non-blank query returns to the list so
    /// the results are visible.
    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
        if !query.trim().is_empty() {
            self.selected = None;
        }
    }

    /// Opens a sermon. Unknown ids are ignored and `false` is returned.
    pub fn select(&mut self, id: SermonId) -> bool {
        if self.store.contains(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn back_to_list(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&SermonDocument> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// The filtered, newest-first list for the current inputs.
    pub fn projection(&self) -> Vec<&SermonDocument> {
        self.filter.apply(self.store.documents())
    }

    pub fn view(&self) -> LibraryView<'_> {
        match self.selected() {
            Some(sermon) => LibraryView::Detail(sermon),
            None => LibraryView::List(self.projection()),
        }
    }

    /// The page heading: the open sermon's surah, else the filtered surah,
    /// else the "all sermons" label.
    pub fn heading(&self) -> &'static str {
        if let Some(sermon) = self.selected() {
            return surah_name(sermon.surah_number);
        }
        match self.filter.surah {
            Some(surah) => surah_name(surah),
            None => ALL_SERMONS_HEADING,
        }
    }

    // --- Completion ---

    pub fn toggle_completed(&mut self, id: SermonId) -> bool {
        self.completion.toggle(id)
    }

    pub fn is_completed(&self, id: SermonId) -> bool {
        self.completion.is_completed(id)
    }

    pub fn progress(&self) -> CompletionProgress {
        self.completion.progress(self.store.len())
    }

    // --- Credential ---

    pub fn set_credential(&mut self, credential: &str) {
        self.credentials.set_credential(credential);
    }

    pub fn has_credential(&self) -> bool {
        self.effective_credential().is_some()
    }

    fn effective_credential(&self) -> Option<&str> {
        self.credentials.resolve(self.fallback_credential.as_deref())
    }

    // --- Generation ---

    /// The error of the most recent failed generation, cleared when the next
    /// one starts.
    pub fn last_error(&self) -> Option<&GenerationError> {
        self.last_error.as_ref()
    }

    /// Generates a sermon for `surah`, merges it at the front of the
    /// collection and opens it.
    ///
    /// On failure the collection is untouched and the error is kept in
    /// `last_error`. There is no retry. Taking `&mut self` means a second
    /// generation cannot start while one is outstanding.
    pub async fn generate(
        &mut self,
        surah: SurahNumber,
        topic: Option<&str>,
    ) -> Result<SermonId, GenerationError> {
        self.last_error = None;
        let result = self.try_generate(surah, topic).await;
        if let Err(e) = &result {
            warn!(surah, kind = ?e.kind(), "Sermon generation failed: {}", e);
            self.last_error = Some(e.clone());
        }
        result
    }

    async fn try_generate(
        &mut self,
        surah: SurahNumber,
        topic: Option<&str>,
    ) -> Result<SermonId, GenerationError> {
        let credential = self
            .effective_credential()
            .ok_or(GenerationError::CredentialMissing)?
            .to_string();

        let request = GenerationRequest::new(surah, topic);
        let content = self.generator.generate_sermon(&credential, &request).await?;

        let id = self.store.fresh_id((self.id_source)());
        let document = content.into_document(id, surah);
        if let Err(e) = self.store.merge(document) {
            error!("Generated sermon could not be merged: {}", e);
            return Err(GenerationError::Transport(e.to_string()));
        }

        self.selected = Some(id);
        info!(id, surah, "Generated sermon added to the library");
        Ok(id)
    }

    /// Waits until every scheduled write has been attempted.
    pub async fn flush(&self) {
        futures::join!(
            self.store.flush(),
            self.completion.flush(),
            self.credentials.flush()
        );
    }
}
