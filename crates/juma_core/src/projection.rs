//! crates/juma_core/src/projection.rs
//!
//! The filtered, sorted view of the collection: a pure function of the
//! collection, the surah filter and the free-text query.

use crate::domain::{SermonDocument, SurahNumber};
use crate::reference::surah_name;

/// The two user inputs that drive the projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionFilter {
    pub surah: Option<SurahNumber>,
    pub query: String,
}

impl ProjectionFilter {
    pub fn apply<'a>(&self, collection: &'a [SermonDocument]) -> Vec<&'a SermonDocument> {
        project(collection, self.surah, &self.query)
    }
}

/// Trims and case-folds a query. An empty result disables text filtering.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Concatenates every searchable field of a sermon, space separated and
/// case-folded, ending with the resolved surah name.
pub fn search_blob(doc: &SermonDocument) -> String {
    let primary = &doc.primary;
    let secondary = &doc.secondary;

    let mut parts: Vec<&str> = vec![
        doc.title.as_str(),
        doc.verses.as_str(),
        primary.title.as_str(),
        primary.verses.as_str(),
        primary.tafsir.as_str(),
        primary.reflections.as_str(),
        primary.repentance.as_str(),
    ];
    for msg in &primary.messages {
        parts.push(&msg.message);
        parts.push(&msg.explanation);
    }
    parts.push(&secondary.hadith.text);
    parts.push(&secondary.hadith_reflection);
    parts.push(&secondary.dua);
    parts.push(surah_name(doc.surah_number));

    parts.join(" ").to_lowercase()
}

/// Projects the collection: surah filter first, then substring match of the
/// normalized query against each sermon's search blob, newest id first.
pub fn project<'a>(
    collection: &'a [SermonDocument],
    surah: Option<SurahNumber>,
    query: &str,
) -> Vec<&'a SermonDocument> {
    let needle = normalize_query(query);

    let mut result: Vec<&SermonDocument> = collection
        .iter()
        .filter(|doc| surah.map_or(true, |s| doc.surah_number == s))
        .filter(|doc| needle.is_empty() || search_blob(doc).contains(&needle))
        .collect();

    result.sort_by(|a, b| b.id.cmp(&a.id));
    result
}
