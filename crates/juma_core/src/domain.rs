//! crates/juma_core/src/domain.rs
//!
//! Defines the core data structures for the sermon library.
//! Field names on the wire follow the persisted collection format, so a
//! collection written by an earlier session deserializes unchanged.

use serde::{Deserialize, Serialize};

/// Unique sermon identifier. Seed sermons use small integers, generated
/// sermons use a millisecond timestamp.
pub type SermonId = i64;

/// A surah number, 1..=114 for valid references.
pub type SurahNumber = u16;

/// One complete Friday sermon: a first khutbah built around verses and a
/// second khutbah built around a hadith.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonDocument {
    pub id: SermonId,
    pub surah_number: SurahNumber,
    /// Mushaf page the sermon starts on; `0` means not applicable.
    #[serde(default)]
    pub page_number: u32,
    pub title: String,
    /// Verse-range label, e.g. `الفاتحة: ١-٧`.
    pub verses: String,
    #[serde(rename = "khutbah1")]
    pub primary: PrimarySection,
    #[serde(rename = "khutbah2")]
    pub secondary: SecondarySection,
}

impl SermonDocument {
    /// The page number, or `None` when it does not apply.
    pub fn page(&self) -> Option<u32> {
        (self.page_number != 0).then_some(self.page_number)
    }
}

/// The first khutbah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimarySection {
    pub title: String,
    /// Full text of the verses the khutbah is built on.
    pub verses: String,
    pub tafsir: String,
    pub reflections: String,
    pub messages: Vec<KhutbahMessage>,
    /// Closing call to repentance.
    pub repentance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KhutbahMessage {
    pub message: String,
    pub explanation: String,
}

/// The second khutbah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondarySection {
    pub hadith: Hadith,
    pub hadith_reflection: String,
    /// Closing supplication.
    pub dua: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hadith {
    pub text: String,
    /// Authenticity grading, e.g. `متفق عليه`.
    pub authenticity: String,
}

/// Sermon content as produced by the generation service: everything except
/// the identity, the surah and the page, which the caller supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSermonContent {
    pub title: String,
    pub verses: String,
    #[serde(rename = "khutbah1")]
    pub primary: PrimarySection,
    #[serde(rename = "khutbah2")]
    pub secondary: SecondarySection,
}

impl GeneratedSermonContent {
    /// Attaches identity to generated content. Generated sermons have no page.
    pub fn into_document(self, id: SermonId, surah_number: SurahNumber) -> SermonDocument {
        SermonDocument {
            id,
            surah_number,
            page_number: 0,
            title: self.title,
            verses: self.verses,
            primary: self.primary,
            secondary: self.secondary,
        }
    }
}

/// Parameters of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub surah_number: SurahNumber,
    /// Optional focus, e.g. a passage of the surah. Never blank when `Some`.
    pub topic: Option<String>,
}

impl GenerationRequest {
    pub fn new(surah_number: SurahNumber, topic: Option<&str>) -> Self {
        let topic = topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { surah_number, topic }
    }
}

/// Completion metrics derived from the completed set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionProgress {
    pub count: usize,
    pub total: usize,
    /// `count / total`, or `0.0` for an empty collection.
    pub ratio: f64,
}
