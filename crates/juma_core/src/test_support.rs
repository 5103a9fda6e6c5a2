//! Builders shared by the unit tests of this crate.

use crate::domain::{
    Hadith, KhutbahMessage, PrimarySection, SecondarySection, SermonDocument, SermonId,
    SurahNumber,
};

/// A complete sermon whose only distinguishing text is `title`.
pub fn sermon(id: SermonId, surah_number: SurahNumber, title: &str) -> SermonDocument {
    SermonDocument {
        id,
        surah_number,
        page_number: 0,
        title: title.to_string(),
        verses: format!("{id}"),
        primary: PrimarySection {
            title: "first".into(),
            verses: "verse text".into(),
            tafsir: "commentary".into(),
            reflections: "reflections".into(),
            messages: vec![
                KhutbahMessage {
                    message: "message one".into(),
                    explanation: "explanation one".into(),
                },
                KhutbahMessage {
                    message: "message two".into(),
                    explanation: "explanation two".into(),
                },
                KhutbahMessage {
                    message: "message three".into(),
                    explanation: "explanation three".into(),
                },
            ],
            repentance: "repentance".into(),
        },
        secondary: SecondarySection {
            hadith: Hadith {
                text: "hadith text".into(),
                authenticity: "sahih".into(),
            },
            hadith_reflection: "hadith reflection".into(),
            dua: "dua".into(),
        },
    }
}
