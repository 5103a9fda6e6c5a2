//! crates/juma_core/src/seed.rs
//!
//! The bundled default collection, used whenever no usable persisted
//! collection exists.

use crate::domain::SermonDocument;
use tracing::error;

const SEED_JSON: &str = include_str!("../seed/sermons.json");

/// Parses the bundled seed sermons.
///
/// The seed ships inside the binary, so a parse failure is a build defect;
/// it is logged and an empty collection is returned rather than failing the
/// caller.
pub fn seed_collection() -> Vec<SermonDocument> {
    match serde_json::from_str(SEED_JSON) {
        Ok(sermons) => sermons,
        Err(e) => {
            error!("Bundled seed collection failed to parse: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_parses_with_unique_ids() {
        let seed = seed_collection();
        assert_eq!(seed.len(), 3);

        let ids: HashSet<_> = seed.iter().map(|s| s.id).collect();
        assert_eq!(ids, HashSet::from([1, 2, 3]));

        let surahs: Vec<_> = seed.iter().map(|s| s.surah_number).collect();
        assert_eq!(surahs, vec![1, 1, 2]);
        assert!(seed.iter().all(|s| s.primary.messages.len() >= 3));
    }
}
