//! crates/juma_core/src/credential.rs
//!
//! The user-supplied API key for the generation service.

use crate::persistence::Persister;
use crate::ports::DurableStorage;
use std::sync::Arc;
use tracing::error;

/// Storage key of the raw credential string.
pub const CREDENTIAL_STORAGE_KEY: &str = "gemini_api_key";

#[derive(Debug)]
pub struct CredentialStore {
    credential: Option<String>,
    persister: Persister,
}

impl CredentialStore {
    pub async fn open(storage: Arc<dyn DurableStorage>) -> Self {
        let credential = match storage.get_item(CREDENTIAL_STORAGE_KEY).await {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                error!("Failed to load the stored API key: {}", e);
                None
            }
        };
        Self {
            credential,
            persister: Persister::spawn(storage, CREDENTIAL_STORAGE_KEY),
        }
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Stores a new key. A blank key clears the stored one.
    pub fn set_credential(&mut self, credential: &str) {
        let credential = credential.trim();
        if credential.is_empty() {
            self.credential = None;
            self.persister.remove();
        } else {
            self.credential = Some(credential.to_string());
            self.persister.persist(credential.to_string());
        }
    }

    /// The stored key if there is one, otherwise `fallback`.
    pub fn resolve<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        self.credential()
            .or_else(|| fallback.filter(|f| !f.trim().is_empty()))
    }

    pub async fn flush(&self) {
        self.persister.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStorage;

    #[tokio::test]
    async fn stored_key_takes_precedence() {
        let storage = Arc::new(InMemoryStorage::new().with_item(CREDENTIAL_STORAGE_KEY, "stored"));
        let store = CredentialStore::open(storage).await;
        assert_eq!(store.resolve(Some("env")), Some("stored"));
    }

    #[tokio::test]
    async fn fallback_used_when_nothing_stored() {
        let storage = Arc::new(InMemoryStorage::new());
        let store = CredentialStore::open(storage).await;
        assert_eq!(store.resolve(Some("env")), Some("env"));
        assert_eq!(store.resolve(Some("  ")), None);
        assert_eq!(store.resolve(None), None);
    }

    #[tokio::test]
    async fn set_and_clear_persist() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut store = CredentialStore::open(storage.clone()).await;

        store.set_credential("  new-key ");
        store.flush().await;
        assert_eq!(store.credential(), Some("new-key"));
        assert_eq!(storage.peek(CREDENTIAL_STORAGE_KEY).as_deref(), Some("new-key"));

        store.set_credential("");
        store.flush().await;
        assert_eq!(store.credential(), None);
        assert_eq!(storage.peek(CREDENTIAL_STORAGE_KEY), None);
    }
}
