//! crates/juma_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the boundary of the core.
//! The core only talks to durable storage and to the sermon generator
//! through these traits, so it stays independent of SQLite or any LLM API.

use crate::domain::{GeneratedSermonContent, GenerationRequest, SermonId};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for storage-side port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Sermon {0} already exists in the collection")]
    Conflict(SermonId),
    #[error("Storage unavailable: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Generation Errors
//=========================================================================================

/// The classification of a failed generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    CredentialMissing,
    CredentialInvalid,
    MalformedResponse,
    Transport,
}

/// Why a generation attempt failed. Every variant is terminal for the attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("No API credential is configured")]
    CredentialMissing,
    #[error("The provider rejected the API credential: {0}")]
    CredentialInvalid(String),
    #[error("Malformed response from the provider: {0}")]
    MalformedResponse(String),
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::CredentialMissing => GenerationErrorKind::CredentialMissing,
            Self::CredentialInvalid(_) => GenerationErrorKind::CredentialInvalid,
            Self::MalformedResponse(_) => GenerationErrorKind::MalformedResponse,
            Self::Transport(_) => GenerationErrorKind::Transport,
        }
    }

    /// The actionable message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::CredentialMissing => {
                "الرجاء إدخال مفتاح API في الشريط العلوي للمتابعة.".to_string()
            }
            Self::CredentialInvalid(_) => {
                "فشل التحقق من مفتاح API. يرجى التأكد من صحة المفتاح وأنه فعال.".to_string()
            }
            Self::MalformedResponse(detail) => format!(
                "فشل إنشاء الخطبة بسبب خطأ في تنسيق الرد من الخادم. نرجو المحاولة مرة أخرى. (تفاصيل الخطأ: {detail})"
            ),
            Self::Transport(_) => {
                "فشل إنشاء الخطبة. قد تكون هناك مشكلة في الشبكة أو في الرد من الخادم. يرجى المحاولة مرة أخرى."
                    .to_string()
            }
        }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string-keyed blob store shaped like browser local storage.
#[async_trait]
pub trait DurableStorage: Send + Sync {
    /// Reads a record. `Ok(None)` means the record was never written.
    async fn get_item(&self, key: &str) -> PortResult<Option<String>>;

    /// Writes a record, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> PortResult<()>;

    async fn remove_item(&self, key: &str) -> PortResult<()>;
}

#[async_trait]
pub trait SermonGenerationService: Send + Sync {
    /// Generates a complete sermon for the requested surah.
    ///
    /// Implementations validate the provider payload before returning, so
    /// `Ok` always carries structurally complete content.
    async fn generate_sermon(
        &self,
        credential: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedSermonContent, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_carries_detail() {
        let err = GenerationError::MalformedResponse("missing field `dua`".into());
        assert_eq!(err.kind(), GenerationErrorKind::MalformedResponse);
        assert!(err.user_message().contains("missing field `dua`"));
    }

    #[test]
    fn each_kind_has_a_distinct_message() {
        let messages = [
            GenerationError::CredentialMissing.user_message(),
            GenerationError::CredentialInvalid("x".into()).user_message(),
            GenerationError::MalformedResponse("x".into()).user_message(),
            GenerationError::Transport("x".into()).user_message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
