pub mod completion;
pub mod credential;
pub mod domain;
pub mod memory;
pub mod persistence;
pub mod ports;
pub mod projection;
pub mod reference;
pub mod seed;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use completion::CompletionTracker;
pub use credential::CredentialStore;
pub use domain::{
    CompletionProgress, GeneratedSermonContent, GenerationRequest, Hadith, KhutbahMessage,
    PrimarySection, SecondarySection, SermonDocument, SermonId, SurahNumber,
};
pub use memory::InMemoryStorage;
pub use ports::{
    DurableStorage, GenerationError, GenerationErrorKind, PortError, PortResult,
    SermonGenerationService,
};
pub use projection::{project, ProjectionFilter};
pub use store::{CollectionStore, LoadSource};
pub use validation::parse_generated_content;
