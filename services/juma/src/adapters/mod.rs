pub mod sermon_llm;
pub mod storage_db;

pub use sermon_llm::GeminiSermonAdapter;
pub use storage_db::SqliteStorageAdapter;
