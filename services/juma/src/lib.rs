pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod library;
pub mod telemetry;

pub use bootstrap::open_library;
pub use config::Config;
pub use error::AppError;
pub use library::{LibraryView, SermonLibrary};
