//! services/juma/src/telemetry.rs
//!
//! Logging setup for hosts embedding the library.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global `fmt` subscriber filtered at `level`.
///
/// Returns `false` if a global subscriber was already installed, which
/// happens when several tests or hosts initialise logging.
pub fn init_tracing(level: Level) -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
