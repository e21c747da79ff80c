//! Test Utilities Crate
//!
//! Shared test infrastructure for the contact directory test suite.
//!
//! # Modules
//!
//! - `fixtures`: deterministic identifiers and temp-dir-backed stores
//! - `builders`: builder patterns for raw persisted records
//! - `assertions`: domain assertion helpers

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

use once_cell::sync::Lazy;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
});

/// Initializes a test tracing subscriber once per process
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
