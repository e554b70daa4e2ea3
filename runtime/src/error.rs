//! Errors raised by the async runtime.

use thiserror::Error;

/// Errors raised while setting up a store. Load failures are not errors at
/// this level; they are reported through `LoadOutcome`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
