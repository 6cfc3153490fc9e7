//! Error types for the recommendation engine.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by recommendation queries.
///
/// Degenerate text is never an error: empty fields and empty corpora
/// score 0.0 instead. Only an unknown selected record or an invalid
/// query argument fails.
#[derive(Error, Debug)]
pub enum Error {
    /// The selected record id is not in the dataset snapshot
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Requested result count must be at least 1
    #[error("Invalid limit: {0} (must be at least 1)")]
    InvalidLimit(usize),

    /// Field weights failed the opt-in sanity check
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}
