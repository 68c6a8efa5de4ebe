/// GridView Error Taxonomy
///
/// Every command-level failure is local and recoverable: bad input is
/// rejected with one of these variants and the engine state is left exactly
/// as it was. Nothing here is fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// Page sizes must be greater than zero.
    #[error("invalid page size {size}: must be greater than zero")]
    InvalidPageSize { size: usize },

    /// Pages are numbered from 1; anything above `total_pages` merely
    /// clamps, but 0 is outside the domain.
    #[error("invalid page {page}: pages are numbered from 1")]
    InvalidPage { page: usize },

    /// A sort referenced a column key absent from the configured sequence.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// `record_by_id` found no record with the requested id.
    #[error("no record with id '{id}'")]
    RecordNotFound { id: String },

    /// Raw records supplied as JSON failed to parse.
    #[error("invalid records JSON: {0}")]
    Json(#[from] serde_json::Error),
}
