//! Error types of the analysis pipeline.

use thiserror::Error;

/// Errors raised while analyzing a pattern against a variant.
///
/// None of these describe bad input: a variant that simply does not match is
/// reported as `Ok(None)` by [`crate::Analyzer::analyze`]. An `AnalysisError`
/// always points at a bug in the pipeline itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A pooled record was read before `set()` was called on it
    #[error("value not present: {record}.{field}")]
    ValueNotPresent {
        /// Name of the record type
        record: &'static str,
        /// Name of the unset field
        field: &'static str,
    },
    /// An internal invariant of the pipeline does not hold
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl AnalysisError {
    pub(crate) fn not_present(record: &'static str, field: &'static str) -> Self {
        Self::ValueNotPresent { record, field }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;
