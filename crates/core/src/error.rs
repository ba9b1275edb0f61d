//! Error types for the statistics engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised by the statistics engine.
///
/// Every variant describes a broken precondition on the caller's side. An
/// empty look-back window is not an error and never produces one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Two index-aligned sequences did not have the same length.
    #[error("{context}: length mismatch ({left} vs {right})")]
    LengthMismatch {
        /// Operation that detected the mismatch.
        context: &'static str,
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// The sequence is too short to provide the requested look-back and domain.
    #[error("insufficient history: need {required} entries, have {available}")]
    InsufficientHistory {
        /// Entries needed for the requested window and domain.
        required: usize,
        /// Entries actually supplied.
        available: usize,
    },

    /// A window parameter was zero.
    #[error("invalid window parameter: {0}")]
    InvalidWindow(String),

    /// Heights were not in non-decreasing order.
    #[error("heights out of order at index {index}: {previous} followed by {current}")]
    UnorderedHeights {
        /// Position of the offending record.
        index: usize,
        /// Height of the record before it.
        previous: i64,
        /// Height of the offending record.
        current: i64,
    },

    /// A mining algorithm tag could not be recognised.
    #[error("unknown mining algorithm '{0}'")]
    UnknownAlgo(String),
}

impl StatsError {
    /// Helper for creating a length mismatch error.
    pub fn length_mismatch(context: &'static str, left: usize, right: usize) -> Self {
        Self::LengthMismatch {
            context,
            left,
            right,
        }
    }

    /// Helper for creating an invalid window error with a message.
    pub fn invalid_window(message: impl Into<String>) -> Self {
        Self::InvalidWindow(message.into())
    }
}

/// Fails fast when two index-aligned sequences differ in length.
pub(crate) fn ensure_aligned(context: &'static str, left: usize, right: usize) -> StatsResult<()> {
    if left != right {
        return Err(StatsError::length_mismatch(context, left, right));
    }
    Ok(())
}
