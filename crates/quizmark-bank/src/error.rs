//! Normalization error types.
//!
//! Typed per-document failures, so the bank loader can classify what went
//! wrong with a question without string matching. File-level I/O and JSON
//! failures propagate as `anyhow::Error` instead.

use thiserror::Error;

/// Errors raised while normalizing a raw question document.
#[derive(Debug, Error)]
pub enum BankError {
    /// The document declares a question kind this system does not know.
    #[error("unknown question kind: {0}")]
    UnknownKind(String),

    /// A field required for the resolved kind is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A choice question must offer at least one option.
    #[error("option count must be at least 1, got {0}")]
    InvalidOptionCount(i64),

    /// An answer index falls outside `[0, option_count)` after base shifting.
    #[error("answer index {index} out of range for {option_count} options")]
    IndexOutOfRange { index: i64, option_count: usize },

    /// A multi-choice document with no correct indices.
    #[error("multi-choice question has an empty correct set")]
    EmptyCorrectSet,

    /// A numeric answer or submission that does not parse to a finite value.
    #[error("cannot parse numeric value from {0:?}")]
    UnparsableNumber(String),

    /// An acceptance range with min above max.
    #[error("numeric range is inverted: min {min} > max {max}")]
    InvertedRange { min: f64, max: f64 },
}

impl BankError {
    /// Returns `true` if the failure is in the answer payload itself, as
    /// opposed to the document's structure (kind/fields).
    pub fn is_answer_error(&self) -> bool {
        matches!(
            self,
            BankError::IndexOutOfRange { .. }
                | BankError::EmptyCorrectSet
                | BankError::UnparsableNumber(_)
                | BankError::InvertedRange { .. }
        )
    }
}
