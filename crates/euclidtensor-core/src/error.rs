//! Error types for euclidtensor-core.

use euclidtensor_index::IndexError;
use thiserror::Error;

/// Errors raised by the symbolic tensor algebra ([`crate::TensorProduct`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TensorAlgebraError {
    /// A tensor head was called with the wrong number of indices.
    #[error("Tensor {head} expects {expected} indices, got {actual}")]
    SlotCountMismatch {
        head: String,
        expected: usize,
        actual: usize,
    },

    /// An index does not live in the space its slot or partner requires.
    #[error("Index space mismatch for index {index}: expected {expected}, got {actual}")]
    IndexTypeMismatch {
        index: String,
        expected: String,
        actual: String,
    },

    /// The same index name appears twice with the same orientation.
    #[error("Repeated index {index}: both occurrences have the same orientation")]
    RepeatedIndex { index: String },

    /// An index name appears more than twice.
    #[error("Index {index} appears {count} times; at most two occurrences are allowed")]
    TooManyOccurrences { index: String, count: usize },

    /// Invalid index or head name.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors raised by the Euclidean normalizer itself.
///
/// Only produced under [`crate::DegeneratePolicy::Reject`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EuclideanError {
    /// A base name occurs more than twice across the operands.
    #[error("Ambiguous contraction: index {key} occurs {count} times across the operands")]
    AmbiguousContraction { key: String, count: usize },
}
