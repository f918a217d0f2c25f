//! TensorExpr trait: the algebra the Euclidean normalizer orchestrates.
//!
//! The normalizer never looks inside an expression. It only needs to read the
//! indices, substitute some of them, multiply, and produce the unit.

use anyhow::Result;
use euclidtensor_index::IndexLike;
use std::fmt::Debug;

/// Trait for tensor-valued expressions with oriented indices.
///
/// Implemented by [`crate::TensorProduct`]; any symbolic or numeric tensor
/// type can implement it to be used with [`crate::combine`].
///
/// All methods take `&self` and must leave the receiver unmodified.
/// Errors are returned as `anyhow::Error` and passed through by the
/// normalizer untouched, so callers can `downcast_ref` to the implementor's
/// own error type.
pub trait TensorExpr: Sized + Clone + Debug + Send + Sync {
    /// The index type used by this expression.
    type Index: IndexLike;

    /// Return all indices of this expression.
    ///
    /// # Ordering
    ///
    /// The ordering MUST be stable: the same expression yields the same list
    /// on every call.
    fn external_indices(&self) -> Result<Vec<Self::Index>>;

    /// Number of indices.
    ///
    /// Default implementation calls `external_indices().len()`.
    fn num_external_indices(&self) -> Result<usize> {
        Ok(self.external_indices()?.len())
    }

    /// Replace indices using pairs of (old, new).
    ///
    /// Every index equal to some `old` is replaced by the matching `new`;
    /// all other indices are carried over unchanged. Matching is by full
    /// index value, not position: if `old` sits in two slots, both change.
    ///
    /// # Returns
    ///
    /// A new expression with the indices replaced.
    fn replaceinds_pairs(&self, pairs: &[(Self::Index, Self::Index)]) -> Result<Self>;

    /// Replace a single index.
    fn replaceind(&self, old_index: &Self::Index, new_index: &Self::Index) -> Result<Self> {
        self.replaceinds_pairs(&[(old_index.clone(), new_index.clone())])
    }

    /// Multiply two expressions.
    fn product(&self, other: &Self) -> Result<Self>;

    /// The multiplicative identity: a scalar with no indices.
    fn one() -> Self;
}
