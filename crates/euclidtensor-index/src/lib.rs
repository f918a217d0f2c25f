//! Oriented tensor indices.
//!
//! Index names, index types (spaces), up/down orientation, and the
//! [`IndexLike`] abstraction used by the Euclidean normalizer in
//! `euclidtensor-core`.

pub mod index;
pub mod index_like;
pub mod index_ops;
pub mod name;

pub use index::{tensor_indices, IndexError, IndexType, TensorIndex};
pub use index_like::{IndexLike, Orientation};
pub use index_ops::{group_by_key, KeyGroup, Occurrence};
pub use name::{IndexName, IndexNameError, MAX_NAME_LEN};
