//! IndexLike trait for abstracting oriented index types.
//!
//! Algorithms such as the Euclidean normalizer only need to know which
//! indices share a name and how each one is oriented. This trait captures
//! exactly that, so they can stay generic over the concrete index type.

use std::fmt::Debug;
use std::hash::Hash;

/// Orientation of an index.
///
/// - `Up`: contravariant (upper) index
/// - `Down`: covariant (lower) index
///
/// A contraction pairs one `Up` with one `Down` occurrence of the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Contravariant (upper) index.
    Up,
    /// Covariant (lower) index.
    Down,
}

impl Orientation {
    /// The opposite orientation.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Orientation::Up => Orientation::Down,
            Orientation::Down => Orientation::Up,
        }
    }

    /// Whether this is the upper orientation.
    pub fn is_up(self) -> bool {
        self == Orientation::Up
    }
}

/// Trait for index-like types that carry an orientation.
///
/// # Key Properties
///
/// - **`Key`**: orientation-insensitive identity ("base name"). Two
///   occurrences with the same key are candidates for contraction.
/// - **`Eq`/`Hash`**: full object equality, including orientation. An index
///   and its flipped counterpart are *not* equal.
/// - **`flip()`**: same key, opposite orientation.
///
/// # Example
///
/// ```
/// use euclidtensor_index::{IndexLike, IndexType, Orientation, TensorIndex};
///
/// let x = IndexType::new("X").unwrap();
/// let i = TensorIndex::up("i", &x).unwrap();
/// let i_down = i.flip();
///
/// assert!(i.same_key(&i_down));
/// assert_ne!(i, i_down);
/// assert_eq!(i_down.orientation(), Orientation::Down);
/// assert!(i.is_contractable(&i_down));
/// ```
pub trait IndexLike: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Orientation-insensitive identifier used for grouping occurrences.
    type Key: Clone + Eq + Hash + Debug + std::fmt::Display + Send + Sync;

    /// Get the key of this index.
    fn key(&self) -> &Self::Key;

    /// Get the orientation of this index.
    fn orientation(&self) -> Orientation;

    /// Create a new index with the same key and the opposite orientation.
    #[must_use]
    fn flip(&self) -> Self;

    /// Check whether this index forms a valid contraction pair with `other`.
    ///
    /// The default implementation requires the same key and opposite
    /// orientations. Implementations may add further checks (e.g. index type).
    fn is_contractable(&self, other: &Self) -> bool {
        self.key() == other.key() && self.orientation() != other.orientation()
    }

    /// Check if this index has the same key as another.
    fn same_key(&self, other: &Self) -> bool {
        self.key() == other.key()
    }

    /// Check if this index has the given key.
    fn has_key(&self, key: &Self::Key) -> bool {
        self.key() == key
    }

    /// Whether this index is upper.
    fn is_up(&self) -> bool {
        self.orientation().is_up()
    }
}
