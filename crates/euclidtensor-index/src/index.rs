//! Default index types.
//!
//! - [`IndexType`]: index space (e.g. Lorentz, Euclidean `X`), Arc-wrapped for cheap cloning
//! - [`TensorIndex`]: named index of a given type with an [`Orientation`]
//!
//! `TensorIndex` implements the [`IndexLike`] trait with its name as key.

use crate::index_like::{IndexLike, Orientation};
use crate::name::{IndexName, IndexNameError};
use std::sync::Arc;
use thiserror::Error;

/// Error type for index construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// An index or index-type name failed validation.
    #[error("Invalid index name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: IndexNameError,
    },
}

fn parse_name(s: &str) -> Result<IndexName, IndexError> {
    IndexName::from_str(s).map_err(|source| IndexError::InvalidName {
        name: s.to_string(),
        source,
    })
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct IndexTypeData {
    name: IndexName,
    dummy_prefix: IndexName,
}

/// Index space shared by the slots of a tensor head.
///
/// The type wraps its data in an `Arc`, so cloning is a reference count
/// increment. Equality and hashing compare content, not pointers.
///
/// Contracted index pairs of this type are printed as
/// `{dummy_prefix}_{n}`; the prefix defaults to the first character of the
/// type name.
///
/// # Example
/// ```
/// use euclidtensor_index::IndexType;
///
/// let x = IndexType::new("X").unwrap();
/// assert_eq!(x.name().as_str(), "X");
/// assert_eq!(x.dummy_prefix().as_str(), "X");
///
/// let lorentz = IndexType::new("Lorentz").unwrap().with_dummy_prefix("L").unwrap();
/// assert_eq!(lorentz.dummy_prefix().as_str(), "L");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexType(Arc<IndexTypeData>);

impl IndexType {
    /// Create an index type; the dummy prefix is the first character of `name`.
    pub fn new(name: &str) -> Result<Self, IndexError> {
        let name = parse_name(name)?;
        let mut buf = [0u8; 4];
        let prefix = name.first_char().encode_utf8(&mut buf);
        let dummy_prefix = parse_name(prefix)?;
        Ok(Self(Arc::new(IndexTypeData { name, dummy_prefix })))
    }

    /// Replace the dummy prefix.
    pub fn with_dummy_prefix(self, prefix: &str) -> Result<Self, IndexError> {
        let dummy_prefix = parse_name(prefix)?;
        Ok(Self(Arc::new(IndexTypeData {
            name: self.0.name,
            dummy_prefix,
        })))
    }

    /// Name of the index type.
    pub fn name(&self) -> &IndexName {
        &self.0.name
    }

    /// Prefix used for dummy (contracted) index names.
    pub fn dummy_prefix(&self) -> &IndexName {
        &self.0.dummy_prefix
    }
}

impl std::fmt::Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

/// A named, typed, oriented tensor index.
///
/// **Equality**: two indices are equal iff name, type and orientation all
/// match. Use [`IndexLike::same_key`] for orientation-insensitive comparison.
///
/// # Example
/// ```
/// use euclidtensor_index::{IndexLike, IndexType, Orientation, TensorIndex};
///
/// let x = IndexType::new("X").unwrap();
/// let j = TensorIndex::up("j", &x).unwrap();
/// assert_eq!(j.to_string(), "j");
/// assert_eq!((-j.clone()).to_string(), "-j");
/// assert_eq!((-j).orientation(), Orientation::Down);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorIndex {
    name: IndexName,
    index_type: IndexType,
    orientation: Orientation,
}

impl TensorIndex {
    /// Create an index from a validated name.
    pub fn from_name(name: IndexName, index_type: &IndexType, orientation: Orientation) -> Self {
        Self {
            name,
            index_type: index_type.clone(),
            orientation,
        }
    }

    /// Create an index, validating `name`.
    pub fn new(
        name: &str,
        index_type: &IndexType,
        orientation: Orientation,
    ) -> Result<Self, IndexError> {
        Ok(Self::from_name(parse_name(name)?, index_type, orientation))
    }

    /// Create an upper index.
    pub fn up(name: &str, index_type: &IndexType) -> Result<Self, IndexError> {
        Self::new(name, index_type, Orientation::Up)
    }

    /// Create a lower index.
    pub fn down(name: &str, index_type: &IndexType) -> Result<Self, IndexError> {
        Self::new(name, index_type, Orientation::Down)
    }

    /// Base name of the index.
    pub fn name(&self) -> &IndexName {
        &self.name
    }

    /// Index type (space) of the index.
    pub fn index_type(&self) -> &IndexType {
        &self.index_type
    }
}

impl IndexLike for TensorIndex {
    type Key = IndexName;

    fn key(&self) -> &Self::Key {
        &self.name
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn flip(&self) -> Self {
        Self {
            name: self.name,
            index_type: self.index_type.clone(),
            orientation: self.orientation.flip(),
        }
    }

    fn is_contractable(&self, other: &Self) -> bool {
        self.name == other.name
            && self.index_type == other.index_type
            && self.orientation != other.orientation
    }
}

impl std::ops::Neg for TensorIndex {
    type Output = TensorIndex;

    fn neg(self) -> Self::Output {
        IndexLike::flip(&self)
    }
}

impl std::ops::Neg for &TensorIndex {
    type Output = TensorIndex;

    fn neg(self) -> Self::Output {
        IndexLike::flip(self)
    }
}

impl std::fmt::Display for TensorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.orientation {
            Orientation::Up => write!(f, "{}", self.name),
            Orientation::Down => write!(f, "-{}", self.name),
        }
    }
}

/// Create several upper indices of one type.
///
/// Names are separated by whitespace and/or commas.
///
/// # Example
/// ```
/// use euclidtensor_index::{tensor_indices, IndexType};
///
/// let x = IndexType::new("X").unwrap();
/// let idx = tensor_indices("i j, k", &x).unwrap();
/// assert_eq!(idx.len(), 3);
/// assert_eq!(idx[2].to_string(), "k");
/// ```
pub fn tensor_indices(names: &str, index_type: &IndexType) -> Result<Vec<TensorIndex>, IndexError> {
    names
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| TensorIndex::up(s, index_type))
        .collect()
}
