//! Stack-allocated index names.
//!
//! An [`IndexName`] stores up to [`MAX_NAME_LEN`] characters inline with an
//! explicit length, so indices stay small and cheap to copy.

use thiserror::Error;

/// Maximum number of characters in an index name.
pub const MAX_NAME_LEN: usize = 16;

/// Error type for [`IndexName`] construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexNameError {
    /// The name has no characters.
    #[error("Index name is empty")]
    Empty,
    /// The name has more characters than fit inline.
    #[error("Index name too long: {actual} characters (max {max})")]
    TooLong { actual: usize, max: usize },
    /// The name contains a character that is not alphanumeric or `_`.
    #[error("Invalid character {char_value:?} in index name")]
    InvalidChar { char_value: char },
}

/// An inline, fixed-capacity index name.
///
/// Names are restricted to alphanumerics and `_`. In particular `-` is
/// rejected, since it marks a lower index when printing, and `,` and
/// whitespace are rejected since they separate names in [`crate::tensor_indices`].
///
/// # Example
/// ```
/// use euclidtensor_index::IndexName;
///
/// let mu = IndexName::from_str("mu").unwrap();
/// assert_eq!(mu.as_str(), "mu");
/// assert_eq!(mu.len(), 2);
///
/// assert!(IndexName::from_str("-mu").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IndexName {
    data: [char; MAX_NAME_LEN],
    len: usize,
}

impl IndexName {
    /// Create an index name from a string slice.
    ///
    /// This function is allocation-free.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, IndexNameError> {
        let mut data = ['\0'; MAX_NAME_LEN];
        let mut len = 0;

        for ch in s.chars() {
            if len >= MAX_NAME_LEN {
                let actual = len + 1 + s.chars().skip(len + 1).count();
                return Err(IndexNameError::TooLong {
                    actual,
                    max: MAX_NAME_LEN,
                });
            }
            if !(ch.is_alphanumeric() || ch == '_') {
                return Err(IndexNameError::InvalidChar { char_value: ch });
            }
            data[len] = ch;
            len += 1;
        }

        if len == 0 {
            return Err(IndexNameError::Empty);
        }
        Ok(Self { data, len })
    }

    /// Convert to a `String`.
    pub fn as_str(&self) -> String {
        self.as_slice().iter().collect()
    }

    /// Number of characters in the name.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: empty names cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First character of the name.
    pub fn first_char(&self) -> char {
        self.data[0]
    }

    /// Characters of the name.
    pub fn as_slice(&self) -> &[char] {
        &self.data[..self.len]
    }
}

impl std::str::FromStr for IndexName {
    type Err = IndexNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexName::from_str(s)
    }
}

impl TryFrom<&str> for IndexName {
    type Error = IndexNameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        IndexName::from_str(s)
    }
}

impl PartialEq for IndexName {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for IndexName {}

impl std::hash::Hash for IndexName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialOrd for IndexName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl std::fmt::Display for IndexName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.as_slice() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_name_basic() {
        let n = IndexName::from_str("alpha_1").unwrap();
        assert_eq!(n.as_str(), "alpha_1");
        assert_eq!(n.len(), 7);
        assert_eq!(n.first_char(), 'a');
        assert_eq!(format!("{}", n), "alpha_1");
    }

    #[test]
    fn test_name_unicode() {
        let n = IndexName::from_str("μν").unwrap();
        assert_eq!(n.len(), 2);
        assert_eq!(n.as_str(), "μν");
    }

    #[test]
    fn test_name_empty() {
        assert_eq!(IndexName::from_str(""), Err(IndexNameError::Empty));
    }

    #[test]
    fn test_name_too_long() {
        let result = IndexName::from_str("abcdefghijklmnopq");
        assert_eq!(
            result,
            Err(IndexNameError::TooLong {
                actual: 17,
                max: MAX_NAME_LEN
            })
        );
    }

    #[test]
    fn test_name_rejects_separators() {
        for bad in ["-i", "i,j", "i j", "i*"] {
            assert!(
                matches!(
                    IndexName::from_str(bad),
                    Err(IndexNameError::InvalidChar { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_name_equality_ignores_padding() {
        let a = IndexName::from_str("ab").unwrap();
        let b: IndexName = "ab".parse().unwrap();
        let c = IndexName::try_from("abc").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
