//! Symbolic tensor products.
//!
//! A [`TensorProduct`] is an ordered list of tensor-head applications such as
//! `A(i, j)*B(-j)`. It is the algebra [`crate::combine`] works on out of the
//! box: it validates index structure on every construction and multiplication,
//! and prints contracted pairs with generated dummy names.
//!
//! Validation rules, per index name across the whole product:
//! - at most two occurrences;
//! - two occurrences must live in the same [`IndexType`];
//! - two occurrences must have opposite orientation (strict Einstein convention).

use crate::error::TensorAlgebraError;
use crate::tensor_expr::TensorExpr;
use euclidtensor_index::{group_by_key, IndexLike, IndexName, IndexType, TensorIndex};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct TensorHeadData {
    name: IndexName,
    slots: Vec<IndexType>,
}

/// A named tensor with typed index slots.
///
/// Cheap to clone (Arc-wrapped). Equality compares name and slot types.
///
/// # Example
/// ```
/// use euclidtensor_core::TensorHead;
/// use euclidtensor_index::{tensor_indices, IndexType};
///
/// let x = IndexType::new("X").unwrap();
/// let a = TensorHead::new("A", &[x.clone(), x.clone()]).unwrap();
/// let ij = tensor_indices("i j", &x).unwrap();
///
/// let t = a.call(&ij).unwrap();
/// assert_eq!(t.to_string(), "A(i, j)");
/// assert!(a.call(&ij[..1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorHead(Arc<TensorHeadData>);

impl TensorHead {
    /// Create a tensor head with one slot per entry of `slots`.
    pub fn new(name: &str, slots: &[IndexType]) -> Result<Self, TensorAlgebraError> {
        let name = IndexName::from_str(name).map_err(|source| {
            TensorAlgebraError::Index(euclidtensor_index::IndexError::InvalidName {
                name: name.to_string(),
                source,
            })
        })?;
        Ok(Self(Arc::new(TensorHeadData {
            name,
            slots: slots.to_vec(),
        })))
    }

    /// Name of the tensor.
    pub fn name(&self) -> &IndexName {
        &self.0.name
    }

    /// Index types of the slots.
    pub fn slots(&self) -> &[IndexType] {
        &self.0.slots
    }

    /// Number of slots.
    pub fn rank(&self) -> usize {
        self.0.slots.len()
    }

    /// Apply the head to indices, producing a single-factor product.
    ///
    /// # Errors
    /// - `SlotCountMismatch` if `indices.len()` differs from the rank;
    /// - `IndexTypeMismatch` if an index does not match its slot type;
    /// - any validation error of [`TensorProduct`] (e.g. `A(i, i)`).
    pub fn call(&self, indices: &[TensorIndex]) -> Result<TensorProduct, TensorAlgebraError> {
        if indices.len() != self.rank() {
            return Err(TensorAlgebraError::SlotCountMismatch {
                head: self.name().as_str(),
                expected: self.rank(),
                actual: indices.len(),
            });
        }
        for (slot, idx) in self.slots().iter().zip(indices) {
            if idx.index_type() != slot {
                return Err(TensorAlgebraError::IndexTypeMismatch {
                    index: idx.to_string(),
                    expected: slot.to_string(),
                    actual: idx.index_type().to_string(),
                });
            }
        }
        TensorProduct::from_factors(vec![Factor {
            head: self.clone(),
            indices: indices.to_vec(),
        }])
    }
}

/// One tensor-head application inside a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    head: TensorHead,
    indices: Vec<TensorIndex>,
}

impl Factor {
    /// The tensor head.
    pub fn head(&self) -> &TensorHead {
        &self.head
    }

    /// Indices in slot order.
    pub fn indices(&self) -> &[TensorIndex] {
        &self.indices
    }
}

/// Product of tensor-head applications.
///
/// The empty product is the scalar `1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TensorProduct {
    factors: Vec<Factor>,
}

impl TensorProduct {
    /// The scalar `1`.
    pub fn one() -> Self {
        Self::default()
    }

    fn from_factors(factors: Vec<Factor>) -> Result<Self, TensorAlgebraError> {
        let product = Self { factors };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), TensorAlgebraError> {
        for group in group_by_key(&[self.indices()]) {
            match group.occurrences.as_slice() {
                [] | [_] => {}
                [first, second] => {
                    let (a, b) = (&first.index, &second.index);
                    if a.index_type() != b.index_type() {
                        return Err(TensorAlgebraError::IndexTypeMismatch {
                            index: group.key.as_str(),
                            expected: a.index_type().to_string(),
                            actual: b.index_type().to_string(),
                        });
                    }
                    if !a.is_contractable(b) {
                        return Err(TensorAlgebraError::RepeatedIndex {
                            index: b.to_string(),
                        });
                    }
                }
                occurrences => {
                    return Err(TensorAlgebraError::TooManyOccurrences {
                        index: group.key.as_str(),
                        count: occurrences.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Factors in multiplication order.
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Whether the product has no factors.
    pub fn is_scalar(&self) -> bool {
        self.factors.is_empty()
    }

    /// All indices, factor by factor in slot order.
    pub fn indices(&self) -> Vec<TensorIndex> {
        self.factors
            .iter()
            .flat_map(|f| f.indices.iter().cloned())
            .collect()
    }

    /// Indices whose name occurs exactly once, in order.
    pub fn free_indices(&self) -> Vec<TensorIndex> {
        group_by_key(&[self.indices()])
            .into_iter()
            .filter(|g| g.is_free())
            .map(|g| g.occurrences[0].index.clone())
            .collect()
    }

    /// One upper index per contracted pair, in order of first appearance.
    pub fn dummy_indices(&self) -> Vec<TensorIndex> {
        group_by_key(&[self.indices()])
            .into_iter()
            .filter(|g| g.len() == 2)
            .filter_map(|g| g.occurrences.into_iter().map(|o| o.index).find(|i| i.is_up()))
            .collect()
    }

    /// Multiply two products (concatenate factors) and validate the result.
    pub fn multiply(&self, other: &Self) -> Result<Self, TensorAlgebraError> {
        let mut factors = self.factors.clone();
        factors.extend(other.factors.iter().cloned());
        Self::from_factors(factors)
    }

    /// Replace every index equal to some `old` by the matching `new`.
    ///
    /// `old` and `new` must share an index type.
    pub fn replace_indices(
        &self,
        pairs: &[(TensorIndex, TensorIndex)],
    ) -> Result<Self, TensorAlgebraError> {
        for (old, new) in pairs {
            if old.index_type() != new.index_type() {
                return Err(TensorAlgebraError::IndexTypeMismatch {
                    index: new.to_string(),
                    expected: old.index_type().to_string(),
                    actual: new.index_type().to_string(),
                });
            }
        }
        let replace = |idx: &TensorIndex| {
            pairs
                .iter()
                .find(|(old, _)| old == idx)
                .map_or_else(|| idx.clone(), |(_, new)| new.clone())
        };
        let factors = self
            .factors
            .iter()
            .map(|f| Factor {
                head: f.head.clone(),
                indices: f.indices.iter().map(replace).collect(),
            })
            .collect();
        Self::from_factors(factors)
    }

    // Display names: free indices keep their name, each contracted pair gets
    // `{prefix}_{n}` with a per-type counter. Counters start above any free
    // name of that type already shaped like a dummy.
    fn display_names(&self) -> HashMap<IndexName, String> {
        let groups = group_by_key(&[self.indices()]);

        let mut counters: HashMap<IndexType, usize> = HashMap::new();
        for group in groups.iter().filter(|g| g.is_free()) {
            let ty = group.occurrences[0].index.index_type();
            if let Some(n) = dummy_number(&group.key.as_str(), ty) {
                let next = counters.entry(ty.clone()).or_insert(0);
                *next = (*next).max(n + 1);
            }
        }

        let mut names = HashMap::new();
        for group in &groups {
            let name = if group.len() == 2 {
                let ty = group.occurrences[0].index.index_type();
                let n = counters.entry(ty.clone()).or_insert(0);
                let dummy = format!("{}_{}", ty.dummy_prefix(), n);
                *n += 1;
                dummy
            } else {
                group.key.as_str()
            };
            names.insert(group.key, name);
        }
        names
    }
}

/// `Some(n)` if `name` reads `{prefix}_{n}` for the dummy prefix of `ty`.
fn dummy_number(name: &str, ty: &IndexType) -> Option<usize> {
    let prefix = ty.dummy_prefix().as_str();
    let digits = name.strip_prefix(prefix.as_str())?.strip_prefix('_')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl std::fmt::Display for TensorProduct {
    /// Prints e.g. `A(i, X_0)*B(-X_0)`; the empty product prints as `1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "1");
        }
        let names = self.display_names();
        for (k, factor) in self.factors.iter().enumerate() {
            if k > 0 {
                write!(f, "*")?;
            }
            write!(f, "{}", factor.head.name())?;
            if factor.indices.is_empty() {
                continue;
            }
            write!(f, "(")?;
            for (pos, idx) in factor.indices.iter().enumerate() {
                if pos > 0 {
                    write!(f, ", ")?;
                }
                if !idx.is_up() {
                    write!(f, "-")?;
                }
                match names.get(idx.name()) {
                    Some(name) => write!(f, "{}", name)?,
                    None => write!(f, "{}", idx.name())?,
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl TensorExpr for TensorProduct {
    type Index = TensorIndex;

    fn external_indices(&self) -> anyhow::Result<Vec<TensorIndex>> {
        Ok(self.indices())
    }

    fn num_external_indices(&self) -> anyhow::Result<usize> {
        Ok(self.factors.iter().map(|f| f.indices.len()).sum())
    }

    fn replaceinds_pairs(&self, pairs: &[(TensorIndex, TensorIndex)]) -> anyhow::Result<Self> {
        Ok(self.replace_indices(pairs)?)
    }

    fn product(&self, other: &Self) -> anyhow::Result<Self> {
        Ok(self.multiply(other)?)
    }

    fn one() -> Self {
        TensorProduct::one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclidtensor_index::tensor_indices;

    fn space() -> IndexType {
        IndexType::new("X").unwrap()
    }

    #[test]
    fn test_call_checks_slot_types() {
        let x = space();
        let y = IndexType::new("Y").unwrap();
        let a = TensorHead::new("A", &[x.clone(), y.clone()]).unwrap();
        let i = TensorIndex::up("i", &x).unwrap();
        let j = TensorIndex::up("j", &x).unwrap();

        let err = a.call(&[i.clone(), j]).unwrap_err();
        assert_eq!(
            err,
            TensorAlgebraError::IndexTypeMismatch {
                index: "j".to_string(),
                expected: "Y".to_string(),
                actual: "X".to_string(),
            }
        );

        let err = a.call(&[i]).unwrap_err();
        assert!(matches!(
            err,
            TensorAlgebraError::SlotCountMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_self_contraction_allowed() {
        let x = space();
        let a = TensorHead::new("A", &[x.clone(), x.clone()]).unwrap();
        let i = TensorIndex::up("i", &x).unwrap();

        let t = a.call(&[i.clone(), -&i]).unwrap();
        assert!(t.free_indices().is_empty());
        assert_eq!(t.dummy_indices(), vec![i.clone()]);
        assert_eq!(t.to_string(), "A(X_0, -X_0)");

        let err = a.call(&[i.clone(), i]).unwrap_err();
        assert_eq!(
            err,
            TensorAlgebraError::RepeatedIndex {
                index: "i".to_string()
            }
        );
    }

    #[test]
    fn test_multiply_validates() {
        let x = space();
        let b = TensorHead::new("B", &[x.clone()]).unwrap();
        let i = TensorIndex::up("i", &x).unwrap();
        let bi = b.call(&[i.clone()]).unwrap();
        let bi_down = b.call(&[-&i]).unwrap();

        assert!(matches!(
            bi.multiply(&bi),
            Err(TensorAlgebraError::RepeatedIndex { .. })
        ));

        let pair = bi.multiply(&bi_down).unwrap();
        assert!(matches!(
            pair.multiply(&bi),
            Err(TensorAlgebraError::TooManyOccurrences { count: 3, .. })
        ));
    }

    #[test]
    fn test_contraction_across_types_rejected() {
        let x = space();
        let y = IndexType::new("Y").unwrap();
        let a = TensorHead::new("A", &[x.clone()]).unwrap();
        let b = TensorHead::new("B", &[y.clone()]).unwrap();
        let ta = a.call(&[TensorIndex::up("i", &x).unwrap()]).unwrap();
        let tb = b.call(&[TensorIndex::down("i", &y).unwrap()]).unwrap();

        let err = ta.multiply(&tb).unwrap_err();
        assert!(matches!(err, TensorAlgebraError::IndexTypeMismatch { .. }));
    }

    #[test]
    fn test_replace_indices() {
        let x = space();
        let a = TensorHead::new("A", &[x.clone(), x.clone()]).unwrap();
        let ij = tensor_indices("i j", &x).unwrap();
        let t = a.call(&ij).unwrap();

        let flipped = t.replace_indices(&[(ij[1].clone(), ij[1].flip())]).unwrap();
        assert_eq!(flipped.indices(), vec![ij[0].clone(), ij[1].flip()]);
        // Original untouched.
        assert_eq!(t.indices(), ij);

        let y = IndexType::new("Y").unwrap();
        let j_y = TensorIndex::up("j", &y).unwrap();
        assert!(t.replace_indices(&[(ij[1].clone(), j_y)]).is_err());

        let via_trait = t.replaceind(&ij[0], &ij[0].flip()).unwrap();
        assert_eq!(via_trait.to_string(), "A(-i, j)");
    }

    #[test]
    fn test_display() {
        let x = space();
        let lorentz = IndexType::new("Lorentz").unwrap();
        let s = TensorHead::new("s", &[]).unwrap();
        let a = TensorHead::new("A", &[x.clone(), lorentz.clone()]).unwrap();
        let b = TensorHead::new("B", &[lorentz.clone(), x.clone()]).unwrap();

        let i = TensorIndex::up("i", &x).unwrap();
        let k = TensorIndex::up("k", &x).unwrap();
        let mu = TensorIndex::up("mu", &lorentz).unwrap();

        let t = s
            .call(&[])
            .unwrap()
            .multiply(&a.call(&[i.clone(), mu.clone()]).unwrap())
            .unwrap()
            .multiply(&b.call(&[-&mu, -&i]).unwrap())
            .unwrap()
            .multiply(&a.call(&[k, -&mu]).unwrap());
        // mu would occur three times.
        assert!(t.is_err());

        let t = a
            .call(&[i.clone(), mu.clone()])
            .unwrap()
            .multiply(&b.call(&[-&mu, -&i]).unwrap())
            .unwrap();
        assert_eq!(t.to_string(), "A(X_0, L_0)*B(-L_0, -X_0)");
        assert_eq!(TensorProduct::one().to_string(), "1");
        assert_eq!(s.call(&[]).unwrap().to_string(), "s");
    }

    #[test]
    fn test_dummy_names_skip_free_dummy_like_names() {
        let x = space();
        let a = TensorHead::new("A", &[x.clone(), x.clone()]).unwrap();
        let b = TensorHead::new("B", &[x.clone()]).unwrap();
        let x0 = TensorIndex::up("X_0", &x).unwrap();
        let i = TensorIndex::up("i", &x).unwrap();

        let t = a
            .call(&[x0.clone(), i.clone()])
            .unwrap()
            .multiply(&b.call(&[-&i]).unwrap())
            .unwrap();
        assert_eq!(t.to_string(), "A(X_0, X_1)*B(-X_1)");

        // Gaps are not filled: counting starts above the highest free number.
        let x4 = TensorIndex::up("X_4", &x).unwrap();
        let t = a
            .call(&[x4, i.clone()])
            .unwrap()
            .multiply(&b.call(&[-&i]).unwrap())
            .unwrap();
        assert_eq!(t.to_string(), "A(X_4, X_5)*B(-X_5)");
    }

    #[test]
    fn test_dummy_number() {
        let x = space();
        let lorentz = IndexType::new("Lorentz").unwrap();
        assert_eq!(dummy_number("X_0", &x), Some(0));
        assert_eq!(dummy_number("X_12", &x), Some(12));
        assert_eq!(dummy_number("X_", &x), None);
        assert_eq!(dummy_number("X_1a", &x), None);
        assert_eq!(dummy_number("Y_1", &x), None);
        assert_eq!(dummy_number("X_1", &lorentz), None);
        assert_eq!(dummy_number("L_3", &lorentz), Some(3));
    }

    #[test]
    fn test_scalar_one() {
        let one = <TensorProduct as TensorExpr>::one();
        assert!(one.is_scalar());
        assert_eq!(one.num_external_indices().unwrap(), 0);
    }
}
