use crate::IndexLike;
use std::collections::HashMap;

/// One occurrence of an index inside a list of operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<I> {
    /// Position of the operand in the operand list.
    pub operand: usize,
    /// Position of the index within that operand's index list.
    pub position: usize,
    /// The index as it appears in the operand.
    pub index: I,
}

/// All occurrences sharing one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGroup<I: IndexLike> {
    pub key: I::Key,
    pub occurrences: Vec<Occurrence<I>>,
}

impl<I: IndexLike> KeyGroup<I> {
    /// Number of occurrences of the key.
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Always false for groups produced by [`group_by_key`].
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// A key seen exactly once.
    pub fn is_free(&self) -> bool {
        self.occurrences.len() == 1
    }
}

/// Group index occurrences by key across several operands.
///
/// Occurrences are recorded in operand order, then within-operand order.
/// Groups are returned in order of the first appearance of their key, so the
/// result is deterministic for a fixed input.
///
/// # Example
/// ```
/// use euclidtensor_index::{group_by_key, tensor_indices, IndexType};
///
/// let x = IndexType::new("X").unwrap();
/// let a = tensor_indices("i j", &x).unwrap();
/// let b = tensor_indices("j", &x).unwrap();
///
/// let groups = group_by_key(&[a, b]);
/// assert_eq!(groups.len(), 2);
/// assert!(groups[0].is_free());
/// assert_eq!(groups[1].occurrences[1].operand, 1);
/// ```
pub fn group_by_key<I: IndexLike>(index_lists: &[Vec<I>]) -> Vec<KeyGroup<I>> {
    let mut slot: HashMap<I::Key, usize> = HashMap::new();
    let mut groups: Vec<KeyGroup<I>> = Vec::new();

    for (operand, indices) in index_lists.iter().enumerate() {
        for (position, idx) in indices.iter().enumerate() {
            let occurrence = Occurrence {
                operand,
                position,
                index: idx.clone(),
            };
            match slot.get(idx.key()) {
                Some(&g) => groups[g].occurrences.push(occurrence),
                None => {
                    slot.insert(idx.key().clone(), groups.len());
                    groups.push(KeyGroup {
                        key: idx.key().clone(),
                        occurrences: vec![occurrence],
                    });
                }
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndexType, Orientation, TensorIndex};

    #[test]
    fn test_group_order_follows_first_appearance() {
        let x = IndexType::new("X").unwrap();
        let k = TensorIndex::up("k", &x).unwrap();
        let i = TensorIndex::down("i", &x).unwrap();
        let lists = vec![vec![k.clone()], vec![i.clone(), k.flip()], vec![i.flip()]];

        let groups = group_by_key(&lists);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["k", "i"]);

        let k_group = &groups[0];
        assert_eq!(k_group.len(), 2);
        assert_eq!(k_group.occurrences[0].operand, 0);
        assert_eq!(k_group.occurrences[1].operand, 1);
        assert_eq!(k_group.occurrences[1].position, 1);
        assert_eq!(k_group.occurrences[1].index.orientation(), Orientation::Down);
    }

    #[test]
    fn test_group_empty_input() {
        let groups = group_by_key::<TensorIndex>(&[]);
        assert!(groups.is_empty());
        let groups = group_by_key::<TensorIndex>(&[vec![], vec![]]);
        assert!(groups.is_empty());
    }
}
