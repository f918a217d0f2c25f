//! Euclidean-convention products.
//!
//! Under the Euclidean convention the caller marks a contraction only by
//! repeating an index name; whether each occurrence is written upper or lower
//! carries no meaning. Algebra engines that follow the Einstein convention
//! strictly only contract an upper occurrence against a lower one, so
//! [`combine`] first flips orientations until every repeated name has one of
//! each, then multiplies.
//!
//! The work is split in two phases:
//! 1. [`plan_flips`] inspects the index lists and produces a [`FlipPlan`]
//!    (pure, no expression is touched);
//! 2. [`combine_with`] applies the plan through [`TensorExpr::replaceinds_pairs`]
//!    and folds the operands left to right with [`TensorExpr::product`].
//!
//! # Names occurring more than twice
//!
//! A name that occurs three or more times has no well-defined contraction.
//! [`DegeneratePolicy::Alternate`] (the default) walks the occurrences in
//! order and flips each one that matches the orientation of its predecessor.
//! This is best effort: with an odd count the result still cannot be a
//! single up/down pair, and the algebra's multiplication usually rejects it.
//! [`DegeneratePolicy::Reject`] refuses such inputs up front.
//!
//! # Substitution is by index value
//!
//! A planned flip is an `(old, new)` pair handed to
//! [`TensorExpr::replaceinds_pairs`], which rewrites every slot equal to
//! `old`. If one operand holds the same index value twice (e.g. `A(i, i)` in
//! an algebra that accepts it), flipping one occurrence flips both slots.

use crate::error::EuclideanError;
use crate::global_default::default_degenerate_policy;
use crate::tensor_expr::TensorExpr;
use anyhow::Result;
use euclidtensor_index::{group_by_key, IndexLike, KeyGroup, Occurrence};
use std::borrow::Cow;

/// How to handle an index name that occurs more than twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Alternate orientations along the occurrence order (best effort).
    #[default]
    Alternate,
    /// Fail with [`EuclideanError::AmbiguousContraction`].
    Reject,
}

impl DegeneratePolicy {
    pub(crate) const fn to_u8(self) -> u8 {
        match self {
            DegeneratePolicy::Alternate => 0,
            DegeneratePolicy::Reject => 1,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => DegeneratePolicy::Reject,
            _ => DegeneratePolicy::Alternate,
        }
    }
}

/// Options for [`combine_with`].
#[derive(Debug, Clone)]
pub struct EuclideanOptions {
    /// Policy for names occurring more than twice.
    pub degenerate: DegeneratePolicy,
}

impl Default for EuclideanOptions {
    /// Uses the global default policy ([`crate::default_degenerate_policy`]).
    fn default() -> Self {
        Self {
            degenerate: default_degenerate_policy(),
        }
    }
}

impl EuclideanOptions {
    /// Options with the alternating heuristic, regardless of the global default.
    pub fn alternate() -> Self {
        Self {
            degenerate: DegeneratePolicy::Alternate,
        }
    }

    /// Options that reject names occurring more than twice.
    pub fn strict() -> Self {
        Self {
            degenerate: DegeneratePolicy::Reject,
        }
    }

    /// Set the degenerate policy.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }
}

/// Per-operand substitution maps computed by [`plan_flips`].
///
/// Entry `k` lists `(original, flipped)` pairs for operand `k`; an empty
/// list means the operand is used as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipPlan<I> {
    substitutions: Vec<Vec<(I, I)>>,
}

impl<I: IndexLike> FlipPlan<I> {
    fn with_operands(n: usize) -> Self {
        Self {
            substitutions: vec![Vec::new(); n],
        }
    }

    fn record(&mut self, occurrence: &Occurrence<I>) {
        let pair = (occurrence.index.clone(), occurrence.index.flip());
        tracing::trace!(
            key = %occurrence.index.key(),
            operand = occurrence.operand,
            position = occurrence.position,
            to = ?pair.1.orientation(),
            "flip index"
        );
        let subs = &mut self.substitutions[occurrence.operand];
        if !subs.contains(&pair) {
            subs.push(pair);
        }
    }

    /// Substitutions for operand `operand` (empty if out of range).
    pub fn for_operand(&self, operand: usize) -> &[(I, I)] {
        self.substitutions
            .get(operand)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of operands covered by the plan.
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    /// Whether the plan covers no operands.
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Total number of flips across all operands.
    pub fn num_flips(&self) -> usize {
        self.substitutions.iter().map(Vec::len).sum()
    }

    /// Whether no operand needs a substitution.
    pub fn is_identity(&self) -> bool {
        self.num_flips() == 0
    }

    /// Iterate over the per-operand substitution maps.
    pub fn iter(&self) -> impl Iterator<Item = &[(I, I)]> {
        self.substitutions.iter().map(Vec::as_slice)
    }
}

/// Compute which index occurrences must be flipped.
///
/// `index_lists[k]` holds the indices of operand `k` in extraction order.
/// Occurrences are grouped by [`IndexLike::key`]:
///
/// - one occurrence: free index, left alone;
/// - two occurrences with opposite orientation: already a contraction;
/// - two occurrences with the same orientation: the second one is flipped;
/// - more than two: see [`DegeneratePolicy`].
///
/// Each flip is recorded as an `(old, new)` pair for its operand, not as a
/// slot position. Applying the plan therefore rewrites every slot of that
/// operand equal to `old`, so an operand like `A(i, i)` gets both slots
/// flipped.
///
/// # Errors
///
/// Returns [`EuclideanError::AmbiguousContraction`] only under
/// [`DegeneratePolicy::Reject`].
///
/// # Example
/// ```
/// use euclidtensor_core::{plan_flips, DegeneratePolicy};
/// use euclidtensor_index::{tensor_indices, IndexLike, IndexType};
///
/// let x = IndexType::new("X").unwrap();
/// let a = tensor_indices("i j", &x).unwrap();
/// let b = tensor_indices("j", &x).unwrap();
///
/// let plan = plan_flips(&[a, b.clone()], DegeneratePolicy::Alternate).unwrap();
/// assert!(plan.for_operand(0).is_empty());
/// assert_eq!(plan.for_operand(1), &[(b[0].clone(), b[0].flip())]);
/// ```
pub fn plan_flips<I: IndexLike>(
    index_lists: &[Vec<I>],
    policy: DegeneratePolicy,
) -> Result<FlipPlan<I>, EuclideanError> {
    let groups = group_by_key(index_lists);

    if policy == DegeneratePolicy::Reject {
        if let Some(group) = groups.iter().find(|g| g.len() > 2) {
            return Err(EuclideanError::AmbiguousContraction {
                key: group.key.to_string(),
                count: group.len(),
            });
        }
    }

    let mut plan = FlipPlan::with_operands(index_lists.len());
    for group in &groups {
        match group.len() {
            0 | 1 => {}
            2 => {
                let (first, second) = (&group.occurrences[0], &group.occurrences[1]);
                if first.index.orientation() == second.index.orientation() {
                    plan.record(second);
                }
            }
            count => {
                tracing::warn!(
                    key = %group.key,
                    count,
                    "degenerate contraction: index occurs more than twice, alternating orientations"
                );
                alternate(group, &mut plan);
            }
        }
    }
    Ok(plan)
}

// The comparison uses the effective (possibly flipped) orientation of the
// preceding occurrence.
fn alternate<I: IndexLike>(group: &KeyGroup<I>, plan: &mut FlipPlan<I>) {
    let mut occurrences = group.occurrences.iter();
    let Some(first) = occurrences.next() else {
        return;
    };
    let mut preceding = first.index.orientation();
    for occurrence in occurrences {
        let current = occurrence.index.orientation();
        if current == preceding {
            plan.record(occurrence);
            preceding = current.flip();
        } else {
            preceding = current;
        }
    }
}

/// Multiply `operands` under the Euclidean convention.
///
/// Equivalent to [`combine_with`] with [`EuclideanOptions::default()`].
///
/// - `[]` returns [`TensorExpr::one`];
/// - `[x]` returns a clone of `x`;
/// - otherwise repeated names are re-oriented (see [`plan_flips`]) and the
///   operands are multiplied left to right.
///
/// Which side of a contraction ends up upper is an implementation detail
/// (currently the first occurrence keeps its orientation); only "one up, one
/// down" is guaranteed.
///
/// # Errors
///
/// Errors from the algebra (index extraction, substitution, multiplication)
/// are returned unchanged.
///
/// # Example
/// ```
/// use euclidtensor_core::{combine, TensorHead};
/// use euclidtensor_index::{tensor_indices, IndexType};
///
/// let x = IndexType::new("X").unwrap();
/// let a = TensorHead::new("A", &[x.clone(), x.clone()]).unwrap();
/// let b = TensorHead::new("B", &[x.clone()]).unwrap();
/// let ij = tensor_indices("i j", &x).unwrap();
///
/// let result = combine(&[
///     a.call(&ij).unwrap(),
///     b.call(&ij[1..]).unwrap(),
/// ])
/// .unwrap();
/// assert_eq!(result.to_string(), "A(i, X_0)*B(-X_0)");
/// ```
pub fn combine<T: TensorExpr>(operands: &[T]) -> Result<T> {
    combine_with(operands, &EuclideanOptions::default())
}

/// Multiply `operands` under the Euclidean convention with explicit options.
///
/// See [`combine`].
pub fn combine_with<T: TensorExpr>(operands: &[T], options: &EuclideanOptions) -> Result<T> {
    match operands {
        [] => return Ok(T::one()),
        [single] => return Ok(single.clone()),
        _ => {}
    }

    let index_lists = operands
        .iter()
        .map(|operand| operand.external_indices())
        .collect::<Result<Vec<_>>>()?;

    let plan = plan_flips(&index_lists, options.degenerate)?;
    tracing::debug!(
        operands = operands.len(),
        flips = plan.num_flips(),
        "euclidean combine"
    );

    let normalized = operands
        .iter()
        .zip(plan.iter())
        .map(|(operand, subs)| {
            if subs.is_empty() {
                Ok(Cow::Borrowed(operand))
            } else {
                operand.replaceinds_pairs(subs).map(Cow::Owned)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let mut normalized = normalized.into_iter();
    let mut acc = match normalized.next() {
        Some(first) => first.into_owned(),
        None => return Ok(T::one()),
    };
    for operand in normalized {
        acc = acc.product(&operand)?;
    }
    Ok(acc)
}
