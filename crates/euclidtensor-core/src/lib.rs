//! Tensor products under the Euclidean index convention.
//!
//! [`combine`] multiplies tensor expressions whose repeated index names mark
//! contractions regardless of orientation, flipping orientations so that the
//! underlying algebra sees proper upper/lower pairs.
//!
//! The algebra is abstracted by [`TensorExpr`]; [`TensorProduct`] is the
//! symbolic implementation shipped with the crate.

pub mod error;
pub mod euclidean;
pub mod global_default;
pub mod product;
pub mod tensor_expr;

pub use error::{EuclideanError, TensorAlgebraError};
pub use euclidean::{combine, combine_with, plan_flips, DegeneratePolicy, EuclideanOptions, FlipPlan};
pub use global_default::{default_degenerate_policy, set_default_degenerate_policy, GlobalPolicy};
pub use product::{Factor, TensorHead, TensorProduct};
pub use tensor_expr::TensorExpr;

// Index vocabulary, re-exported for convenience.
pub use euclidtensor_index::{
    tensor_indices, IndexLike, IndexName, IndexType, Orientation, TensorIndex,
};
