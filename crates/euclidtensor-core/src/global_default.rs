//! Process-wide default for the degenerate-contraction policy.

use crate::euclidean::DegeneratePolicy;
use std::sync::atomic::{AtomicU8, Ordering};

/// A global default [`DegeneratePolicy`] with atomic access.
///
/// # Example
///
/// ```
/// use euclidtensor_core::{DegeneratePolicy, GlobalPolicy};
///
/// static MY_DEFAULT: GlobalPolicy = GlobalPolicy::new(DegeneratePolicy::Alternate);
///
/// assert_eq!(MY_DEFAULT.get(), DegeneratePolicy::Alternate);
/// MY_DEFAULT.set(DegeneratePolicy::Reject);
/// assert_eq!(MY_DEFAULT.get(), DegeneratePolicy::Reject);
/// ```
pub struct GlobalPolicy {
    value: AtomicU8,
}

impl GlobalPolicy {
    /// Create a new global default with the given initial policy.
    #[must_use]
    pub const fn new(initial: DegeneratePolicy) -> Self {
        Self {
            value: AtomicU8::new(initial.to_u8()),
        }
    }

    /// Get the current policy.
    #[must_use]
    pub fn get(&self) -> DegeneratePolicy {
        DegeneratePolicy::from_u8(self.value.load(Ordering::Relaxed))
    }

    /// Set a new policy.
    pub fn set(&self, policy: DegeneratePolicy) {
        self.value.store(policy.to_u8(), Ordering::Relaxed);
    }
}

static DEFAULT_DEGENERATE_POLICY: GlobalPolicy = GlobalPolicy::new(DegeneratePolicy::Alternate);

/// Get the global default policy for names occurring more than twice.
///
/// The initial value is [`DegeneratePolicy::Alternate`].
pub fn default_degenerate_policy() -> DegeneratePolicy {
    DEFAULT_DEGENERATE_POLICY.get()
}

/// Set the global default policy for names occurring more than twice.
///
/// Affects every later `EuclideanOptions::default()`, including the one used
/// by [`crate::combine`].
pub fn set_default_degenerate_policy(policy: DegeneratePolicy) {
    DEFAULT_DEGENERATE_POLICY.set(policy);
}
