//! The process-wide default policy lives in its own test binary so that
//! changing it cannot race with other tests.

use euclidtensor_core::{
    combine, default_degenerate_policy, set_default_degenerate_policy, DegeneratePolicy,
    EuclideanError, EuclideanOptions, IndexType, TensorHead, TensorIndex,
};

#[test]
fn test_global_default_policy_drives_combine() {
    assert_eq!(default_degenerate_policy(), DegeneratePolicy::Alternate);

    let x = IndexType::new("X").unwrap();
    let t = TensorHead::new("T", &[x.clone()])
        .unwrap()
        .call(&[TensorIndex::up("i", &x).unwrap()])
        .unwrap();
    let operands = [t.clone(), t.clone(), t];

    set_default_degenerate_policy(DegeneratePolicy::Reject);
    assert_eq!(EuclideanOptions::default().degenerate, DegeneratePolicy::Reject);
    let err = combine(&operands).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EuclideanError>(),
        Some(EuclideanError::AmbiguousContraction { count: 3, .. })
    ));

    set_default_degenerate_policy(DegeneratePolicy::Alternate);
    let err = combine(&operands).unwrap_err();
    assert!(err.downcast_ref::<EuclideanError>().is_none());
}
