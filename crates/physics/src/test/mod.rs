use bevy::prelude::*;

mod collision;

pub(crate) fn assert_vec_near(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
