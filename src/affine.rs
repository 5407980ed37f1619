//! Affine reconstruction from the two spatial representations of a header.
//!
//! Both are always computed, even when `qform_code` or `sform_code` say
//! that the representation is not in use. Deciding which one to trust is
//! up to the consumer.

use nalgebra::{Matrix3, Matrix4};

/// 3x3 rotation/scaling part of an affine.
pub type Affine3 = Matrix3<f64>;
/// Full 4x4 affine, with `(0, 0, 0, 1)` as the last row.
pub type Affine4 = Matrix4<f64>;

/// Calculate the affine described by the quaternion representation.
///
/// `pixdim[0]` is the qfac factor and `pixdim[1..4]` the axis spacings.
/// The rotation columns are scaled by the spacings, and then the slice
/// axis entry at `[2, 2]` alone is multiplied by qfac. Only that single
/// element is corrected, not the whole third column.
///
/// The scalar part of the quaternion is derived from `(b, c, d)`, clamped
/// at zero for slightly denormalized inputs.
#[rustfmt::skip]
pub fn quaternion_to_affine(quatern: [f64; 3], pixdim: [f64; 4], offset: [f64; 3]) -> Affine4 {
    let [b, c, d] = quatern;
    let a = (1.0 - b * b - c * c - d * d).max(0.0).sqrt();

    let mut r = quaternion_to_rotation(a, b, c, d);
    for (j, spacing) in pixdim[1..].iter().enumerate() {
        for i in 0..3 {
            r[(i, j)] *= spacing;
        }
    }
    r[(2, 2)] *= pixdim[0];

    let [x, y, z] = offset;
    Affine4::new(
        r[(0, 0)], r[(0, 1)], r[(0, 2)], x,
        r[(1, 0)], r[(1, 1)], r[(1, 2)], y,
        r[(2, 0)], r[(2, 1)], r[(2, 2)], z,
        0.0,       0.0,       0.0,       1.0,
    )
}

/// Build the affine given verbatim by the `srow_*` fields.
#[rustfmt::skip]
pub fn srow_affine(srow_x: [f64; 4], srow_y: [f64; 4], srow_z: [f64; 4]) -> Affine4 {
    Affine4::new(
        srow_x[0], srow_x[1], srow_x[2], srow_x[3],
        srow_y[0], srow_y[1], srow_y[2], srow_y[3],
        srow_z[0], srow_z[1], srow_z[2], srow_z[3],
        0.0,       0.0,       0.0,       1.0,
    )
}

/// Rotation matrix of the unit quaternion `(a, b, c, d)`, scalar first.
#[rustfmt::skip]
pub(crate) fn quaternion_to_rotation(a: f64, b: f64, c: f64, d: f64) -> Affine3 {
    Affine3::new(
        a * a + b * b - c * c - d * d, 2.0 * b * c - 2.0 * a * d,     2.0 * b * d + 2.0 * a * c,
        2.0 * b * c + 2.0 * a * d,     a * a + c * c - b * b - d * d, 2.0 * c * d - 2.0 * a * b,
        2.0 * b * d - 2.0 * a * c,     2.0 * c * d + 2.0 * a * b,     a * a + d * d - c * c - b * b,
    )
}
