//! Tolerance checks shared by every constructor and mutator.
//!
//! Each check takes a candidate value and returns `Ok(())` when it satisfies its invariant.
//! All of them compare an absolute error against the single [`TOLERANCE`] constant.

use glam::{DMat3, DMat4, DQuat, DVec3, DVec4};

use crate::error::{GeometryError, GeometryResult};

/// Absolute tolerance used by all the checks.
///
/// Loose enough that values produced by ordinary double precision arithmetic elsewhere
/// re-validate without spurious failures.
pub const TOLERANCE: f64 = 1e-5;

/// Largest absolute value in `values`, propagating NaN.
fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, &v| {
        let v = v.abs();
        if v.is_nan() || v > acc {
            v
        } else {
            acc
        }
    })
}

/// `true` when `error` is within tolerance. NaN is never within tolerance.
#[inline]
fn within_tolerance(error: f64) -> bool {
    error < TOLERANCE
}

/// Check that `r` is a proper rotation: orthonormal with determinant +1.
///
/// # Errors
///
/// * [`GeometryError::NotOrthonormal`] if `max(|R·Rᵗ - I|) >= TOLERANCE`.
/// * [`GeometryError::NotRightHanded`] if `|det(R) - 1| >= TOLERANCE`.
pub fn check_rotation_matrix(r: &DMat3) -> GeometryResult<()> {
    let identity_error = max_abs(&(*r * r.transpose() - DMat3::IDENTITY).to_cols_array());
    if !within_tolerance(identity_error) {
        log::debug!("rejecting rotation matrix: orthonormality error {identity_error:e}");
        return Err(GeometryError::NotOrthonormal(identity_error));
    }

    let det_error = (r.determinant() - 1.0).abs();
    if !within_tolerance(det_error) {
        log::debug!("rejecting rotation matrix: determinant error {det_error:e}");
        return Err(GeometryError::NotRightHanded(det_error));
    }

    Ok(())
}

/// Check that `x` is a homogeneous SE(3) matrix.
///
/// The upper-left 3x3 block must pass [`check_rotation_matrix`] and the bottom row must be
/// `[0, 0, 0, 1]`.
///
/// # Errors
///
/// Any error of [`check_rotation_matrix`], or [`GeometryError::ImproperlyScaled`] if the
/// bottom row is off.
pub fn check_se3(x: &DMat4) -> GeometryResult<()> {
    check_rotation_matrix(&DMat3::from_mat4(*x))?;

    let bottom_error = max_abs(&(x.row(3) - DVec4::W).to_array());
    if !within_tolerance(bottom_error) {
        log::debug!("rejecting homogeneous matrix: bottom row error {bottom_error:e}");
        return Err(GeometryError::ImproperlyScaled(bottom_error));
    }

    Ok(())
}

/// Check that `q` has unit norm.
///
/// # Errors
///
/// [`GeometryError::QuaternionNotNormalized`] if `|‖q‖ - 1| >= TOLERANCE`.
pub fn check_quaternion(q: &DQuat) -> GeometryResult<()> {
    let norm_error = (q.length() - 1.0).abs();
    if !within_tolerance(norm_error) {
        log::debug!("rejecting quaternion: norm error {norm_error:e}");
        return Err(GeometryError::QuaternionNotNormalized(norm_error));
    }
    Ok(())
}

/// Check the axis of an angle-axis pair. The angle has no invariant of its own.
///
/// # Errors
///
/// [`GeometryError::AxisNotNormalized`] if `|‖axis‖ - 1| >= TOLERANCE`.
pub fn check_angle_axis(axis: &DVec3) -> GeometryResult<()> {
    let norm_error = (axis.length() - 1.0).abs();
    if !within_tolerance(norm_error) {
        log::debug!("rejecting angle-axis: axis norm error {norm_error:e}");
        return Err(GeometryError::AxisNotNormalized(norm_error));
    }
    Ok(())
}
