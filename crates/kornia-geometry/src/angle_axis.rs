//! Rotation as an angle about a unit axis.

use std::fmt;

use glam::{DMat3, DQuat, DVec3};
use rand::Rng;

use crate::{
    check::{check_angle_axis, check_quaternion},
    error::GeometryResult,
    quaternion::Quaternion,
};

/// Angle and axis of the rotation encoded by `q`.
///
/// The angle lies in `[0, π]`. A quaternion with no imaginary part maps to angle 0 about x.
fn angle_axis_from_dquat(q: DQuat) -> (f64, DVec3) {
    let mut n = q.xyz().length();
    if n == 0.0 {
        return (0.0, DVec3::X);
    }
    let angle = 2.0 * n.atan2(q.w.abs());
    if q.w < 0.0 {
        n = -n;
    }
    (angle, q.xyz() / n)
}

/// A rotation of `angle` radians about a unit `axis`.
///
/// Only the axis is constrained; any real angle is valid, including negative values and
/// values beyond `2π`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleAxis {
    angle: f64,
    axis: DVec3,
}

impl AngleAxis {
    /// Zero rotation about the x axis.
    pub const IDENTITY: Self = Self {
        angle: 0.0,
        axis: DVec3::X,
    };

    /// Zero rotation about the x axis.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    fn validated(angle: f64, axis: DVec3) -> GeometryResult<Self> {
        check_angle_axis(&axis)?;
        Ok(Self { angle, axis })
    }

    /// Create a rotation from an angle in radians and a unit axis.
    ///
    /// # Errors
    ///
    /// [`GeometryError::AxisNotNormalized`](crate::GeometryError::AxisNotNormalized) if
    /// `axis` is not unit.
    pub fn new(angle: f64, axis: DVec3) -> GeometryResult<Self> {
        Self::validated(angle, axis)
    }

    /// Convert a quaternion. The quaternion is validated before conversion and the result
    /// after it.
    pub fn from_quaternion(quaternion: &Quaternion) -> GeometryResult<Self> {
        let q = quaternion.as_dquat();
        check_quaternion(&q)?;
        let (angle, axis) = angle_axis_from_dquat(q);
        Self::validated(angle, axis)
    }

    /// Convert a rotation matrix, then validate the result.
    ///
    /// The input matrix itself is not checked. The conversion always produces a unit axis,
    /// so a scaled matrix or a reflection is accepted and mapped to some rotation; run
    /// [`check_rotation_matrix`](crate::check::check_rotation_matrix) first when the input
    /// is not known to be a rotation.
    pub fn from_rotation_matrix(rotation: &DMat3) -> GeometryResult<Self> {
        let (angle, axis) = angle_axis_from_dquat(DQuat::from_mat3(rotation));
        Self::validated(angle, axis)
    }

    /// Copy `other`, re-validating it.
    pub fn from_angle_axis(other: &Self) -> GeometryResult<Self> {
        Self::validated(other.angle, other.axis)
    }

    /// Sample a uniformly random rotation.
    pub fn from_random() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Sample a uniformly random rotation from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (angle, axis) = angle_axis_from_dquat(Quaternion::from_rng(rng).as_dquat());
        Self { angle, axis }
    }

    /// Rotation angle in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Unit rotation axis.
    #[inline]
    pub fn axis(&self) -> DVec3 {
        self.axis
    }

    /// Replace the angle, keeping the axis.
    ///
    /// Not validated: the axis already satisfies its invariant and the angle has none.
    #[inline]
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Replace the axis, keeping the angle.
    ///
    /// # Errors
    ///
    /// Fails if `axis` is not unit; `self` is left unchanged.
    pub fn set_axis(&mut self, axis: DVec3) -> GeometryResult<()> {
        *self = Self::validated(self.angle, axis)?;
        Ok(())
    }

    /// The equivalent rotation matrix (Rodrigues' formula) about the normalized axis.
    #[inline]
    pub fn rotation(&self) -> DMat3 {
        DMat3::from_axis_angle(self.axis.normalize(), self.angle)
    }

    /// Replace the value from a rotation matrix.
    pub fn set_rotation(&mut self, rotation: &DMat3) -> GeometryResult<()> {
        *self = Self::from_rotation_matrix(rotation)?;
        Ok(())
    }

    /// The equivalent unit quaternion `(cos(θ/2), sin(θ/2)·axis)`.
    pub fn quaternion(&self) -> GeometryResult<Quaternion> {
        Quaternion::try_from(DQuat::from_axis_angle(self.axis.normalize(), self.angle))
    }

    /// Replace the value from a quaternion, which is validated first.
    pub fn set_quaternion(&mut self, quaternion: &Quaternion) -> GeometryResult<()> {
        *self = Self::from_quaternion(quaternion)?;
        Ok(())
    }

    /// Compose two rotations through their quaternions: `self · other` applies `other` first.
    pub fn multiply(&self, other: &Self) -> Self {
        let q = DQuat::from_axis_angle(self.axis, self.angle)
            * DQuat::from_axis_angle(other.axis, other.angle);
        let (angle, axis) = angle_axis_from_dquat(q);
        Self { angle, axis }
    }

    /// Rotate a point.
    #[inline]
    pub fn rotate(&self, point: DVec3) -> DVec3 {
        self.rotation() * point
    }

    /// The inverse rotation: same axis, negated angle.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            angle: -self.angle,
            axis: self.axis,
        }
    }
}

impl Default for AngleAxis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul<AngleAxis> for AngleAxis {
    type Output = AngleAxis;

    #[inline]
    fn mul(self, rhs: AngleAxis) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl fmt::Display for AngleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AngleAxis(angle={}, axis=[{}, {}, {}])",
            self.angle, self.axis.x, self.axis.y, self.axis.z
        )
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for AngleAxis {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        crate::check::TOLERANCE
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.angle, &other.angle, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.axis, &other.axis, epsilon)
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for AngleAxis {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        crate::check::TOLERANCE
    }

    #[inline]
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        approx::RelativeEq::relative_eq(&self.angle, &other.angle, epsilon, max_relative)
            && approx::RelativeEq::relative_eq(&self.axis, &other.axis, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryError;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_identity() {
        let a = AngleAxis::identity();
        assert_eq!(a.angle(), 0.0);
        assert_eq!(a.axis(), DVec3::X);
        assert!(a.rotation().abs_diff_eq(DMat3::IDENTITY, EPSILON));
        assert_eq!(a, AngleAxis::default());
    }

    #[test]
    fn test_new() {
        let a = AngleAxis::new(FRAC_PI_2, DVec3::Z).unwrap();
        assert_relative_eq!(a.angle(), FRAC_PI_2);
        assert_eq!(a.axis(), DVec3::Z);

        let err = AngleAxis::new(FRAC_PI_2, DVec3::new(0.0, 0.0, 2.0)).unwrap_err();
        assert!(matches!(err, GeometryError::AxisNotNormalized(_)));
    }

    #[test]
    fn test_unconstrained_angle() {
        assert!(AngleAxis::new(-7.0, DVec3::Y).is_ok());
        assert!(AngleAxis::new(5.0 * PI, DVec3::Y).is_ok());
    }

    #[test]
    fn test_from_quaternion() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let q = Quaternion::new(h, 0.0, 0.0, h).unwrap();
        let a = AngleAxis::from_quaternion(&q).unwrap();
        assert_relative_eq!(a.angle(), FRAC_PI_2, epsilon = EPSILON);
        assert!(a.axis().abs_diff_eq(DVec3::Z, EPSILON));
    }

    #[test]
    fn test_from_quaternion_negative_w() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let q = Quaternion::new(-h, 0.0, 0.0, h).unwrap();
        let a = AngleAxis::from_quaternion(&q).unwrap();
        assert_relative_eq!(a.angle(), FRAC_PI_2, epsilon = EPSILON);
        assert!(a.axis().abs_diff_eq(-DVec3::Z, EPSILON));
    }

    #[test]
    fn test_from_identity_quaternion() {
        let a = AngleAxis::from_quaternion(&Quaternion::identity()).unwrap();
        assert_eq!(a, AngleAxis::IDENTITY);
    }

    #[test]
    fn test_from_rotation_matrix() {
        let r = DMat3::from_rotation_y(0.6);
        let a = AngleAxis::from_rotation_matrix(&r).unwrap();
        assert_relative_eq!(a.angle(), 0.6, epsilon = EPSILON);
        assert!(a.axis().abs_diff_eq(DVec3::Y, EPSILON));
        assert!(a.rotation().abs_diff_eq(r, EPSILON));
    }

    #[test]
    fn test_from_angle_axis() {
        let a = AngleAxis::new(1.0, DVec3::X).unwrap();
        assert_eq!(AngleAxis::from_angle_axis(&a).unwrap(), a);
    }

    #[test]
    fn test_set_angle() {
        let mut a = AngleAxis::new(1.0, DVec3::Z).unwrap();
        a.set_angle(-3.0);
        assert_eq!(a.angle(), -3.0);
        assert_eq!(a.axis(), DVec3::Z);
    }

    #[test]
    fn test_set_axis() {
        let mut a = AngleAxis::new(1.0, DVec3::Z).unwrap();
        a.set_axis(DVec3::Y).unwrap();
        assert_eq!(a.axis(), DVec3::Y);
        assert_eq!(a.angle(), 1.0);

        let before = a;
        assert!(a.set_axis(DVec3::new(1.0, 1.0, 0.0)).is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn test_set_rotation_and_quaternion() {
        let mut a = AngleAxis::identity();
        a.set_rotation(&DMat3::from_rotation_x(0.4)).unwrap();
        assert_relative_eq!(a.angle(), 0.4, epsilon = EPSILON);
        assert!(a.axis().abs_diff_eq(DVec3::X, EPSILON));

        let q = Quaternion::new(0.0, 0.0, 1.0, 0.0).unwrap();
        a.set_quaternion(&q).unwrap();
        assert_relative_eq!(a.angle(), PI, epsilon = EPSILON);
        assert!(a.axis().abs_diff_eq(DVec3::Y, EPSILON));
    }

    #[test]
    fn test_quaternion() {
        let a = AngleAxis::new(FRAC_PI_2, DVec3::X).unwrap();
        let q = a.quaternion().unwrap();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(q.wxyz().abs_diff_eq(glam::DVec4::new(h, h, 0.0, 0.0), EPSILON));
    }

    #[test]
    fn test_multiply() {
        let a = AngleAxis::new(0.3, DVec3::Z).unwrap();
        let b = AngleAxis::new(0.5, DVec3::Z).unwrap();
        let ab = a * b;
        assert_relative_eq!(ab.angle(), 0.8, epsilon = EPSILON);
        assert!(ab.axis().abs_diff_eq(DVec3::Z, EPSILON));
        assert!(ab.rotation().abs_diff_eq(a.rotation() * b.rotation(), EPSILON));
    }

    #[test]
    fn test_inverse() {
        let a = AngleAxis::new(0.7, DVec3::new(1.0, 2.0, 2.0) / 3.0).unwrap();
        let inv = a.inverse();
        assert_eq!(inv.angle(), -0.7);
        assert_eq!(inv.axis(), a.axis());
        assert!((a.rotation() * inv.rotation()).abs_diff_eq(DMat3::IDENTITY, EPSILON));
    }

    #[test]
    fn test_rotate() {
        let a = AngleAxis::new(FRAC_PI_2, DVec3::Z).unwrap();
        assert!(a.rotate(DVec3::X).abs_diff_eq(DVec3::Y, EPSILON));
    }

    #[test]
    fn test_axis_within_tolerance() {
        let a = AngleAxis::new(1.3, DVec3::new(0.0, 1.0 + 9e-6, 0.0)).unwrap();
        assert!(crate::check::check_rotation_matrix(&a.rotation()).is_ok());
        assert!(a.rotation().abs_diff_eq(DMat3::from_rotation_y(1.3), EPSILON));
        let q = a.quaternion().unwrap();
        assert_relative_eq!(q.wxyz().length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_rotation_matrix_does_not_check_input() {
        let reflection = DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0));
        let a = AngleAxis::from_rotation_matrix(&reflection).unwrap();
        assert_relative_eq!(a.axis().length(), 1.0, epsilon = EPSILON);
        assert!(!a.rotation().abs_diff_eq(reflection, EPSILON));
    }

    #[test]
    fn test_display() {
        let a = AngleAxis::identity();
        assert_eq!(a.to_string(), "AngleAxis(angle=0, axis=[1, 0, 0])");
    }
}
