//! Rigid body transform restricted to SE(3).
//!
//! A [`Transform`] is a rotation and a translation. Its homogeneous form is
//!
//! ```text
//! | R t |
//! | 0 1 |
//! ```
//!
//! Reflections, shears and scaling are rejected rather than supported.

use std::fmt;

use glam::{DMat3, DMat4, DVec3, DVec4};
use rand::Rng;

use crate::{
    check::{check_quaternion, check_rotation_matrix, check_se3},
    error::{GeometryError, GeometryResult},
    quaternion::Quaternion,
};

/// A proper rigid transform: orthonormal rotation with determinant +1, plus a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rotation: DMat3,
    translation: DVec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a transform from a 4x4 homogeneous matrix.
    ///
    /// # Errors
    ///
    /// Fails if the rotation block is not a proper rotation or if the bottom row is not
    /// `[0, 0, 0, 1]`.
    pub fn from_matrix(matrix: &DMat4) -> GeometryResult<Self> {
        check_se3(matrix)?;
        Ok(Self {
            rotation: DMat3::from_mat4(*matrix),
            translation: matrix.w_axis.truncate(),
        })
    }

    /// Create a transform from a rotation matrix and a translation.
    ///
    /// # Errors
    ///
    /// Fails if `rotation` is not a proper rotation.
    pub fn from_rotation_translation(rotation: &DMat3, translation: DVec3) -> GeometryResult<Self> {
        check_rotation_matrix(rotation)?;
        Ok(Self {
            rotation: *rotation,
            translation,
        })
    }

    /// Create a transform from a quaternion and a translation.
    ///
    /// # Errors
    ///
    /// Fails if `quaternion` is not unit.
    pub fn from_quaternion_translation(
        quaternion: &Quaternion,
        translation: DVec3,
    ) -> GeometryResult<Self> {
        check_quaternion(&quaternion.as_dquat())?;
        Ok(Self {
            rotation: quaternion.rotation(),
            translation,
        })
    }

    /// Copy `other`, re-validating it.
    ///
    /// # Errors
    ///
    /// Fails if `other` is not a valid SE(3) transform.
    pub fn from_transform(other: &Self) -> GeometryResult<Self> {
        Self::from_matrix(&other.matrix())
    }

    /// Sample a uniformly random rotation with a translation in `[-1, 1)³`.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();
        let quaternion = Quaternion::from_rng(&mut rng);
        let translation = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        Self {
            rotation: quaternion.rotation(),
            translation,
        }
    }

    /// The 4x4 homogeneous matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_cols(
            self.rotation.x_axis.extend(0.0),
            self.rotation.y_axis.extend(0.0),
            self.rotation.z_axis.extend(0.0),
            self.translation.extend(1.0),
        )
    }

    /// Replace the whole transform from a 4x4 homogeneous matrix.
    ///
    /// # Errors
    ///
    /// Same as [`Transform::from_matrix`]; `self` is left unchanged.
    pub fn set_matrix(&mut self, matrix: &DMat4) -> GeometryResult<()> {
        *self = Self::from_matrix(matrix)?;
        Ok(())
    }

    /// The translation part.
    #[inline]
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// Replace the translation. Any translation is valid.
    #[inline]
    pub fn set_translation(&mut self, translation: DVec3) {
        self.translation = translation;
    }

    /// The rotation block.
    #[inline]
    pub fn rotation(&self) -> DMat3 {
        self.rotation
    }

    /// Replace the rotation block.
    ///
    /// # Errors
    ///
    /// Fails if `rotation` is not a proper rotation; `self` is left unchanged.
    pub fn set_rotation(&mut self, rotation: &DMat3) -> GeometryResult<()> {
        *self = Self::from_rotation_translation(rotation, self.translation)?;
        Ok(())
    }

    /// The rotation block as a quaternion.
    ///
    /// # Errors
    ///
    /// Fails if the converted quaternion is not unit, which cannot happen for a transform
    /// that passed validation.
    pub fn quaternion(&self) -> GeometryResult<Quaternion> {
        Quaternion::from_rotation_matrix(&self.rotation)
    }

    /// Replace the rotation block from a quaternion.
    ///
    /// # Errors
    ///
    /// Fails if `quaternion` is not unit; `self` is left unchanged.
    pub fn set_quaternion(&mut self, quaternion: &Quaternion) -> GeometryResult<()> {
        *self = Self::from_quaternion_translation(quaternion, self.translation)?;
        Ok(())
    }

    /// Compose two transforms: `self · other` applies `other` first.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Apply the transform to a point: rotate, then translate.
    #[inline]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    /// The inverse transform `(Rᵗ, -Rᵗ·t)`.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.transpose();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<DMat4> for Transform {
    type Error = GeometryError;

    fn try_from(matrix: DMat4) -> Result<Self, Self::Error> {
        Self::from_matrix(&matrix)
    }
}

impl From<Transform> for DMat4 {
    #[inline]
    fn from(transform: Transform) -> Self {
        transform.matrix()
    }
}

impl std::ops::Mul<Transform> for Transform {
    type Output = Transform;

    #[inline]
    fn mul(self, rhs: Transform) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl std::ops::MulAssign<Transform> for Transform {
    #[inline]
    fn mul_assign(&mut self, rhs: Transform) {
        *self = self.multiply(&rhs);
    }
}

impl std::ops::Mul<DVec3> for Transform {
    type Output = DVec3;

    #[inline]
    fn mul(self, rhs: DVec3) -> Self::Output {
        self.transform_point(rhs)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix();
        for i in 0..4 {
            let DVec4 { x, y, z, w } = m.row(i);
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{x}, {y}, {z}, {w}]")?;
        }
        Ok(())
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for Transform {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        crate::check::TOLERANCE
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.rotation, &other.rotation, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.translation, &other.translation, epsilon)
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for Transform {
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
        approx::RelativeEq::relative_eq(&self.rotation, &other.rotation, epsilon, max_relative)
            && approx::RelativeEq::relative_eq(
                &self.translation,
                &other.translation,
                epsilon,
                max_relative,
            )
    }
}
