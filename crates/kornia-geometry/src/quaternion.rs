//! Unit quaternion representing a 3D rotation.
//!
//! Components are exposed in `(w, x, y, z)` order. There is no per-component setter: the
//! value is only ever replaced as a whole, so a non-unit intermediate state can never be
//! observed.

use std::fmt;

use glam::{DMat3, DQuat, DVec3, DVec4};
use rand::Rng;

use crate::{
    check::check_quaternion,
    error::{GeometryError, GeometryResult},
};

/// A unit quaternion, `‖(w, x, y, z)‖ = 1` within [`TOLERANCE`](crate::check::TOLERANCE).
///
/// `q` and `-q` represent the same rotation; comparisons across conversions must accept
/// either sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    q: DQuat,
}

impl Quaternion {
    /// The identity rotation `(1, 0, 0, 0)`.
    pub const IDENTITY: Self = Self { q: DQuat::IDENTITY };

    /// The identity rotation.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    fn validated(q: DQuat) -> GeometryResult<Self> {
        check_quaternion(&q)?;
        Ok(Self { q })
    }

    /// Validate `candidate` and replace `self` only if it passes.
    fn commit(&mut self, candidate: DQuat) -> GeometryResult<()> {
        *self = Self::validated(candidate)?;
        Ok(())
    }

    /// Wrap a quaternion produced by an operation that preserves unit norm.
    #[inline]
    pub(crate) fn from_unit(q: DQuat) -> Self {
        Self { q }
    }

    /// Create a quaternion from its four scalar components.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`] if the components do not have unit norm.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> GeometryResult<Self> {
        Self::validated(DQuat::from_xyzw(x, y, z, w))
    }

    /// Create a quaternion from a 4-vector in `(w, x, y, z)` order.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`] if the vector does not have unit norm.
    pub fn from_wxyz(wxyz: DVec4) -> GeometryResult<Self> {
        Self::new(wxyz.x, wxyz.y, wxyz.z, wxyz.w)
    }

    /// Convert a rotation matrix into a quaternion, then validate the result.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`] if the converted quaternion is not unit,
    /// which happens when `rotation` is scaled or otherwise not a rotation.
    pub fn from_rotation_matrix(rotation: &DMat3) -> GeometryResult<Self> {
        Self::validated(DQuat::from_mat3(rotation))
    }

    /// Copy `other`, re-validating it.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`] if `other` does not have unit norm.
    pub fn from_quaternion(other: &Self) -> GeometryResult<Self> {
        Self::validated(other.q)
    }

    /// Sample a rotation uniformly using the thread-local generator.
    pub fn from_random() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Sample a rotation uniformly (Shoemake's method).
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        let one_minus_r1_sqrt = (1.0 - r1).sqrt();
        let r1_sqrt = r1.sqrt();

        let w = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).cos();
        let x = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).sin();
        let y = r1_sqrt * (2.0 * std::f64::consts::PI * r3).cos();
        let z = r1_sqrt * (2.0 * std::f64::consts::PI * r3).sin();

        Self::from_unit(DQuat::from_xyzw(x, y, z, w).normalize())
    }

    /// Real part.
    #[inline]
    pub fn w(&self) -> f64 {
        self.q.w
    }

    /// First imaginary component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.q.x
    }

    /// Second imaginary component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.q.y
    }

    /// Third imaginary component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.q.z
    }

    /// Imaginary part `(x, y, z)`.
    #[inline]
    pub fn xyz(&self) -> DVec3 {
        self.q.xyz()
    }

    /// All components in `(w, x, y, z)` order.
    #[inline]
    pub fn wxyz(&self) -> DVec4 {
        DVec4::new(self.q.w, self.q.x, self.q.y, self.q.z)
    }

    /// The underlying glam quaternion.
    #[inline]
    pub fn as_dquat(&self) -> DQuat {
        self.q
    }

    /// Replace the value from a 4-vector in `(w, x, y, z)` order.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`]; `self` is left unchanged.
    pub fn set_wxyz(&mut self, wxyz: DVec4) -> GeometryResult<()> {
        self.commit(DQuat::from_xyzw(wxyz.y, wxyz.z, wxyz.w, wxyz.x))
    }

    /// Replace the value from four scalar components.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`]; `self` is left unchanged.
    pub fn set_wxyz_components(&mut self, w: f64, x: f64, y: f64, z: f64) -> GeometryResult<()> {
        self.commit(DQuat::from_xyzw(x, y, z, w))
    }

    /// The equivalent rotation matrix.
    ///
    /// Converted from the normalized quaternion, so a norm anywhere inside the tolerance
    /// still yields an orthonormal matrix.
    #[inline]
    pub fn rotation(&self) -> DMat3 {
        DMat3::from_quat(self.q.normalize())
    }

    /// Replace the value from a rotation matrix.
    ///
    /// # Errors
    ///
    /// [`GeometryError::QuaternionNotNormalized`]; `self` is left unchanged.
    pub fn set_rotation(&mut self, rotation: &DMat3) -> GeometryResult<()> {
        self.commit(DQuat::from_mat3(rotation))
    }

    /// Hamilton product `self · other`, i.e. apply `other` first.
    ///
    /// The product is renormalized so norm errors of the factors do not compound.
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_unit((self.q * other.q).normalize())
    }

    /// Rotate a point.
    #[inline]
    pub fn rotate(&self, point: DVec3) -> DVec3 {
        self.q * point
    }

    /// Multiplicative inverse, `conj(q) / ‖q‖²`.
    pub fn inverse(&self) -> Self {
        let norm_sq = self.q.length_squared();
        let c = self.q.conjugate();
        Self::from_unit(DQuat::from_xyzw(
            c.x / norm_sq,
            c.y / norm_sq,
            c.z / norm_sq,
            c.w / norm_sq,
        ))
    }

    /// Conjugate `(w, -x, -y, -z)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::from_unit(self.q.conjugate())
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<DQuat> for Quaternion {
    type Error = GeometryError;

    fn try_from(q: DQuat) -> Result<Self, Self::Error> {
        Self::validated(q)
    }
}

impl TryFrom<DVec4> for Quaternion {
    type Error = GeometryError;

    fn try_from(wxyz: DVec4) -> Result<Self, Self::Error> {
        Self::from_wxyz(wxyz)
    }
}

impl From<Quaternion> for DQuat {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.q
    }
}

impl std::ops::Mul<Quaternion> for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn mul(self, rhs: Quaternion) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<DVec3> for Quaternion {
    type Output = DVec3;

    #[inline]
    fn mul(self, rhs: DVec3) -> Self::Output {
        self.rotate(rhs)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion(w={}, x={}, y={}, z={})",
            self.w(),
            self.x(),
            self.y(),
            self.z()
        )
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for Quaternion {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        crate::check::TOLERANCE
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.q, &other.q, epsilon)
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for Quaternion {
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
        approx::RelativeEq::relative_eq(&self.q, &other.q, epsilon, max_relative)
    }
}
