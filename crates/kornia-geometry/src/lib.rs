#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Geometry
//!
//! Three mutually convertible representations of a 3D rotation or rigid transform, each of
//! which upholds its defining invariant for its whole lifetime:
//!
//! | Type | Invariant |
//! |------|-----------|
//! | [`Transform`] | rotation block orthonormal with `det = 1`, bottom row `[0, 0, 0, 1]` |
//! | [`Quaternion`] | `‖(w, x, y, z)‖ = 1` |
//! | [`AngleAxis`] | `‖axis‖ = 1`, angle unconstrained |
//!
//! Every constructor and setter builds a candidate, runs the checks in [`check`] against
//! [`TOLERANCE`] and only then commits it. A failed check returns a [`GeometryError`] and
//! leaves the existing value untouched. Composition and inversion preserve the invariants
//! and are not re-validated.
//!
//! ## Example
//!
//! ```rust
//! use kornia_geometry::{glam::DVec3, AngleAxis, Transform};
//!
//! let rotation = AngleAxis::new(std::f64::consts::FRAC_PI_2, DVec3::Z)?;
//! let quaternion = rotation.quaternion()?;
//! let x = Transform::from_quaternion_translation(&quaternion, DVec3::new(1.0, 0.0, 0.0))?;
//!
//! let p = x.transform_point(DVec3::X);
//! assert!(p.abs_diff_eq(DVec3::new(1.0, 1.0, 0.0), 1e-9));
//!
//! // axis is not unit
//! assert!(AngleAxis::new(1.0, DVec3::new(0.0, 0.0, 2.0)).is_err());
//! # Ok::<(), kornia_geometry::GeometryError>(())
//! ```

/// Angle-axis rotations.
pub mod angle_axis;

/// Tolerance checks for every invariant.
pub mod check;

/// Error types.
pub mod error;

/// Unit quaternions.
pub mod quaternion;

/// Rigid transforms in SE(3).
pub mod transform;

pub use angle_axis::AngleAxis;
pub use check::TOLERANCE;
pub use error::{GeometryError, GeometryResult};
pub use quaternion::Quaternion;
pub use transform::Transform;

// Re-export glam so callers can build inputs without a matching direct dependency.
pub use glam;
