use thiserror::Error;

/// Error raised when a candidate value violates the invariant of its type.
///
/// Every variant carries the measured error, i.e. the quantity that was
/// compared against [`TOLERANCE`](crate::check::TOLERANCE).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// `R·Rᵗ` differs from the identity.
    #[error("Rotation matrix is not orthonormal (max |R·Rᵗ - I| = {0:e})")]
    NotOrthonormal(f64),

    /// `det(R)` differs from one, i.e. the matrix is a reflection or is scaled.
    #[error("Rotation matrix violates right-hand rule (|det(R) - 1| = {0:e})")]
    NotRightHanded(f64),

    /// The bottom row of a homogeneous matrix is not `[0, 0, 0, 1]`.
    #[error("Homogeneous matrix is improperly scaled (max |bottom row - [0, 0, 0, 1]| = {0:e})")]
    ImproperlyScaled(f64),

    /// The quaternion does not have unit norm.
    #[error("Quaternion is not normalized (|‖q‖ - 1| = {0:e})")]
    QuaternionNotNormalized(f64),

    /// The rotation axis does not have unit norm.
    #[error("Axis is not normalized (|‖axis‖ - 1| = {0:e})")]
    AxisNotNormalized(f64),
}

/// Result type alias for fallible geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
