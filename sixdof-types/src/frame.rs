//! Frame-typed vectors and the orientation tensor.
//!
//! Rigid-body motion mixes two coordinate frames: the fixed global frame the
//! body moves through, and the body-fixed frame the inertia tensor is
//! diagonal in. [`GlobalVec`] and [`BodyVec`] wrap the same `nalgebra` vector
//! but carry the frame in the type, so a cross-frame sum is a compile error
//! and every conversion goes explicitly through an [`Orientation`].

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{MotionError, Result};

/// Tolerance for orthonormality and projection-tensor validation.
pub const ORTHONORMAL_TOL: f64 = 1e-9;

/// A vector expressed in the global (inertial) frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalVec(pub Vector3<f64>);

/// A vector expressed in the body-fixed frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyVec(pub Vector3<f64>);

macro_rules! frame_vec_impls {
    ($name:ident) => {
        impl $name {
            /// Zero vector.
            #[must_use]
            pub fn zeros() -> Self {
                Self(Vector3::zeros())
            }

            /// Build from components.
            #[must_use]
            pub const fn new(x: f64, y: f64, z: f64) -> Self {
                Self(Vector3::new(x, y, z))
            }

            /// Euclidean norm.
            #[must_use]
            pub fn norm(&self) -> f64 {
                self.0.norm()
            }

            /// Squared Euclidean norm.
            #[must_use]
            pub fn norm_squared(&self) -> f64 {
                self.0.norm_squared()
            }

            /// Dot product with another vector in the same frame.
            #[must_use]
            pub fn dot(&self, other: Self) -> f64 {
                self.0.dot(&other.0)
            }

            /// Cross product with another vector in the same frame.
            #[must_use]
            pub fn cross(&self, other: Self) -> Self {
                Self(self.0.cross(&other.0))
            }

            /// `true` when every component is finite.
            #[must_use]
            pub fn is_finite(&self) -> bool {
                self.0.iter().all(|c| c.is_finite())
            }
        }

        impl From<Vector3<f64>> for $name {
            fn from(v: Vector3<f64>) -> Self {
                Self(v)
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }
    };
}

frame_vec_impls!(GlobalVec);
frame_vec_impls!(BodyVec);

/// Orientation tensor `Q` mapping body-frame vectors into the global frame.
///
/// Stored as a 3x3 proper-orthogonal matrix rather than a quaternion because
/// the rotation kernel composes exact single-axis tensors; a valid
/// orientation stays valid through integration without renormalisation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Orientation(Matrix3<f64>);

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Orientation {
    /// Identity orientation: body frame aligned with the global frame.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Build from a matrix, rejecting anything that is not a proper rotation
    /// within [`ORTHONORMAL_TOL`].
    pub fn from_matrix(m: Matrix3<f64>) -> Result<Self> {
        if m.iter().any(|c| !c.is_finite()) {
            return Err(MotionError::invalid_orientation(
                "matrix has non-finite entries",
            ));
        }
        let q = Self(m);
        let err = q.orthonormality_error();
        if err > ORTHONORMAL_TOL {
            return Err(MotionError::invalid_orientation(format!(
                "Q^T Q deviates from identity by {err:.3e}"
            )));
        }
        if m.determinant() < 0.0 {
            return Err(MotionError::invalid_orientation(
                "matrix is a reflection (determinant -1)",
            ));
        }
        Ok(q)
    }

    /// Build from a matrix the caller guarantees is a proper rotation.
    #[must_use]
    pub const fn from_matrix_unchecked(m: Matrix3<f64>) -> Self {
        Self(m)
    }

    /// The wrapped rotation matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// Express a body-frame vector in the global frame, `Q b`.
    #[must_use]
    pub fn to_global(&self, v: BodyVec) -> GlobalVec {
        GlobalVec(self.0 * v.0)
    }

    /// Express a global-frame vector in the body frame, `Q^T g`.
    #[must_use]
    pub fn to_body(&self, v: GlobalVec) -> BodyVec {
        BodyVec(self.0.transpose() * v.0)
    }

    /// Append a rotation expressed in the body frame, `Q R`.
    #[must_use]
    pub fn rotated_by(&self, r: &Matrix3<f64>) -> Self {
        Self(self.0 * r)
    }

    /// Relative rotation `Q Q_ref^T` carrying the reference frame onto this
    /// one, expressed in the global frame.
    #[must_use]
    pub fn relative_to(&self, reference: &Self) -> Matrix3<f64> {
        self.0 * reference.0.transpose()
    }

    /// Frobenius norm of `Q^T Q - I`; zero for an exactly orthonormal tensor.
    #[must_use]
    pub fn orthonormality_error(&self) -> f64 {
        (self.0.transpose() * self.0 - Matrix3::identity()).norm()
    }

    /// `true` when every entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}
