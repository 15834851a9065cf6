//! Degree-of-freedom projection tensors.
//!
//! Translational and rotational locks are expressed as orthogonal projections
//! onto the allowed directions: identity passes everything, a plane tensor
//! removes the normal component, a line tensor keeps only one direction, zero
//! locks every axis. Applying a projection twice changes nothing, so the
//! integrator can project at several points of the step without compounding.

use nalgebra::{Matrix3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::{BodyVec, GlobalVec, MotionError, Result, ORTHONORMAL_TOL};

/// Symmetric idempotent tensor projecting motion onto its allowed directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintProjection(Matrix3<f64>);

impl Default for ConstraintProjection {
    fn default() -> Self {
        Self::free()
    }
}

impl ConstraintProjection {
    /// All directions allowed: the identity.
    #[must_use]
    pub fn free() -> Self {
        Self(Matrix3::identity())
    }

    /// Every direction locked: the zero tensor.
    #[must_use]
    pub fn locked() -> Self {
        Self(Matrix3::zeros())
    }

    /// Motion confined to the plane with the given normal, `I - n n^T`.
    pub fn plane(normal: Vector3<f64>) -> Result<Self> {
        let n = Unit::try_new(normal, ORTHONORMAL_TOL)
            .ok_or_else(|| MotionError::invalid_projection("plane normal must be non-zero"))?;
        let n = n.into_inner();
        Ok(Self(Matrix3::identity() - n * n.transpose()))
    }

    /// Motion confined to the given direction, `d d^T`.
    pub fn line(direction: Vector3<f64>) -> Result<Self> {
        let d = Unit::try_new(direction, ORTHONORMAL_TOL)
            .ok_or_else(|| MotionError::invalid_projection("line direction must be non-zero"))?;
        let d = d.into_inner();
        Ok(Self(d * d.transpose()))
    }

    /// Build from an explicit tensor, rejecting anything that is not a
    /// symmetric idempotent within [`ORTHONORMAL_TOL`].
    pub fn from_matrix(m: Matrix3<f64>) -> Result<Self> {
        if m.iter().any(|c| !c.is_finite()) {
            return Err(MotionError::invalid_projection(
                "tensor has non-finite entries",
            ));
        }
        let asym = (m - m.transpose()).norm();
        if asym > ORTHONORMAL_TOL {
            return Err(MotionError::invalid_projection(format!(
                "tensor is not symmetric (deviation {asym:.3e})"
            )));
        }
        let drift = (m * m - m).norm();
        if drift > ORTHONORMAL_TOL {
            return Err(MotionError::invalid_projection(format!(
                "tensor is not idempotent (P^2 - P deviates by {drift:.3e})"
            )));
        }
        Ok(Self(m))
    }

    /// The wrapped tensor.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// Project a global-frame vector onto the allowed directions.
    #[must_use]
    pub fn project_global(&self, v: GlobalVec) -> GlobalVec {
        GlobalVec(self.0 * v.0)
    }

    /// Project a body-frame vector onto the allowed directions.
    #[must_use]
    pub fn project_body(&self, v: BodyVec) -> BodyVec {
        BodyVec(self.0 * v.0)
    }

    /// `true` when the projection passes everything through.
    #[must_use]
    pub fn is_free(&self) -> bool {
        (self.0 - Matrix3::identity()).norm() <= ORTHONORMAL_TOL
    }
}

/// Named description of the locked axes, built into a tensor at
/// configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionSpec {
    /// All three directions allowed.
    #[default]
    Free,
    /// All three directions locked.
    Locked,
    /// Motion confined to the plane with this normal.
    Plane {
        /// Plane normal; need not be unit length.
        normal: Vector3<f64>,
    },
    /// Motion confined to this direction.
    Line {
        /// Line direction; need not be unit length.
        direction: Vector3<f64>,
    },
    /// Explicit projection tensor.
    Tensor(Matrix3<f64>),
}

impl ProjectionSpec {
    /// Build and validate the projection tensor.
    pub fn build(&self) -> Result<ConstraintProjection> {
        match *self {
            Self::Free => Ok(ConstraintProjection::free()),
            Self::Locked => Ok(ConstraintProjection::locked()),
            Self::Plane { normal } => ConstraintProjection::plane(normal),
            Self::Line { direction } => ConstraintProjection::line(direction),
            Self::Tensor(m) => ConstraintProjection::from_matrix(m),
        }
    }
}
