//! Principal moment of inertia.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{BodyVec, MotionError, Result};

/// Diagonal moment of inertia in the body frame, taken about the centre of
/// rotation.
///
/// Only valid while the body axes coincide with the principal axes; the
/// integrator keeps the tensor fixed and rotates the frame instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalInertia(Vector3<f64>);

impl PrincipalInertia {
    /// Build from the three principal moments.
    ///
    /// Zero, negative, or non-finite components are rejected: they would feed
    /// divisions inside the rotation kernel.
    pub fn new(diagonal: Vector3<f64>) -> Result<Self> {
        if diagonal.iter().any(|&i| !i.is_finite() || i <= 0.0) {
            return Err(MotionError::invalid_inertia(format!(
                "principal components must be positive and finite, got [{}, {}, {}]",
                diagonal.x, diagonal.y, diagonal.z
            )));
        }
        Ok(Self(diagonal))
    }

    /// Inertia of a uniform solid sphere, `2/5 m r^2` on every axis.
    pub fn solid_sphere(mass: f64, radius: f64) -> Result<Self> {
        Self::new(Vector3::repeat(0.4 * mass * radius * radius))
    }

    /// The principal moments.
    #[must_use]
    pub const fn diagonal(&self) -> Vector3<f64> {
        self.0
    }

    /// Angular momentum of a body-frame angular velocity, `I w`.
    #[must_use]
    pub fn moment(&self, omega: BodyVec) -> BodyVec {
        BodyVec(self.0.component_mul(&omega.0))
    }

    /// Body-frame angular velocity recovered from momentum, `I^-1 pi`.
    #[must_use]
    pub fn solve(&self, pi: BodyVec) -> BodyVec {
        BodyVec(pi.0.component_div(&self.0))
    }
}
