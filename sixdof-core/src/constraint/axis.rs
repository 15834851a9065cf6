//! Rotation confined to one global axis.

use nalgebra::{Unit, Vector3};
use sixdof_types::{
    BodyVec, ConstraintSpec, GlobalVec, MotionError, MotionState, Result, ORTHONORMAL_TOL,
};

use super::Constraint;

/// Keeps only the momentum-rate component about a fixed global axis.
///
/// The axis is mapped into the body frame through the live orientation before
/// projecting, so the lock tracks the global axis exactly however the body
/// has turned.
///
/// Coefficients: `axis` (global direction, need not be unit length).
#[derive(Debug, Clone, PartialEq)]
pub struct FixedAxis {
    name: String,
    axis: Unit<Vector3<f64>>,
}

impl FixedAxis {
    /// Build from a specification.
    pub fn build(spec: &ConstraintSpec) -> Result<Box<dyn Constraint>> {
        let axis = Unit::try_new(spec.coeffs.vector("axis")?, ORTHONORMAL_TOL).ok_or_else(|| {
            MotionError::invalid_config(format!(
                "axis constraint {:?}: axis must be non-zero",
                spec.name
            ))
        })?;
        Ok(Box::new(Self {
            name: spec.name.clone(),
            axis,
        }))
    }
}

impl Constraint for FixedAxis {
    fn name(&self) -> &str {
        &self.name
    }

    fn correct(
        &self,
        state: &MotionState,
        accel: GlobalVec,
        pi_dot: BodyVec,
    ) -> (GlobalVec, BodyVec) {
        let body_axis = state.orientation.to_body(GlobalVec(self.axis.into_inner())).0;
        (accel, BodyVec(body_axis * pi_dot.0.dot(&body_axis)))
    }
}
