//! Translation confined to a line.

use nalgebra::{Unit, Vector3};
use sixdof_types::{
    BodyVec, ConstraintSpec, GlobalVec, MotionError, MotionState, Result, ORTHONORMAL_TOL,
};

use super::Constraint;

/// Keeps only the acceleration component along a fixed global direction.
///
/// Coefficients: `direction` (global, need not be unit length).
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLine {
    name: String,
    direction: Unit<Vector3<f64>>,
}

impl FixedLine {
    /// Build from a specification.
    pub fn build(spec: &ConstraintSpec) -> Result<Box<dyn Constraint>> {
        let direction =
            Unit::try_new(spec.coeffs.vector("direction")?, ORTHONORMAL_TOL).ok_or_else(|| {
                MotionError::invalid_config(format!(
                    "line constraint {:?}: direction must be non-zero",
                    spec.name
                ))
            })?;
        Ok(Box::new(Self {
            name: spec.name.clone(),
            direction,
        }))
    }
}

impl Constraint for FixedLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn correct(
        &self,
        _state: &MotionState,
        accel: GlobalVec,
        pi_dot: BodyVec,
    ) -> (GlobalVec, BodyVec) {
        let d = self.direction.into_inner();
        (GlobalVec(d * accel.0.dot(&d)), pi_dot)
    }
}
