//! Translation confined to a plane.

use nalgebra::{Unit, Vector3};
use sixdof_types::{
    BodyVec, ConstraintSpec, GlobalVec, MotionError, MotionState, Result, ORTHONORMAL_TOL,
};

use super::Constraint;

/// Removes the acceleration component along a fixed global normal, keeping
/// translation inside the plane.
///
/// Coefficients: `normal` (global direction, need not be unit length).
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPlane {
    name: String,
    normal: Unit<Vector3<f64>>,
}

impl FixedPlane {
    /// Build from a specification.
    pub fn build(spec: &ConstraintSpec) -> Result<Box<dyn Constraint>> {
        let normal = Unit::try_new(spec.coeffs.vector("normal")?, ORTHONORMAL_TOL).ok_or_else(|| {
            MotionError::invalid_config(format!(
                "plane constraint {:?}: normal must be non-zero",
                spec.name
            ))
        })?;
        Ok(Box::new(Self {
            name: spec.name.clone(),
            normal,
        }))
    }
}

impl Constraint for FixedPlane {
    fn name(&self) -> &str {
        &self.name
    }

    fn correct(
        &self,
        _state: &MotionState,
        accel: GlobalVec,
        pi_dot: BodyVec,
    ) -> (GlobalVec, BodyVec) {
        let n = self.normal.into_inner();
        (GlobalVec(accel.0 - n * accel.0.dot(&n)), pi_dot)
    }
}
