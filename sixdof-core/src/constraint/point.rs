//! Translation locked entirely.

use sixdof_types::{BodyVec, ConstraintSpec, GlobalVec, MotionState, Result};

use super::Constraint;

/// Zeroes the linear acceleration: the centre of rotation stays put while the
/// body remains free to rotate about it.
///
/// No coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint {
    name: String,
}

impl FixedPoint {
    /// Build from a specification.
    pub fn build(spec: &ConstraintSpec) -> Result<Box<dyn Constraint>> {
        Ok(Box::new(Self {
            name: spec.name.clone(),
        }))
    }
}

impl Constraint for FixedPoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn correct(
        &self,
        _state: &MotionState,
        _accel: GlobalVec,
        pi_dot: BodyVec,
    ) -> (GlobalVec, BodyVec) {
        (GlobalVec::zeros(), pi_dot)
    }
}
