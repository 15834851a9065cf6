//! Uniform linear drag.

use sixdof_types::{RestraintSpec, Result};

use super::{Restraint, RestraintLoad};
use crate::RigidBodyMotion;

/// Drag force opposing the velocity of the centre of rotation.
///
/// Coefficients: `coeff` (force per unit velocity).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDamper {
    name: String,
    coeff: f64,
}

impl LinearDamper {
    /// Build from a specification.
    pub fn build(spec: &RestraintSpec) -> Result<Box<dyn Restraint>> {
        Ok(Box::new(Self {
            name: spec.name.clone(),
            coeff: spec.coeffs.scalar("coeff")?,
        }))
    }
}

impl Restraint for LinearDamper {
    fn name(&self) -> &str {
        &self.name
    }

    fn restrain(&self, motion: &RigidBodyMotion) -> RestraintLoad {
        // Acts through the centre of rotation: no moment contribution
        RestraintLoad::at_point(motion.centre_of_rotation(), motion.velocity() * -self.coeff)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use sixdof_types::{BodyConfig, Coeffs, GlobalVec, MotionCheckpoint, MotionState, Orientation};

    #[test]
    fn test_drag_opposes_velocity() {
        let state = MotionState {
            velocity: GlobalVec::new(2.0, 0.0, -1.0),
            ..MotionState::at_rest(Point3::origin(), Orientation::identity())
        };
        let motion = RigidBodyMotion::restore(
            &BodyConfig::new(1.0, Vector3::repeat(1.0)),
            MotionCheckpoint::fresh(state),
        )
        .unwrap();

        let spec = RestraintSpec::new(
            "drag",
            "linear_damper",
            Coeffs::new().with_scalar("coeff", 3.0),
        );
        let damper = LinearDamper::build(&spec).unwrap();
        let load = damper.restrain(&motion);

        assert_eq!(load.force, GlobalVec::new(-6.0, 0.0, 3.0));
        assert_eq!(load.position, Point3::origin());
    }
}
