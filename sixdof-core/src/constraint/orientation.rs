//! Rotation locked entirely.

use sixdof_types::{BodyVec, ConstraintSpec, GlobalVec, MotionState, Result};

use super::Constraint;

/// Zeroes the momentum rate: the orientation stays fixed while the body
/// remains free to translate.
///
/// No coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedOrientation {
    name: String,
}

impl FixedOrientation {
    /// Build from a specification.
    pub fn build(spec: &ConstraintSpec) -> Result<Box<dyn Constraint>> {
        Ok(Box::new(Self {
            name: spec.name.clone(),
        }))
    }
}

impl Constraint for FixedOrientation {
    fn name(&self) -> &str {
        &self.name
    }

    fn correct(
        &self,
        _state: &MotionState,
        accel: GlobalVec,
        _pi_dot: BodyVec,
    ) -> (GlobalVec, BodyVec) {
        (accel, BodyVec::zeros())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use sixdof_types::Coeffs;

    #[test]
    fn test_momentum_rate_zeroed() {
        let spec = ConstraintSpec::new("no_spin", "orientation", Coeffs::new());
        let constraint = FixedOrientation::build(&spec).unwrap();

        let (accel, pi_dot) = constraint.correct(
            &MotionState::default(),
            GlobalVec::new(1.0, 0.0, 0.0),
            BodyVec::new(5.0, -1.0, 2.0),
        );
        assert_eq!(accel, GlobalVec::new(1.0, 0.0, 0.0));
        assert_eq!(pi_dot, BodyVec::zeros());
    }
}
