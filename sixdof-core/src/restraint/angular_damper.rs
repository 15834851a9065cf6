//! Uniform angular drag.

use sixdof_types::{RestraintSpec, Result};

use super::{Restraint, RestraintLoad};
use crate::RigidBodyMotion;

/// Drag moment opposing the angular velocity.
///
/// Coefficients: `coeff` (moment per unit angular velocity).
#[derive(Debug, Clone, PartialEq)]
pub struct AngularDamper {
    name: String,
    coeff: f64,
}

impl AngularDamper {
    /// Build from a specification.
    pub fn build(spec: &RestraintSpec) -> Result<Box<dyn Restraint>> {
        Ok(Box::new(Self {
            name: spec.name.clone(),
            coeff: spec.coeffs.scalar("coeff")?,
        }))
    }
}

impl Restraint for AngularDamper {
    fn name(&self) -> &str {
        &self.name
    }

    fn restrain(&self, motion: &RigidBodyMotion) -> RestraintLoad {
        RestraintLoad::moment_only(motion.angular_velocity() * -self.coeff)
    }
}
