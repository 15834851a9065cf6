//! Anchored linear spring-damper.

use nalgebra::Point3;
use sixdof_types::{GlobalVec, RestraintSpec, Result};

use super::{Restraint, RestraintLoad};
use crate::RigidBodyMotion;

/// Tension/compression spring between a fixed global anchor and an attachment
/// point carried with the body, with optional damping along the spring axis.
///
/// Coefficients: `anchor` (global point), `attachment` (point in the initial
/// configuration), `stiffness`, optional `damping` and `rest_length`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSpring {
    name: String,
    anchor: Point3<f64>,
    attachment: Point3<f64>,
    stiffness: f64,
    damping: f64,
    rest_length: f64,
}

impl LinearSpring {
    /// Build from a specification.
    pub fn build(spec: &RestraintSpec) -> Result<Box<dyn Restraint>> {
        Ok(Box::new(Self {
            name: spec.name.clone(),
            anchor: spec.coeffs.point("anchor")?,
            attachment: spec.coeffs.point("attachment")?,
            stiffness: spec.coeffs.scalar("stiffness")?,
            damping: spec.coeffs.scalar_or("damping", 0.0)?,
            rest_length: spec.coeffs.scalar_or("rest_length", 0.0)?,
        }))
    }
}

impl Restraint for LinearSpring {
    fn name(&self) -> &str {
        &self.name
    }

    fn restrain(&self, motion: &RigidBodyMotion) -> RestraintLoad {
        let attachment = motion.transformation().transform_point(self.attachment);
        let span = attachment - self.anchor;
        let length = span.norm();
        // Unit direction, force-free at the singular zero-extension point
        let direction = span / (length + f64::MIN_POSITIVE);

        let stretch_rate = direction.dot(&motion.velocity_at(attachment).0);
        let magnitude = -self.stiffness * (length - self.rest_length) - self.damping * stretch_rate;

        RestraintLoad::at_point(attachment, GlobalVec(direction * magnitude))
    }
}
