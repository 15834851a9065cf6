//! Orientation-restoring angular spring.

use nalgebra::{Rotation3, UnitQuaternion};
use sixdof_types::{GlobalVec, Orientation, RestraintSpec, Result};

use super::{Restraint, RestraintLoad};
use crate::RigidBodyMotion;

/// Restoring moment pulling the orientation back toward a reference, equally
/// stiff about every axis, with optional damping on the angular velocity.
///
/// The moment is `-stiffness * theta * axis - damping * omega`, where
/// `theta * axis` is the rotation vector carrying the reference orientation
/// onto the current one, expressed in the global frame.
///
/// Coefficients: `stiffness`, optional `damping` and `reference_orientation`
/// (tensor, defaults to the identity).
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalAngularSpring {
    name: String,
    reference: Orientation,
    stiffness: f64,
    damping: f64,
}

impl SphericalAngularSpring {
    /// Build from a specification.
    pub fn build(spec: &RestraintSpec) -> Result<Box<dyn Restraint>> {
        let reference = spec
            .coeffs
            .tensor_or("reference_orientation", *Orientation::identity().matrix())?;
        Ok(Box::new(Self {
            name: spec.name.clone(),
            reference: Orientation::from_matrix(reference)?,
            stiffness: spec.coeffs.scalar("stiffness")?,
            damping: spec.coeffs.scalar_or("damping", 0.0)?,
        }))
    }
}

impl Restraint for SphericalAngularSpring {
    fn name(&self) -> &str {
        &self.name
    }

    fn restrain(&self, motion: &RigidBodyMotion) -> RestraintLoad {
        let relative = motion.orientation().relative_to(&self.reference);
        let rotation_vector =
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(relative))
                .scaled_axis();

        let moment = -self.stiffness * rotation_vector - self.damping * motion.angular_velocity().0;
        RestraintLoad::moment_only(GlobalVec(moment))
    }
}
