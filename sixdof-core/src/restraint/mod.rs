//! Restraints: retarding forces and moments accumulated before integration.
//!
//! A restraint reads the live motion and returns a [`RestraintLoad`]; it
//! never mutates the body. Loads are additive and order-independent, so any
//! number of restraints can be attached without interaction. Springs,
//! dampers, and catenary-like tethers all fit this shape.
//!
//! Instances are built by name through the [`RestraintRegistry`]; an unknown
//! kind is a configuration-time error, never a silent no-op.

mod angular_damper;
mod linear_damper;
mod linear_spring;
mod spherical_angular_spring;

pub use angular_damper::AngularDamper;
pub use linear_damper::LinearDamper;
pub use linear_spring::LinearSpring;
pub use spherical_angular_spring::SphericalAngularSpring;

use std::collections::HashMap;
use std::fmt;

use nalgebra::Point3;
use sixdof_types::{GlobalVec, MotionError, RestraintSpec, Result};

use crate::RigidBodyMotion;

/// Force and moment contribution of one restraint for the current step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestraintLoad {
    /// Global point the force acts through.
    pub position: Point3<f64>,
    /// Force in the global frame.
    pub force: GlobalVec,
    /// Additional pure moment in the global frame.
    pub moment: GlobalVec,
}

impl RestraintLoad {
    /// No contribution.
    #[must_use]
    pub fn none() -> Self {
        Self {
            position: Point3::origin(),
            force: GlobalVec::zeros(),
            moment: GlobalVec::zeros(),
        }
    }

    /// A pure force acting through `position`; the integrator derives the
    /// moment about the centre of rotation from the lever arm.
    #[must_use]
    pub fn at_point(position: Point3<f64>, force: GlobalVec) -> Self {
        Self {
            position,
            force,
            moment: GlobalVec::zeros(),
        }
    }

    /// A pure moment with no force.
    #[must_use]
    pub fn moment_only(moment: GlobalVec) -> Self {
        Self {
            position: Point3::origin(),
            force: GlobalVec::zeros(),
            moment,
        }
    }

    /// Add a pure moment on top of an existing load.
    #[must_use]
    pub fn with_moment(mut self, moment: GlobalVec) -> Self {
        self.moment = moment;
        self
    }
}

/// A retarding force/moment model attached to one body.
///
/// Implementations are read-only observers of the motion; they may consult
/// both the live and the previous-step state but must not hold mutable
/// references into the body.
pub trait Restraint: fmt::Debug + Send + Sync {
    /// Instance name used in diagnostics.
    fn name(&self) -> &str;

    /// Evaluate the load for the body's current state.
    fn restrain(&self, motion: &RigidBodyMotion) -> RestraintLoad;
}

/// Constructor registered for one restraint kind.
pub type RestraintBuilder = fn(&RestraintSpec) -> Result<Box<dyn Restraint>>;

/// Name-to-constructor table used while reading configuration.
///
/// The registry only lives for the duration of configuration loading; built
/// restraints are owned by the body afterwards.
#[derive(Debug, Clone)]
pub struct RestraintRegistry {
    builders: HashMap<String, RestraintBuilder>,
}

impl RestraintRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with the built-in restraint family.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("linear_spring", LinearSpring::build);
        registry.register("linear_damper", LinearDamper::build);
        registry.register("angular_damper", AngularDamper::build);
        registry.register("spherical_angular_spring", SphericalAngularSpring::build);
        registry
    }

    /// Register (or replace) the builder for a kind.
    pub fn register(&mut self, kind: impl Into<String>, builder: RestraintBuilder) {
        self.builders.insert(kind.into(), builder);
    }

    /// Build one restraint from its specification.
    pub fn build(&self, spec: &RestraintSpec) -> Result<Box<dyn Restraint>> {
        match self.builders.get(spec.kind.as_str()) {
            Some(builder) => builder(spec),
            None => Err(MotionError::UnknownRestraint(spec.kind.clone())),
        }
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for RestraintRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
