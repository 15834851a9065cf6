//! Constraints: ordered corrections to the trial acceleration.
//!
//! After the restraints have been summed and the projection tensors have
//! removed the locked directions, each constraint in configuration order
//! receives the trial linear acceleration and body-frame momentum rate and
//! returns the corrected pair. Later constraints see the output of earlier
//! ones, so the configured order is part of the model.
//!
//! Instances are built by name through the [`ConstraintRegistry`]; an
//! unknown kind is a configuration-time error.

mod axis;
mod line;
mod orientation;
mod plane;
mod point;

pub use axis::FixedAxis;
pub use line::FixedLine;
pub use orientation::FixedOrientation;
pub use plane::FixedPlane;
pub use point::FixedPoint;

use std::collections::HashMap;
use std::fmt;

use sixdof_types::{BodyVec, ConstraintSpec, GlobalVec, MotionError, MotionState, Result};

/// An order-significant corrector of the trial acceleration pair.
///
/// Implementations may hold their own parameters but must not mutate shared
/// state; the body applies corrections sequentially during the acceleration
/// update.
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Instance name used in diagnostics.
    fn name(&self) -> &str;

    /// Correct the trial linear acceleration and body-frame momentum rate.
    fn correct(
        &self,
        state: &MotionState,
        accel: GlobalVec,
        pi_dot: BodyVec,
    ) -> (GlobalVec, BodyVec);
}

/// Constructor registered for one constraint kind.
pub type ConstraintBuilder = fn(&ConstraintSpec) -> Result<Box<dyn Constraint>>;

/// Name-to-constructor table used while reading configuration.
#[derive(Debug, Clone)]
pub struct ConstraintRegistry {
    builders: HashMap<String, ConstraintBuilder>,
}

impl ConstraintRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with the built-in constraint family.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("plane", FixedPlane::build);
        registry.register("line", FixedLine::build);
        registry.register("point", FixedPoint::build);
        registry.register("axis", FixedAxis::build);
        registry.register("orientation", FixedOrientation::build);
        registry
    }

    /// Register (or replace) the builder for a kind.
    pub fn register(&mut self, kind: impl Into<String>, builder: ConstraintBuilder) {
        self.builders.insert(kind.into(), builder);
    }

    /// Build one constraint from its specification.
    pub fn build(&self, spec: &ConstraintSpec) -> Result<Box<dyn Constraint>> {
        match self.builders.get(spec.kind.as_str()) {
            Some(builder) => builder(spec),
            None => Err(MotionError::UnknownConstraint(spec.kind.clone())),
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

impl Default for ConstraintRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
