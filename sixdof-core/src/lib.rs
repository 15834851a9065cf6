//! Six-degree-of-freedom rigid-body motion integrator.
//!
//! This crate advances a single rigid body under arbitrary external loads
//! using a symplectic leapfrog scheme. It builds on [`sixdof_types`] for the
//! data structures.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RigidBodyMotion                       │
//! │  Orchestrates: half-kick → drift/rotate → loads → half-kick │
//! └──────────┬──────────────────────┬───────────────────────────┘
//!            │                      │
//!            ▼                      ▼
//! ┌─────────────────────┐  ┌───────────────────────────────────┐
//! │     Restraints      │  │           Constraints             │
//! │  Springs, dampers:  │  │  Planes, lines, axes: ordered     │
//! │  additive loads     │  │  corrections of the acceleration  │
//! └─────────────────────┘  └───────────────────────────────────┘
//!            │                      │
//!            ▼                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      symplectic_rotate                      │
//! │  Palindromic single-axis splitting of the free rotation     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # The split step
//!
//! Each step runs in two phases so the host can evaluate loads on the
//! end-of-step geometry, the pattern used by fluid-structure coupling loops:
//!
//! 1. [`RigidBodyMotion::new_time`] opens the step,
//!    [`RigidBodyMotion::update_position`] applies the first velocity
//!    half-kick from the previous step's loads and drifts the pose.
//! 2. The host computes forces and moments on the moved body.
//! 3. [`RigidBodyMotion::update_acceleration`] folds in restraint loads,
//!    applies projections and constraints, and closes the step with the
//!    second half-kick.
//!
//! Each phase runs exactly once per step, in this order; repeated or
//! out-of-order calls are caller bugs and trip a debug assertion. When the
//! coupled loads jump from one step to the next, the acceleration
//! under-relaxation in [`sixdof_types::BodyConfig`] blends each freshly
//! computed acceleration with the previous step's value to keep the coupling
//! stable.
//!
//! Orientation is advanced by composing exact single-axis rotations in a
//! palindromic sequence, so the orientation tensor stays orthonormal and the
//! angular momentum magnitude is preserved to round-off over any number of
//! steps, with no renormalisation.
//!
//! # Quick Start
//!
//! ```
//! use sixdof_core::RigidBodyMotion;
//! use sixdof_types::{BodyConfig, GlobalVec};
//!
//! // A 2 kg solid sphere of radius 0.5 m, free in all six degrees
//! let config = BodyConfig::solid_sphere(2.0, 0.5);
//! let mut motion = RigidBodyMotion::new(&config).unwrap();
//!
//! // Drop it for half a second
//! let dt = 1.0 / 240.0;
//! for _ in 0..120 {
//!     let weight = GlobalVec::new(0.0, 0.0, -9.81 * motion.mass());
//!     motion.new_time();
//!     motion.update_position(dt, dt);
//!     motion.update_acceleration(weight, GlobalVec::zeros(), dt);
//! }
//! assert!(motion.centre_of_rotation().z < 0.0);
//! ```
//!
//! # Restraints and constraints
//!
//! Retarding models and degree-of-freedom locks are configured by name and
//! built through registries, so hosts can add their own kinds:
//!
//! ```
//! use sixdof_core::RigidBodyMotion;
//! use sixdof_types::{
//!     BodyConfig, Coeffs, GlobalVec, Point3, ProjectionSpec, RestraintSpec, Vector3,
//! };
//!
//! let config = BodyConfig::solid_sphere(2.0, 0.5)
//!     // no translation along y
//!     .with_translation(ProjectionSpec::Plane {
//!         normal: Vector3::new(0.0, 1.0, 0.0),
//!     })
//!     .with_restraint(RestraintSpec::new(
//!         "mooring",
//!         "linear_spring",
//!         Coeffs::new()
//!             .with_point("anchor", Point3::new(0.0, 0.0, 5.0))
//!             .with_point("attachment", Point3::origin())
//!             .with_scalar("stiffness", 80.0)
//!             .with_scalar("damping", 4.0),
//!     ));
//!
//! let mut motion = RigidBodyMotion::new(&config).unwrap();
//! let dt = 1.0 / 240.0;
//! for _ in 0..240 {
//!     let weight = GlobalVec::new(0.0, 0.0, -9.81 * motion.mass());
//!     motion.new_time();
//!     motion.update_position(dt, dt);
//!     motion.update_acceleration(weight, GlobalVec::zeros(), dt);
//! }
//! // The spring carries the weight; the lock keeps y exactly still
//! assert!(motion.centre_of_rotation().z > -5.0);
//! assert_eq!(motion.velocity().0.y, 0.0);
//! ```
//!
//! # Checkpoints
//!
//! [`RigidBodyMotion::checkpoint`] captures the live and previous-step state;
//! restoring it with [`RigidBodyMotion::restore`] and stepping on reproduces
//! the uninterrupted trajectory. The JSON helpers
//! [`RigidBodyMotion::write_checkpoint`] and
//! [`RigidBodyMotion::read_checkpoint`] round-trip every `f64` exactly.

#![doc(html_root_url = "https://docs.rs/sixdof-core/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,          // mul_add style changes aren't always clearer
)]

pub mod constraint;
pub mod restraint;

mod motion;
mod rotation;
mod transform;

pub use motion::RigidBodyMotion;
pub use rotation::symplectic_rotate;
pub use transform::MotionTransform;

pub use constraint::{Constraint, ConstraintBuilder, ConstraintRegistry};
pub use restraint::{Restraint, RestraintBuilder, RestraintLoad, RestraintRegistry};

// Re-export key types from sixdof-types for convenience
pub use sixdof_types::{
    BodyConfig, BodyVec, Coeffs, ConstraintProjection, ConstraintSpec, GlobalVec,
    MotionCheckpoint, MotionError, MotionState, Orientation, PrincipalInertia, ProjectionSpec,
    RestraintSpec, Result,
};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::similar_names,
    clippy::unreadable_literal
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_free_fall_matches_analytic_parabola() {
        let mut motion = RigidBodyMotion::new(&BodyConfig::solid_sphere(1.5, 0.25)).unwrap();

        let g = 9.81;
        let dt = 1e-3;
        let steps = 1000;
        for _ in 0..steps {
            let weight = GlobalVec::new(0.0, 0.0, -g * motion.mass());
            motion.new_time();
            motion.update_position(dt, dt);
            motion.update_acceleration(weight, GlobalVec::zeros(), dt);
        }

        // The cold start costs one half-kick of the first step; after a
        // thousand steps the trajectory sits on the parabola
        let t = dt * steps as f64;
        assert_relative_eq!(
            motion.centre_of_rotation().z,
            -0.5 * g * t * t,
            max_relative = 2e-3
        );
        assert_relative_eq!(motion.velocity().0.z, -g * (t - 0.5 * dt), max_relative = 1e-9);
    }

    #[test]
    fn test_coasting_body_conserves_momentum_and_energy() {
        let state = MotionState {
            velocity: GlobalVec::new(0.3, -0.1, 0.2),
            angular_momentum: BodyVec::new(1.0, 0.4, -0.7),
            ..MotionState::default()
        };
        let config = BodyConfig::new(2.0, Vector3::new(0.5, 0.8, 1.1));
        let mut motion =
            RigidBodyMotion::restore(&config, MotionCheckpoint::fresh(state)).unwrap();

        let p0 = motion.linear_momentum();
        let l0 = motion.angular_momentum_global();
        let e0 = motion.kinetic_energy();

        let dt = 1e-3;
        for _ in 0..2000 {
            motion.new_time();
            motion.update_position(dt, dt);
            motion.update_acceleration(GlobalVec::zeros(), GlobalVec::zeros(), dt);
        }

        assert_relative_eq!(motion.linear_momentum().0, p0.0, epsilon = 1e-12);
        assert_relative_eq!(motion.angular_momentum_global().0, l0.0, max_relative = 1e-10);
        // Splitting conserves energy to a bounded oscillation, not exactly
        assert_relative_eq!(motion.kinetic_energy(), e0, max_relative = 1e-4);
        assert!(motion.orientation().orthonormality_error() < 1e-10);
    }

    #[test]
    fn test_custom_restraint_through_add() {
        #[derive(Debug)]
        struct ConstantPush;

        impl Restraint for ConstantPush {
            fn name(&self) -> &str {
                "push"
            }

            fn restrain(&self, motion: &RigidBodyMotion) -> RestraintLoad {
                RestraintLoad::at_point(
                    motion.centre_of_rotation(),
                    GlobalVec::new(1.0, 0.0, 0.0),
                )
            }
        }

        let mut motion = RigidBodyMotion::new(&BodyConfig::default()).unwrap();
        motion.add_restraint(Box::new(ConstantPush));

        let dt = 0.01;
        for _ in 0..100 {
            motion.new_time();
            motion.update_position(dt, dt);
            motion.update_acceleration(GlobalVec::zeros(), GlobalVec::zeros(), dt);
        }
        // Unit force on unit mass for one second; the cold start costs the
        // opening half-kick
        assert_relative_eq!(motion.velocity().0.x, 1.0 - 0.5 * dt, max_relative = 1e-12);
        assert_eq!(motion.velocity().0.y, 0.0);
    }

    #[test]
    fn test_registry_driven_configuration() {
        let config = BodyConfig::default()
            .with_restraint(RestraintSpec::new(
                "drag",
                "linear_damper",
                Coeffs::new().with_scalar("coeff", 0.5),
            ))
            .with_constraint(ConstraintSpec::new(
                "deck",
                "plane",
                Coeffs::new().with_vector("normal", Vector3::new(0.0, 0.0, 1.0)),
            ));

        let motion = RigidBodyMotion::from_parts(
            &config,
            MotionCheckpoint::fresh(MotionState::default()),
            &RestraintRegistry::default(),
            &ConstraintRegistry::default(),
        )
        .unwrap();
        assert_eq!(motion.centre_of_rotation(), Point3::origin());
    }
}
