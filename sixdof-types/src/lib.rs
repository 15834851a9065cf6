//! Core types for six-degree-of-freedom rigid-body motion.
//!
//! This crate provides the foundational types for the `sixdof` integrator:
//!
//! - [`MotionState`] - Position, orientation, velocity, momentum of a body
//! - [`MotionCheckpoint`] - Live + previous-step state, the restart bundle
//! - [`GlobalVec`] / [`BodyVec`] - Frame-typed vectors
//! - [`Orientation`] - The body-to-global rotation tensor
//! - [`PrincipalInertia`] - Diagonal moment of inertia
//! - [`ConstraintProjection`] - Degree-of-freedom locks
//! - [`BodyConfig`] - Constant body parameters and plugin specifications
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no stepping logic and no plugin
//! machinery; they are the common language between the integrator, host
//! solvers driving it, and configuration/restart tooling.
//!
//! # Frames
//!
//! Two coordinate frames appear throughout: the fixed global frame and the
//! body-fixed frame the inertia tensor is diagonal in. Vectors carry their
//! frame in the type ([`GlobalVec`] vs [`BodyVec`]), and the only way to move
//! between frames is through an [`Orientation`]. Mixing frames is a compile
//! error, not a simulation bug.
//!
//! # Example
//!
//! ```
//! use sixdof_types::{BodyConfig, MotionState, Orientation};
//! use nalgebra::{Point3, Vector3};
//!
//! let config = BodyConfig::new(2.5, Vector3::new(0.4, 0.4, 0.2))
//!     .with_centre_of_mass(Point3::new(0.0, 0.0, 1.0));
//! assert!(config.validate().is_ok());
//!
//! let state = MotionState::at_rest(config.centre_of_rotation(), Orientation::identity());
//! assert!(state.is_finite());
//! ```

#![doc(html_root_url = "https://docs.rs/sixdof-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic for type definitions
#![allow(
    clippy::missing_const_for_fn,  // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,    // Error docs added where non-obvious
    clippy::suboptimal_flops       // mul_add style changes aren't always clearer
)]

mod config;
mod error;
mod frame;
mod inertia;
mod projection;
mod state;

pub use config::{BodyConfig, CoeffValue, Coeffs, ConstraintSpec, RestraintSpec};
pub use error::MotionError;
pub use frame::{BodyVec, GlobalVec, Orientation, ORTHONORMAL_TOL};
pub use inertia::PrincipalInertia;
pub use projection::{ConstraintProjection, ProjectionSpec};
pub use state::{MotionCheckpoint, MotionState};

// Re-export math types for convenience
pub use nalgebra::{Matrix3, Point3, Vector3};

/// Result type for motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;
