//! Motion state and restart checkpoints.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::{BodyVec, GlobalVec, Orientation};

/// Complete kinematic state of one rigid body.
///
/// Positions, velocities, and accelerations live in the global frame; angular
/// momentum and torque live in the body frame, where the inertia tensor stays
/// diagonal. The integrator keeps two of these per body: the live state and
/// the snapshot taken at the start of the step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Centre of rotation in the global frame.
    pub centre_of_rotation: Point3<f64>,
    /// Orientation tensor mapping body-frame vectors to the global frame.
    pub orientation: Orientation,
    /// Linear velocity of the centre of rotation, global frame.
    pub velocity: GlobalVec,
    /// Linear acceleration, global frame.
    pub acceleration: GlobalVec,
    /// Angular momentum, body frame.
    pub angular_momentum: BodyVec,
    /// Torque, body frame.
    pub torque: BodyVec,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::at_rest(Point3::origin(), Orientation::identity())
    }
}

impl MotionState {
    /// Body at rest with zero loads at the given pose.
    #[must_use]
    pub fn at_rest(centre_of_rotation: Point3<f64>, orientation: Orientation) -> Self {
        Self {
            centre_of_rotation,
            orientation,
            velocity: GlobalVec::zeros(),
            acceleration: GlobalVec::zeros(),
            angular_momentum: BodyVec::zeros(),
            torque: BodyVec::zeros(),
        }
    }

    /// `true` when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.centre_of_rotation.iter().all(|c| c.is_finite())
            && self.orientation.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.angular_momentum.is_finite()
            && self.torque.is_finite()
    }
}

/// Live state plus the previous-step snapshot: everything a restart needs.
///
/// Restoring from a checkpoint written at the end of step `n` and continuing
/// reproduces the trajectory the uninterrupted run would have taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionCheckpoint {
    /// State at the time of the checkpoint.
    pub state: MotionState,
    /// Snapshot from the start of the step.
    pub state0: MotionState,
}

impl MotionCheckpoint {
    /// Checkpoint for a fresh body: previous step identical to the present.
    #[must_use]
    pub const fn fresh(state: MotionState) -> Self {
        Self {
            state,
            state0: state,
        }
    }

    /// `true` when both states are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.state.is_finite() && self.state0.is_finite()
    }
}
