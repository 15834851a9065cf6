//! Error types for rigid-body motion configuration and restarts.

use std::io;

use thiserror::Error;

/// Errors raised while building, reconfiguring, or restarting a rigid body.
///
/// Step-time updates are infallible by design; everything that can go wrong
/// is rejected when configuration is loaded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    /// Mass must be positive and finite.
    #[error("invalid mass: {0} (must be positive and finite)")]
    InvalidMass(f64),

    /// Principal moments of inertia must be positive and finite.
    #[error("invalid moment of inertia: {reason}")]
    InvalidInertia {
        /// Description of what's wrong.
        reason: String,
    },

    /// Orientation tensor is not a proper rotation.
    #[error("invalid orientation: {reason}")]
    InvalidOrientation {
        /// Description of what's wrong.
        reason: String,
    },

    /// Constraint projection tensor is not a valid orthogonal projection.
    #[error("invalid constraint projection: {reason}")]
    InvalidProjection {
        /// Description of what's wrong.
        reason: String,
    },

    /// Restraint kind not present in the registry.
    #[error("unknown restraint kind: {0:?}")]
    UnknownRestraint(String),

    /// Constraint kind not present in the registry.
    #[error("unknown constraint kind: {0:?}")]
    UnknownConstraint(String),

    /// A required coefficient is absent from a plugin specification.
    #[error("missing coefficient {key:?}")]
    MissingCoeff {
        /// The absent coefficient key.
        key: String,
    },

    /// A coefficient is present but holds the wrong primitive.
    #[error("coefficient {key:?} has the wrong type (expected {expected})")]
    CoeffType {
        /// The offending coefficient key.
        key: String,
        /// The primitive the caller asked for.
        expected: &'static str,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Checkpoint stream could not be written or parsed.
    #[error("checkpoint error: {reason}")]
    Checkpoint {
        /// Description of the IO or format failure.
        reason: String,
    },
}

impl MotionError {
    /// Create an invalid moment of inertia error.
    #[must_use]
    pub fn invalid_inertia(reason: impl Into<String>) -> Self {
        Self::InvalidInertia {
            reason: reason.into(),
        }
    }

    /// Create an invalid orientation error.
    #[must_use]
    pub fn invalid_orientation(reason: impl Into<String>) -> Self {
        Self::InvalidOrientation {
            reason: reason.into(),
        }
    }

    /// Create an invalid projection error.
    #[must_use]
    pub fn invalid_projection(reason: impl Into<String>) -> Self {
        Self::InvalidProjection {
            reason: reason.into(),
        }
    }

    /// Create a missing coefficient error.
    #[must_use]
    pub fn missing_coeff(key: impl Into<String>) -> Self {
        Self::MissingCoeff { key: key.into() }
    }

    /// Create a coefficient type mismatch error.
    #[must_use]
    pub fn coeff_type(key: impl Into<String>, expected: &'static str) -> Self {
        Self::CoeffType {
            key: key.into(),
            expected,
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a checkpoint error.
    #[must_use]
    pub fn checkpoint(reason: impl Into<String>) -> Self {
        Self::Checkpoint {
            reason: reason.into(),
        }
    }

    /// Check if this error names a restraint or constraint kind missing from
    /// the registry.
    #[must_use]
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, Self::UnknownRestraint(_) | Self::UnknownConstraint(_))
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

// IO and JSON failures only arise on the checkpoint path. Both error types
// are reduced to their message so `MotionError` stays `Clone + PartialEq`.
impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::checkpoint(err.to_string())
    }
}

impl From<io::Error> for MotionError {
    fn from(err: io::Error) -> Self {
        Self::checkpoint(err.to_string())
    }
}
