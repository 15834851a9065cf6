//! Body configuration bundles and plugin specifications.
//!
//! Parsing text formats into these structs is the host's business; everything
//! here is already-typed data with `validate()` entry points, plus the
//! coefficient tables that named restraints and constraints are built from.

use std::collections::BTreeMap;

use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{MotionError, ProjectionSpec, Result};

/// A single already-parsed coefficient value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoeffValue {
    /// Scalar coefficient.
    Scalar(f64),
    /// Three-component coefficient: a vector or a point.
    Vector(Vector3<f64>),
    /// 3x3 tensor coefficient.
    Tensor(Matrix3<f64>),
    /// Boolean switch.
    Switch(bool),
}

/// Coefficient table for one restraint or constraint instance.
///
/// Keys are looked up by the plugin builders; a missing required key or a
/// type mismatch is a configuration-time error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coeffs(BTreeMap<String, CoeffValue>);

impl Coeffs {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar coefficient.
    #[must_use]
    pub fn with_scalar(mut self, key: &str, value: f64) -> Self {
        self.0.insert(key.to_string(), CoeffValue::Scalar(value));
        self
    }

    /// Add a vector coefficient.
    #[must_use]
    pub fn with_vector(mut self, key: &str, value: Vector3<f64>) -> Self {
        self.0.insert(key.to_string(), CoeffValue::Vector(value));
        self
    }

    /// Add a point coefficient (stored as its coordinate vector).
    #[must_use]
    pub fn with_point(self, key: &str, value: Point3<f64>) -> Self {
        self.with_vector(key, value.coords)
    }

    /// Add a tensor coefficient.
    #[must_use]
    pub fn with_tensor(mut self, key: &str, value: Matrix3<f64>) -> Self {
        self.0.insert(key.to_string(), CoeffValue::Tensor(value));
        self
    }

    /// Add a boolean switch.
    #[must_use]
    pub fn with_switch(mut self, key: &str, value: bool) -> Self {
        self.0.insert(key.to_string(), CoeffValue::Switch(value));
        self
    }

    /// Required scalar.
    pub fn scalar(&self, key: &str) -> Result<f64> {
        match self.0.get(key) {
            Some(CoeffValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(MotionError::coeff_type(key, "scalar")),
            None => Err(MotionError::missing_coeff(key)),
        }
    }

    /// Scalar with a default for an absent key.
    pub fn scalar_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.0.get(key) {
            Some(CoeffValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(MotionError::coeff_type(key, "scalar")),
            None => Ok(default),
        }
    }

    /// Required vector.
    pub fn vector(&self, key: &str) -> Result<Vector3<f64>> {
        match self.0.get(key) {
            Some(CoeffValue::Vector(v)) => Ok(*v),
            Some(_) => Err(MotionError::coeff_type(key, "vector")),
            None => Err(MotionError::missing_coeff(key)),
        }
    }

    /// Required point (a vector coefficient read as coordinates).
    pub fn point(&self, key: &str) -> Result<Point3<f64>> {
        self.vector(key).map(Point3::from)
    }

    /// Required tensor.
    pub fn tensor(&self, key: &str) -> Result<Matrix3<f64>> {
        match self.0.get(key) {
            Some(CoeffValue::Tensor(m)) => Ok(*m),
            Some(_) => Err(MotionError::coeff_type(key, "tensor")),
            None => Err(MotionError::missing_coeff(key)),
        }
    }

    /// Tensor with a default for an absent key.
    pub fn tensor_or(&self, key: &str, default: Matrix3<f64>) -> Result<Matrix3<f64>> {
        match self.0.get(key) {
            Some(CoeffValue::Tensor(m)) => Ok(*m),
            Some(_) => Err(MotionError::coeff_type(key, "tensor")),
            None => Ok(default),
        }
    }

    /// Switch with a default for an absent key.
    pub fn switch_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.0.get(key) {
            Some(CoeffValue::Switch(v)) => Ok(*v),
            Some(_) => Err(MotionError::coeff_type(key, "switch")),
            None => Ok(default),
        }
    }

    /// `true` when the key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of coefficients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no coefficients are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named specification of one restraint instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestraintSpec {
    /// Instance name, used in diagnostics.
    pub name: String,
    /// Registry kind the instance is built from, e.g. `"linear_spring"`.
    pub kind: String,
    /// Coefficients handed to the registered builder.
    #[serde(default)]
    pub coeffs: Coeffs,
}

impl RestraintSpec {
    /// Build a specification.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, coeffs: Coeffs) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            coeffs,
        }
    }
}

/// Named specification of one constraint instance.
///
/// Constraint order is significant: the correction pipeline runs in the order
/// the specifications appear in [`BodyConfig::constraints`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Instance name, used in diagnostics.
    pub name: String,
    /// Registry kind the instance is built from, e.g. `"plane"`.
    pub kind: String,
    /// Coefficients handed to the registered builder.
    #[serde(default)]
    pub coeffs: Coeffs,
}

impl ConstraintSpec {
    /// Build a specification.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, coeffs: Coeffs) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            coeffs,
        }
    }
}

fn identity_matrix() -> Matrix3<f64> {
    Matrix3::identity()
}

fn one() -> f64 {
    1.0
}

/// Constant parameters of one rigid body.
///
/// The evolving state lives in [`crate::MotionState`]; everything here is
/// fixed between reconfigurations. Built either in code through the `with_*`
/// methods or deserialized from a host-parsed configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Body mass.
    pub mass: f64,
    /// Principal moments of inertia about the centre of rotation.
    pub moment_of_inertia: Vector3<f64>,
    /// Centre of mass in the initial configuration.
    pub initial_centre_of_mass: Point3<f64>,
    /// Centre of rotation in the initial configuration; defaults to the
    /// centre of mass.
    #[serde(default)]
    pub initial_centre_of_rotation: Option<Point3<f64>>,
    /// Initial orientation tensor.
    #[serde(default = "identity_matrix")]
    pub initial_orientation: Matrix3<f64>,
    /// Under-relaxation factor for acceleration updates, in `(0, 1]`.
    #[serde(default = "one")]
    pub acceleration_relaxation: f64,
    /// Damping factor on the leapfrog velocity kicks, in `(0, 1]`.
    #[serde(default = "one")]
    pub acceleration_damping: f64,
    /// Emit a status report after every acceleration update.
    #[serde(default)]
    pub report: bool,
    /// Allowed translational directions.
    #[serde(default)]
    pub translation: ProjectionSpec,
    /// Allowed rotational directions.
    #[serde(default)]
    pub rotation: ProjectionSpec,
    /// Restraint instances.
    #[serde(default)]
    pub restraints: Vec<RestraintSpec>,
    /// Constraint instances, applied in this order.
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

impl Default for BodyConfig {
    /// Unit-mass body with unit inertia at the origin, unconstrained.
    fn default() -> Self {
        Self {
            mass: 1.0,
            moment_of_inertia: Vector3::new(1.0, 1.0, 1.0),
            initial_centre_of_mass: Point3::origin(),
            initial_centre_of_rotation: None,
            initial_orientation: Matrix3::identity(),
            acceleration_relaxation: 1.0,
            acceleration_damping: 1.0,
            report: false,
            translation: ProjectionSpec::Free,
            rotation: ProjectionSpec::Free,
            restraints: Vec::new(),
            constraints: Vec::new(),
        }
    }
}

impl BodyConfig {
    /// Configuration with the given mass and principal inertia, everything
    /// else at its default.
    #[must_use]
    pub fn new(mass: f64, moment_of_inertia: Vector3<f64>) -> Self {
        Self {
            mass,
            moment_of_inertia,
            ..Self::default()
        }
    }

    /// Uniform solid sphere of the given mass and radius.
    #[must_use]
    pub fn solid_sphere(mass: f64, radius: f64) -> Self {
        Self::new(mass, Vector3::repeat(0.4 * mass * radius * radius))
    }

    /// Set the initial centre of mass.
    #[must_use]
    pub fn with_centre_of_mass(mut self, centre: Point3<f64>) -> Self {
        self.initial_centre_of_mass = centre;
        self
    }

    /// Set an initial centre of rotation distinct from the centre of mass.
    #[must_use]
    pub fn with_centre_of_rotation(mut self, centre: Point3<f64>) -> Self {
        self.initial_centre_of_rotation = Some(centre);
        self
    }

    /// Set the initial orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Matrix3<f64>) -> Self {
        self.initial_orientation = orientation;
        self
    }

    /// Set the acceleration under-relaxation factor.
    #[must_use]
    pub fn with_relaxation(mut self, factor: f64) -> Self {
        self.acceleration_relaxation = factor;
        self
    }

    /// Set the acceleration damping factor.
    #[must_use]
    pub fn with_damping(mut self, factor: f64) -> Self {
        self.acceleration_damping = factor;
        self
    }

    /// Enable or disable per-step status reports.
    #[must_use]
    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    /// Set the allowed translational directions.
    #[must_use]
    pub fn with_translation(mut self, spec: ProjectionSpec) -> Self {
        self.translation = spec;
        self
    }

    /// Set the allowed rotational directions.
    #[must_use]
    pub fn with_rotation(mut self, spec: ProjectionSpec) -> Self {
        self.rotation = spec;
        self
    }

    /// Append a restraint specification.
    #[must_use]
    pub fn with_restraint(mut self, spec: RestraintSpec) -> Self {
        self.restraints.push(spec);
        self
    }

    /// Append a constraint specification.
    #[must_use]
    pub fn with_constraint(mut self, spec: ConstraintSpec) -> Self {
        self.constraints.push(spec);
        self
    }

    /// The initial centre of rotation, falling back to the centre of mass.
    #[must_use]
    pub fn centre_of_rotation(&self) -> Point3<f64> {
        self.initial_centre_of_rotation
            .unwrap_or(self.initial_centre_of_mass)
    }

    /// Validate scalar ranges and tensor shapes.
    ///
    /// Restraint and constraint kinds are validated later, against the
    /// registries that build them.
    pub fn validate(&self) -> Result<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(MotionError::InvalidMass(self.mass));
        }
        crate::PrincipalInertia::new(self.moment_of_inertia)?;
        crate::Orientation::from_matrix(self.initial_orientation)?;
        self.translation.build()?;
        self.rotation.build()?;

        for (label, value) in [
            ("acceleration_relaxation", self.acceleration_relaxation),
            ("acceleration_damping", self.acceleration_damping),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(MotionError::invalid_config(format!(
                    "{label} must be in (0, 1], got {value}"
                )));
            }
        }

        if self.initial_centre_of_mass.iter().any(|c| !c.is_finite())
            || self.centre_of_rotation().iter().any(|c| !c.is_finite())
        {
            return Err(MotionError::invalid_config(
                "initial centres must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BodyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.centre_of_rotation(), Point3::origin());
    }

    #[test]
    fn test_builder_chain() {
        let config = BodyConfig::new(12.0, Vector3::new(1.0, 2.0, 3.0))
            .with_centre_of_mass(Point3::new(0.0, 0.0, 0.5))
            .with_relaxation(0.7)
            .with_damping(0.9)
            .with_report(true)
            .with_restraint(RestraintSpec::new(
                "drag",
                "linear_damper",
                Coeffs::new().with_scalar("coeff", 2.0),
            ));

        assert!(config.validate().is_ok());
        assert_eq!(config.restraints.len(), 1);
        assert_eq!(config.centre_of_rotation(), Point3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_validate_rejects_bad_scalars() {
        assert!(matches!(
            BodyConfig::new(0.0, Vector3::repeat(1.0)).validate(),
            Err(MotionError::InvalidMass(_))
        ));
        assert!(BodyConfig::new(1.0, Vector3::new(1.0, -1.0, 1.0))
            .validate()
            .is_err());
        assert!(BodyConfig::default().with_relaxation(0.0).validate().is_err());
        assert!(BodyConfig::default().with_damping(1.5).validate().is_err());
    }

    #[test]
    fn test_coeff_lookup() {
        let coeffs = Coeffs::new()
            .with_scalar("stiffness", 100.0)
            .with_point("anchor", Point3::new(1.0, 0.0, 0.0))
            .with_switch("engaged", true);

        assert_eq!(coeffs.scalar("stiffness").unwrap(), 100.0);
        assert_eq!(coeffs.point("anchor").unwrap(), Point3::new(1.0, 0.0, 0.0));
        assert!(coeffs.switch_or("engaged", false).unwrap());
        assert_eq!(coeffs.scalar_or("damping", 0.25).unwrap(), 0.25);

        assert!(matches!(
            coeffs.scalar("anchor"),
            Err(MotionError::CoeffType { .. })
        ));
        assert!(matches!(
            coeffs.vector("missing"),
            Err(MotionError::MissingCoeff { .. })
        ));
    }

    #[test]
    fn test_config_serde_round_trip_with_defaults() {
        let json = r#"{
            "mass": 3.0,
            "moment_of_inertia": [1.0, 2.0, 3.0],
            "initial_centre_of_mass": [0.0, 0.0, 1.0]
        }"#;
        let config: BodyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.acceleration_relaxation, 1.0);
        assert_eq!(config.translation, ProjectionSpec::Free);
        assert!(config.restraints.is_empty());
        assert!(config.validate().is_ok());

        let round = serde_json::to_string(&config).unwrap();
        let back: BodyConfig = serde_json::from_str(&round).unwrap();
        assert_eq!(back, config);
    }
}
