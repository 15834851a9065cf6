//! The six-degree-of-freedom rigid-body motion integrator.

use std::io;

use nalgebra::Point3;
use sixdof_types::{
    BodyConfig, BodyVec, ConstraintProjection, GlobalVec, MotionCheckpoint, MotionError,
    MotionState, Orientation, PrincipalInertia, Result,
};

use crate::constraint::{Constraint, ConstraintRegistry};
use crate::restraint::{Restraint, RestraintLoad, RestraintRegistry};
use crate::rotation::symplectic_rotate;
use crate::transform::MotionTransform;

/// Where an instance stands inside the two-phase step protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepPhase {
    /// Step opened; waiting for `update_position`.
    Fresh,
    /// Position advanced; waiting for forces and `update_acceleration`.
    Moved,
    /// Step closed; waiting for `new_time`.
    Closed,
}

/// Six-degree-of-freedom motion of one rigid body under external loads.
///
/// The body advances through a leapfrog step split into two phases so the
/// host can compute loads from the end-of-step geometry:
///
/// ```text
///   new_time()                   snapshot state into the previous-step slot
///   update_position(dt, dt0)     half-kick from previous loads, then drift
///          |                     (host computes forces on the new geometry)
///   update_acceleration(f, tau, dt)
///                                restraints -> projections -> constraints,
///                                relaxation, then the closing half-kick
/// ```
///
/// Orientation advances through the palindromic single-axis splitting of
/// [`symplectic_rotate`], which keeps the orientation orthonormal and the
/// angular momentum magnitude exact without renormalisation.
///
/// Both update methods are infallible: everything that can be rejected is
/// rejected when configuration is loaded. Calling them out of order is a
/// caller bug, guarded by `debug_assert!` and unchecked in release builds.
///
/// # Example
///
/// ```
/// use sixdof_core::RigidBodyMotion;
/// use sixdof_types::{BodyConfig, GlobalVec, Vector3};
///
/// let config = BodyConfig::new(2.0, Vector3::new(0.8, 0.8, 0.8));
/// let mut motion = RigidBodyMotion::new(&config).unwrap();
///
/// let dt = 1e-3;
/// let weight = GlobalVec::new(0.0, 0.0, -9.81 * motion.mass());
/// for _ in 0..100 {
///     motion.new_time();
///     motion.update_position(dt, dt);
///     motion.update_acceleration(weight, GlobalVec::zeros(), dt);
/// }
/// assert!(motion.centre_of_rotation().z < 0.0);
/// ```
#[derive(Debug)]
pub struct RigidBodyMotion {
    state: MotionState,
    state0: MotionState,

    mass: f64,
    inertia: PrincipalInertia,
    t_constraints: ConstraintProjection,
    r_constraints: ConstraintProjection,

    initial_centre_of_mass: Point3<f64>,
    initial_centre_of_rotation: Point3<f64>,
    initial_orientation: Orientation,

    accel_relaxation: f64,
    accel_damping: f64,
    report: bool,

    restraints: Vec<Box<dyn Restraint>>,
    constraints: Vec<Box<dyn Constraint>>,

    // The first acceleration update seeds the relaxation history instead of
    // blending with stale values.
    relaxation_primed: bool,
    phase: StepPhase,
}

impl RigidBodyMotion {
    /// Fresh body at rest at the configured initial pose.
    pub fn new(config: &BodyConfig) -> Result<Self> {
        let state = MotionState::at_rest(
            config.centre_of_rotation(),
            Orientation::from_matrix(config.initial_orientation)?,
        );
        Self::restore(config, MotionCheckpoint::fresh(state))
    }

    /// Body restarted from a checkpoint, using the built-in registries.
    pub fn restore(config: &BodyConfig, checkpoint: MotionCheckpoint) -> Result<Self> {
        Self::from_parts(
            config,
            checkpoint,
            &RestraintRegistry::default(),
            &ConstraintRegistry::default(),
        )
    }

    /// Body restarted from a checkpoint with explicit registries.
    ///
    /// # Errors
    ///
    /// Anything structurally wrong with the configuration is fatal here:
    /// non-positive mass or inertia, a non-orthonormal initial orientation,
    /// an invalid projection tensor, a checkpoint that is non-finite or
    /// whose orientation is not a proper rotation, or a restraint or
    /// constraint kind the registries do not know.
    pub fn from_parts(
        config: &BodyConfig,
        checkpoint: MotionCheckpoint,
        restraint_registry: &RestraintRegistry,
        constraint_registry: &ConstraintRegistry,
    ) -> Result<Self> {
        config.validate()?;
        if !checkpoint.is_finite() {
            return Err(MotionError::invalid_config("checkpoint state is not finite"));
        }
        // Hand-edited archives can carry a skewed or reflecting orientation
        Orientation::from_matrix(*checkpoint.state.orientation.matrix())?;
        Orientation::from_matrix(*checkpoint.state0.orientation.matrix())?;

        let restraints = config
            .restraints
            .iter()
            .map(|spec| restraint_registry.build(spec))
            .collect::<Result<Vec<_>>>()?;
        let constraints = config
            .constraints
            .iter()
            .map(|spec| constraint_registry.build(spec))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            state: checkpoint.state,
            state0: checkpoint.state0,
            mass: config.mass,
            inertia: PrincipalInertia::new(config.moment_of_inertia)?,
            t_constraints: config.translation.build()?,
            r_constraints: config.rotation.build()?,
            initial_centre_of_mass: config.initial_centre_of_mass,
            initial_centre_of_rotation: config.centre_of_rotation(),
            initial_orientation: Orientation::from_matrix(config.initial_orientation)?,
            accel_relaxation: config.acceleration_relaxation,
            accel_damping: config.acceleration_damping,
            report: config.report,
            restraints,
            constraints,
            relaxation_primed: false,
            phase: StepPhase::Fresh,
        })
    }

    /// Replace body constants, projections, and plugin lists from `config`,
    /// leaving the live motion state and the frozen initial pose untouched.
    ///
    /// On error `self` is unchanged, so a failed live-reload keeps the body
    /// running with its old coefficients.
    pub fn reload(&mut self, config: &BodyConfig) -> Result<()> {
        self.reload_with(
            config,
            &RestraintRegistry::default(),
            &ConstraintRegistry::default(),
        )
    }

    /// [`reload`](Self::reload) with explicit registries.
    pub fn reload_with(
        &mut self,
        config: &BodyConfig,
        restraint_registry: &RestraintRegistry,
        constraint_registry: &ConstraintRegistry,
    ) -> Result<()> {
        config.validate()?;
        let inertia = PrincipalInertia::new(config.moment_of_inertia)?;
        let t_constraints = config.translation.build()?;
        let r_constraints = config.rotation.build()?;
        let restraints = config
            .restraints
            .iter()
            .map(|spec| restraint_registry.build(spec))
            .collect::<Result<Vec<_>>>()?;
        let constraints = config
            .constraints
            .iter()
            .map(|spec| constraint_registry.build(spec))
            .collect::<Result<Vec<_>>>()?;

        self.mass = config.mass;
        self.inertia = inertia;
        self.t_constraints = t_constraints;
        self.r_constraints = r_constraints;
        self.accel_relaxation = config.acceleration_relaxation;
        self.accel_damping = config.acceleration_damping;
        self.report = config.report;
        self.restraints = restraints;
        self.constraints = constraints;
        Ok(())
    }

    /// Attach a restraint built outside the registries.
    pub fn add_restraint(&mut self, restraint: Box<dyn Restraint>) {
        self.restraints.push(restraint);
    }

    /// Append a constraint built outside the registries; it runs after every
    /// constraint already attached.
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    /// Open a new step: snapshot the live state into the previous-step slot.
    pub fn new_time(&mut self) {
        self.state0 = self.state;
        self.phase = StepPhase::Fresh;
    }

    /// First phase of the step: half-kick the velocities from the
    /// previous-step loads, drift the centre of rotation, and advance the
    /// orientation through the splitting kernel.
    ///
    /// `dt` is the current step, `dt0` the previous one; pass `dt0 = dt` for
    /// fixed stepping, where the update reduces exactly to the fixed-step
    /// leapfrog. Locked directions are projected out of the velocities before
    /// and the momentum after the rotation.
    pub fn update_position(&mut self, dt: f64, dt0: f64) {
        debug_assert!(
            self.phase == StepPhase::Fresh,
            "update_position called out of order (open the step with new_time first)"
        );

        let half_kick0 = self.accel_damping * 0.5 * dt0;
        self.state.velocity = self
            .t_constraints
            .project_global(self.state0.velocity + self.state0.acceleration * half_kick0);
        let pi = self
            .r_constraints
            .project_body(self.state0.angular_momentum + self.state0.torque * half_kick0);

        self.state.centre_of_rotation =
            self.state0.centre_of_rotation + self.state.velocity.0 * dt;

        let (q, pi) = symplectic_rotate(&self.inertia, &self.state0.orientation, pi, dt);
        self.state.orientation = q;
        self.state.angular_momentum = self.r_constraints.project_body(pi);

        self.phase = StepPhase::Moved;
    }

    /// Second phase of the step: absorb the loads the host computed on the
    /// updated geometry and close the step.
    ///
    /// `f_global` and `tau_global` are the net external force and torque
    /// about the centre of rotation, both in the global frame. The update
    /// runs the pipelines in a fixed order: restraint loads are summed into
    /// the external loads, the projection tensors remove locked directions,
    /// the constraints correct the trial acceleration pair sequentially, the
    /// result is under-relaxed against the previous step's acceleration, and
    /// the damped leapfrog half-kick closes the step.
    pub fn update_acceleration(&mut self, f_global: GlobalVec, tau_global: GlobalVec, dt: f64) {
        debug_assert!(
            self.phase == StepPhase::Moved,
            "update_acceleration called out of order (call update_position first)"
        );

        let accel_prev = self.state.acceleration;
        let torque_prev = self.state.torque;

        // External loads, torque taken to the body frame
        let mut force = f_global;
        let mut torque = self.state.orientation.to_body(tau_global);

        for load in self.restraint_loads() {
            let arm = GlobalVec(load.position - self.state.centre_of_rotation);
            force += load.force;
            torque += self
                .state
                .orientation
                .to_body(load.moment + arm.cross(load.force));
        }

        force = self.t_constraints.project_global(force);
        torque = self.r_constraints.project_body(torque);

        // Trial pair, corrected by the constraints in configuration order
        let mut accel = force / self.mass;
        let mut pi_dot = torque;
        for constraint in &self.constraints {
            (accel, pi_dot) = constraint.correct(&self.state, accel, pi_dot);
        }

        if self.relaxation_primed {
            let w = self.accel_relaxation;
            accel = accel * w + accel_prev * (1.0 - w);
            pi_dot = pi_dot * w + torque_prev * (1.0 - w);
        } else {
            self.relaxation_primed = true;
        }
        self.state.acceleration = accel;
        self.state.torque = pi_dot;

        let half_kick = self.accel_damping * 0.5 * dt;
        self.state.velocity += self.t_constraints.project_global(accel * half_kick);
        self.state.angular_momentum += self.r_constraints.project_body(pi_dot * half_kick);

        self.phase = StepPhase::Closed;

        if self.report {
            self.status();
        }
    }

    /// Evaluate every attached restraint against the current state.
    fn restraint_loads(&self) -> Vec<RestraintLoad> {
        self.restraints
            .iter()
            .map(|restraint| restraint.restrain(self))
            .collect()
    }

    /// Log a read-only snapshot of the motion.
    pub fn status(&self) {
        tracing::info!(
            centre_of_rotation = ?self.state.centre_of_rotation,
            centre_of_mass = ?self.centre_of_mass(),
            orientation = ?self.state.orientation.matrix(),
            velocity = ?self.state.velocity.0,
            angular_velocity = ?self.angular_velocity().0,
            "rigid body motion status"
        );
    }

    /// The live state.
    #[must_use]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// The snapshot taken at the start of the step.
    #[must_use]
    pub fn state0(&self) -> &MotionState {
        &self.state0
    }

    /// Body mass.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Principal moments of inertia.
    #[must_use]
    pub fn inertia(&self) -> &PrincipalInertia {
        &self.inertia
    }

    /// Current centre of rotation.
    #[must_use]
    pub fn centre_of_rotation(&self) -> Point3<f64> {
        self.state.centre_of_rotation
    }

    /// Current centre of mass, the initial centre of mass carried with the
    /// body.
    #[must_use]
    pub fn centre_of_mass(&self) -> Point3<f64> {
        self.transformation()
            .transform_point(self.initial_centre_of_mass)
    }

    /// Lever arm from the centre of rotation to the centre of mass.
    #[must_use]
    pub fn moment_arm(&self) -> GlobalVec {
        GlobalVec(self.centre_of_mass() - self.state.centre_of_rotation)
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    /// Linear velocity of the centre of rotation.
    #[must_use]
    pub fn velocity(&self) -> GlobalVec {
        self.state.velocity
    }

    /// Linear acceleration from the last acceleration update.
    #[must_use]
    pub fn acceleration(&self) -> GlobalVec {
        self.state.acceleration
    }

    /// Body-frame angular momentum.
    #[must_use]
    pub fn angular_momentum(&self) -> BodyVec {
        self.state.angular_momentum
    }

    /// Body-frame torque from the last acceleration update.
    #[must_use]
    pub fn torque(&self) -> BodyVec {
        self.state.torque
    }

    /// Angular velocity in the global frame, `Q I^-1 pi`.
    #[must_use]
    pub fn angular_velocity(&self) -> GlobalVec {
        self.state
            .orientation
            .to_global(self.inertia.solve(self.state.angular_momentum))
    }

    /// Velocity of a global point moving with the body,
    /// `v + omega x (p - cor)`.
    #[must_use]
    pub fn velocity_at(&self, point: Point3<f64>) -> GlobalVec {
        self.state.velocity
            + self
                .angular_velocity()
                .cross(GlobalVec(point - self.state.centre_of_rotation))
    }

    /// Linear momentum, `m v`.
    #[must_use]
    pub fn linear_momentum(&self) -> GlobalVec {
        self.state.velocity * self.mass
    }

    /// Angular momentum expressed in the global frame, `Q pi`.
    #[must_use]
    pub fn angular_momentum_global(&self) -> GlobalVec {
        self.state.orientation.to_global(self.state.angular_momentum)
    }

    /// Translational plus rotational kinetic energy.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        let rotational = self
            .state
            .angular_momentum
            .dot(self.inertia.solve(self.state.angular_momentum));
        0.5 * self.mass * self.state.velocity.norm_squared() + 0.5 * rotational
    }

    /// Whether per-step status reports are enabled.
    #[must_use]
    pub fn report(&self) -> bool {
        self.report
    }

    /// Enable or disable per-step status reports.
    pub fn set_report(&mut self, report: bool) {
        self.report = report;
    }

    /// The affine map carrying initial-configuration points to their current
    /// global position.
    #[must_use]
    pub fn transformation(&self) -> MotionTransform {
        MotionTransform::new(
            self.initial_centre_of_rotation,
            self.initial_orientation,
            self.state.centre_of_rotation,
            self.state.orientation,
        )
    }

    /// Snapshot for restart continuity.
    #[must_use]
    pub fn checkpoint(&self) -> MotionCheckpoint {
        MotionCheckpoint {
            state: self.state,
            state0: self.state0,
        }
    }

    /// Write the checkpoint as pretty-printed JSON.
    pub fn write_checkpoint(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.checkpoint())?;
        writeln!(writer)?;
        Ok(())
    }

    /// Read a checkpoint previously produced by
    /// [`write_checkpoint`](Self::write_checkpoint).
    pub fn read_checkpoint(reader: impl io::Read) -> Result<MotionCheckpoint> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Rotation3, Vector3};
    use sixdof_types::{Coeffs, ConstraintSpec, ProjectionSpec, RestraintSpec};

    fn unit_body() -> BodyConfig {
        BodyConfig::new(1.0, Vector3::repeat(1.0))
    }

    #[test]
    fn test_construction_rejects_bad_config() {
        assert!(matches!(
            RigidBodyMotion::new(&BodyConfig::new(0.0, Vector3::repeat(1.0))),
            Err(MotionError::InvalidMass(_))
        ));
        assert!(RigidBodyMotion::new(&BodyConfig::new(1.0, Vector3::new(1.0, 0.0, 1.0))).is_err());
        assert!(RigidBodyMotion::new(
            &unit_body().with_orientation(Matrix3::identity() * 2.0)
        )
        .is_err());
    }

    #[test]
    fn test_construction_rejects_unknown_plugins() {
        let config = unit_body().with_restraint(RestraintSpec::new("x", "warp", Coeffs::new()));
        assert_eq!(
            RigidBodyMotion::new(&config).unwrap_err(),
            MotionError::UnknownRestraint("warp".to_string())
        );

        let config = unit_body().with_constraint(ConstraintSpec::new("x", "helix", Coeffs::new()));
        assert!(RigidBodyMotion::new(&config).unwrap_err().is_unknown_kind());
    }

    #[test]
    fn test_restore_rejects_corrupt_orientation() {
        let skewed = MotionState {
            orientation: Orientation::from_matrix_unchecked(Matrix3::identity() * 1.5),
            ..MotionState::default()
        };
        assert!(matches!(
            RigidBodyMotion::restore(&unit_body(), MotionCheckpoint::fresh(skewed)),
            Err(MotionError::InvalidOrientation { .. })
        ));

        // Orthonormal but reflecting
        let mirrored = MotionState {
            orientation: Orientation::from_matrix_unchecked(Matrix3::from_diagonal(
                &Vector3::new(1.0, 1.0, -1.0),
            )),
            ..MotionState::default()
        };
        assert!(
            RigidBodyMotion::restore(&unit_body(), MotionCheckpoint::fresh(mirrored)).is_err()
        );
    }

    #[test]
    fn test_position_update_uses_previous_step_interval() {
        // Crafted previous-step loads make the variable-step half-kick visible
        let state = MotionState {
            velocity: GlobalVec::new(1.0, 0.0, 0.0),
            acceleration: GlobalVec::new(0.0, 2.0, 0.0),
            angular_momentum: BodyVec::zeros(),
            torque: BodyVec::new(0.0, 0.0, 4.0),
            ..MotionState::default()
        };
        let mut motion =
            RigidBodyMotion::restore(&unit_body(), MotionCheckpoint::fresh(state)).unwrap();

        let (dt, dt0) = (0.1, 0.05);
        motion.update_position(dt, dt0);

        // v = v0 + 0.5 * dt0 * a0, pi = pi0 + 0.5 * dt0 * tau0
        assert_relative_eq!(
            motion.velocity().0,
            Vector3::new(1.0, 0.5 * dt0 * 2.0, 0.0),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            motion.angular_momentum().0,
            Vector3::new(0.0, 0.0, 0.5 * dt0 * 4.0),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            motion.centre_of_rotation().coords,
            Vector3::new(dt * 1.0, dt * 0.5 * dt0 * 2.0, 0.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_first_acceleration_update_skips_relaxation() {
        let config = unit_body().with_relaxation(0.5);
        let mut motion = RigidBodyMotion::new(&config).unwrap();

        motion.update_position(0.01, 0.01);
        motion.update_acceleration(GlobalVec::new(4.0, 0.0, 0.0), GlobalVec::zeros(), 0.01);
        // No stale history to blend with on the first call
        assert_relative_eq!(motion.acceleration().0.x, 4.0, epsilon = 1e-15);

        motion.new_time();
        motion.update_position(0.01, 0.01);
        motion.update_acceleration(GlobalVec::new(8.0, 0.0, 0.0), GlobalVec::zeros(), 0.01);
        // Second call blends: 0.5 * 8 + 0.5 * 4
        assert_relative_eq!(motion.acceleration().0.x, 6.0, epsilon = 1e-15);
    }

    #[test]
    fn test_damping_scales_the_velocity_kick() {
        let config = unit_body().with_damping(0.5);
        let mut motion = RigidBodyMotion::new(&config).unwrap();

        motion.update_position(0.1, 0.1);
        motion.update_acceleration(GlobalVec::new(2.0, 0.0, 0.0), GlobalVec::zeros(), 0.1);
        // Kick is damp * 0.5 * dt * a = 0.5 * 0.05 * 2
        assert_relative_eq!(motion.velocity().0.x, 0.05, epsilon = 1e-15);
    }

    #[test]
    fn test_locked_translation_never_moves() {
        let config = unit_body().with_translation(ProjectionSpec::Locked);
        let mut motion = RigidBodyMotion::new(&config).unwrap();

        for _ in 0..10 {
            motion.new_time();
            motion.update_position(0.01, 0.01);
            motion.update_acceleration(GlobalVec::new(50.0, -3.0, 9.0), GlobalVec::zeros(), 0.01);
        }
        assert_eq!(motion.velocity(), GlobalVec::zeros());
        assert_eq!(motion.centre_of_rotation(), Point3::origin());
    }

    #[test]
    fn test_restraint_moment_folds_into_body_torque() {
        let config = unit_body().with_restraint(RestraintSpec::new(
            "tether",
            "linear_spring",
            Coeffs::new()
                .with_point("anchor", Point3::new(0.0, 1.0, -1.0))
                .with_point("attachment", Point3::new(0.0, 1.0, 0.0))
                .with_scalar("stiffness", 3.0),
        ));
        let mut motion = RigidBodyMotion::new(&config).unwrap();

        motion.update_position(0.01, 0.01);
        motion.update_acceleration(GlobalVec::zeros(), GlobalVec::zeros(), 0.01);

        // Spring pulls (0,0,-3) at (0,1,0): force -3z, torque arm y x force = -3x
        assert_relative_eq!(motion.acceleration().0, Vector3::new(0.0, 0.0, -3.0), epsilon = 1e-12);
        assert_relative_eq!(motion.torque().0, Vector3::new(-3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_velocity_at_offset_point() {
        let state = MotionState {
            angular_momentum: BodyVec::new(0.0, 0.0, 1.0),
            ..MotionState::default()
        };
        let motion =
            RigidBodyMotion::restore(&unit_body(), MotionCheckpoint::fresh(state)).unwrap();

        // omega = (0,0,1); at (1,0,0) the rim speed is (0,1,0)
        assert_relative_eq!(
            motion.velocity_at(Point3::new(1.0, 0.0, 0.0)).0,
            Vector3::new(0.0, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_centre_of_mass_follows_rotation() {
        let config = BodyConfig::new(1.0, Vector3::repeat(1.0))
            .with_centre_of_mass(Point3::new(1.0, 0.0, 0.0))
            .with_centre_of_rotation(Point3::origin());
        let state = MotionState::at_rest(
            Point3::origin(),
            Orientation::from_matrix_unchecked(
                Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2)
                    .into_inner(),
            ),
        );
        let motion =
            RigidBodyMotion::restore(&config, MotionCheckpoint::fresh(state)).unwrap();

        // Quarter turn about z carries the offset centre of mass onto +y
        assert_relative_eq!(
            motion.centre_of_mass(),
            Point3::new(0.0, 1.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            motion.moment_arm().0,
            Vector3::new(0.0, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_reload_swaps_constants_not_state() {
        let mut motion = RigidBodyMotion::new(&unit_body()).unwrap();
        motion.update_position(0.1, 0.1);
        motion.update_acceleration(GlobalVec::new(1.0, 0.0, 0.0), GlobalVec::zeros(), 0.1);
        let state_before = *motion.state();

        let heavier = BodyConfig::new(5.0, Vector3::repeat(2.0)).with_damping(0.8);
        motion.reload(&heavier).unwrap();
        assert_eq!(motion.mass(), 5.0);
        assert_eq!(*motion.state(), state_before);
    }

    #[test]
    fn test_failed_reload_changes_nothing() {
        let mut motion = RigidBodyMotion::new(&unit_body()).unwrap();

        let broken =
            unit_body().with_restraint(RestraintSpec::new("x", "nonsense", Coeffs::new()));
        assert!(motion.reload(&broken).unwrap_err().is_unknown_kind());
        assert_eq!(motion.mass(), 1.0);
        assert!(motion.restraint_loads().is_empty());
    }

    // The ordering guards are debug assertions, absent from release builds
    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of order")]
    fn test_acceleration_before_position_panics() {
        let mut motion = RigidBodyMotion::new(&unit_body()).unwrap();
        motion.update_acceleration(GlobalVec::zeros(), GlobalVec::zeros(), 0.01);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of order")]
    fn test_double_position_update_panics() {
        let mut motion = RigidBodyMotion::new(&unit_body()).unwrap();
        motion.update_position(0.01, 0.01);
        motion.update_position(0.01, 0.01);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of order")]
    fn test_double_acceleration_update_panics() {
        let mut motion = RigidBodyMotion::new(&unit_body()).unwrap();
        motion.update_position(0.01, 0.01);
        motion.update_acceleration(GlobalVec::zeros(), GlobalVec::zeros(), 0.01);
        motion.update_acceleration(GlobalVec::zeros(), GlobalVec::zeros(), 0.01);
    }

    #[test]
    fn test_status_is_side_effect_free() {
        let motion = RigidBodyMotion::new(&unit_body()).unwrap();
        let before = *motion.state();
        motion.status();
        assert_eq!(*motion.state(), before);
    }
}
