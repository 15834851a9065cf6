//! Step-protocol tests.
//!
//! Verifies the two-phase leapfrog against closed-form trajectories: constant
//! acceleration reproduces the parabola to round-off once the initial
//! acceleration is seeded, loads applied in the second phase move velocity
//! but not the already-drifted position, and projection locks hold their
//! directions bit-exactly.

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use sixdof_core::RigidBodyMotion;
use sixdof_types::{
    BodyConfig, BodyVec, Coeffs, ConstraintSpec, GlobalVec, MotionCheckpoint, MotionState,
    ProjectionSpec,
};

const G: f64 = 9.81;

/// Body with the initial acceleration seeded, as a restart from a converged
/// solution would have it.
fn primed_faller(mass: f64) -> RigidBodyMotion {
    let state = MotionState {
        acceleration: GlobalVec::new(0.0, 0.0, -G),
        ..MotionState::default()
    };
    let config = BodyConfig::new(mass, Vector3::repeat(1.0));
    RigidBodyMotion::restore(&config, MotionCheckpoint::fresh(state))
        .expect("body should build")
}

#[test]
fn primed_free_fall_is_exact() {
    let mass = 3.0;
    let mut motion = primed_faller(mass);

    let dt = 1e-3;
    let steps = 1000;
    for _ in 0..steps {
        motion.new_time();
        motion.update_position(dt, dt);
        motion.update_acceleration(GlobalVec::new(0.0, 0.0, -G * mass), GlobalVec::zeros(), dt);
    }

    // Velocity Verlet is exact for constant acceleration
    let t = dt * steps as f64;
    assert_relative_eq!(motion.centre_of_rotation().z, -0.5 * G * t * t, max_relative = 1e-9);
    assert_relative_eq!(motion.velocity().0.z, -G * t, max_relative = 1e-9);
}

#[test]
fn second_phase_loads_do_not_move_the_step() {
    let mut motion =
        RigidBodyMotion::new(&BodyConfig::default()).expect("body should build");

    let dt = 0.01;
    motion.new_time();
    motion.update_position(dt, dt);
    motion.update_acceleration(GlobalVec::new(1.0, 0.0, 0.0), GlobalVec::zeros(), dt);

    // The force arrived after the drift: velocity responds this step,
    // position only from the next
    assert_eq!(motion.centre_of_rotation(), Point3::origin());
    assert_relative_eq!(motion.velocity().0.x, 0.5 * dt, epsilon = 1e-16);

    motion.new_time();
    motion.update_position(dt, dt);
    assert_relative_eq!(motion.centre_of_rotation().x, dt * dt, epsilon = 1e-16);
}

#[test]
fn plane_lock_holds_the_normal_direction_bit_exactly() {
    let config = BodyConfig::default().with_translation(ProjectionSpec::Plane {
        normal: Vector3::new(0.0, 0.0, 1.0),
    });
    let mut motion =
        RigidBodyMotion::new(&config).expect("body should build");

    let dt = 0.01;
    let shove = GlobalVec::new(2.0, -1.0, 7.0);
    for _ in 0..500 {
        motion.new_time();
        motion.update_position(dt, dt);
        motion.update_acceleration(shove, GlobalVec::zeros(), dt);
    }

    assert_eq!(motion.velocity().0.z, 0.0);
    assert_eq!(motion.centre_of_rotation().z, 0.0);
    // The in-plane directions respond normally
    assert!(motion.velocity().0.x > 0.0);
    assert!(motion.velocity().0.y < 0.0);
}

#[test]
fn orientation_constraint_stops_all_rotation() {
    let config = BodyConfig::default().with_constraint(ConstraintSpec::new(
        "hold",
        "orientation",
        Coeffs::new(),
    ));
    let mut motion =
        RigidBodyMotion::new(&config).expect("body should build");

    let dt = 0.01;
    for _ in 0..100 {
        motion.new_time();
        motion.update_position(dt, dt);
        motion.update_acceleration(GlobalVec::zeros(), GlobalVec::new(5.0, -2.0, 3.0), dt);
    }

    assert_eq!(motion.angular_momentum(), BodyVec::zeros());
    assert_eq!(*motion.orientation().matrix(), nalgebra::Matrix3::identity());
}

#[test]
fn axis_constraint_keeps_spin_about_the_axis() {
    let config = BodyConfig::default().with_constraint(ConstraintSpec::new(
        "turntable",
        "axis",
        Coeffs::new().with_vector("axis", Vector3::new(0.0, 0.0, 1.0)),
    ));
    let mut motion =
        RigidBodyMotion::new(&config).expect("body should build");

    let dt = 0.01;
    motion.new_time();
    motion.update_position(dt, dt);
    motion.update_acceleration(GlobalVec::zeros(), GlobalVec::new(1.0, 2.0, 3.0), dt);

    // Only the z torque component survives the correction; the closing
    // half-kick banks half of it
    assert_relative_eq!(
        motion.angular_momentum().0,
        Vector3::new(0.0, 0.0, 0.5 * dt * 3.0),
        epsilon = 1e-15
    );
}

#[test]
fn variable_steps_stay_on_the_parabola() {
    let mut motion = primed_faller(1.0);

    // Alternate between h and h/2, always passing the interval the previous
    // loads were integrated over
    let h = 0.01;
    let mut t = 0.0;
    let mut dt0 = h;
    let mut long_step = true;
    while t < 1.0 {
        let dt = if long_step { h } else { 0.5 * h };
        motion.new_time();
        motion.update_position(dt, dt0);
        motion.update_acceleration(GlobalVec::new(0.0, 0.0, -G), GlobalVec::zeros(), dt);
        t += dt;
        dt0 = dt;
        long_step = !long_step;
    }

    // Changing the interval breaks the exactness of the fixed-step scheme;
    // the drift stays small and first-order in the step change
    assert_relative_eq!(motion.centre_of_rotation().z, -0.5 * G * t * t, max_relative = 5e-3);
    assert_relative_eq!(motion.velocity().0.z, -G * t, max_relative = 5e-3);
}
