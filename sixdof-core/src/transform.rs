//! Point transforms carrying initial-configuration geometry with the body.

use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion};
use sixdof_types::Orientation;

// Blend weights this close to 0 or 1 snap to the exact endpoint
const BLEND_EPS: f64 = 1e-10;

/// Affine map from the initial configuration to the current one.
///
/// A snapshot of the integrator's output, obtained from
/// [`crate::RigidBodyMotion::transformation`]; it performs no integration of
/// its own. Points defined once in the initial configuration (mesh vertices,
/// attachment points) are carried to their current global position with
/// `cor + Q Q0^T (p - cor0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTransform {
    initial_centre_of_rotation: Point3<f64>,
    initial_orientation: Orientation,
    centre_of_rotation: Point3<f64>,
    orientation: Orientation,
}

impl MotionTransform {
    /// Build from the frozen initial pose and the live pose.
    #[must_use]
    pub fn new(
        initial_centre_of_rotation: Point3<f64>,
        initial_orientation: Orientation,
        centre_of_rotation: Point3<f64>,
        orientation: Orientation,
    ) -> Self {
        Self {
            initial_centre_of_rotation,
            initial_orientation,
            centre_of_rotation,
            orientation,
        }
    }

    /// Relative rotation `Q Q0^T` from the initial to the current frame.
    #[must_use]
    pub fn relative_rotation(&self) -> Matrix3<f64> {
        self.orientation.relative_to(&self.initial_orientation)
    }

    /// Current global position of a point given in the initial configuration.
    #[must_use]
    pub fn transform_point(&self, initial: Point3<f64>) -> Point3<f64> {
        self.centre_of_rotation
            + self.relative_rotation() * (initial - self.initial_centre_of_rotation)
    }

    /// Transform a whole point set.
    #[must_use]
    pub fn transform_points(&self, initial: &[Point3<f64>]) -> Vec<Point3<f64>> {
        initial.iter().map(|&p| self.transform_point(p)).collect()
    }

    /// Transform a point set with per-point blend weights in `[0, 1]`.
    ///
    /// A weight of 0 leaves the point in place and 1 applies the full rigid
    /// motion; intermediate weights blend the translation linearly and the
    /// rotation by slerp. Hosts use this for partial motion regions where
    /// geometry near the body follows it fully and geometry farther out
    /// follows it less.
    #[must_use]
    pub fn transform_points_scaled(
        &self,
        initial: &[Point3<f64>],
        scale: &[f64],
    ) -> Vec<Point3<f64>> {
        debug_assert_eq!(initial.len(), scale.len(), "one blend weight per point");

        let translation = self.centre_of_rotation - self.initial_centre_of_rotation;
        let relative = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(
            self.relative_rotation(),
        ));

        initial
            .iter()
            .zip(scale)
            .map(|(&point, &weight)| {
                if weight <= BLEND_EPS {
                    point
                } else if weight >= 1.0 - BLEND_EPS {
                    self.transform_point(point)
                } else {
                    let partial = UnitQuaternion::identity().slerp(&relative, weight);
                    self.initial_centre_of_rotation
                        + translation * weight
                        + partial * (point - self.initial_centre_of_rotation)
                }
            })
            .collect()
    }
}
