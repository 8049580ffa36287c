//!
//! Geometry of a single odometry wheel.
//!
//! A passive odometry wheel only senses motion along its rolling direction.
//! Everything here is stateless: given where the wheel is mounted and which
//! way it faces, project its travel onto robot directions and convert between
//! wheel arc length and robot rotation about a pivot.
//!

use core::f32::consts::{FRAC_PI_2, PI};

use libm::{atan2f, cosf, fabsf, fmodf, hypotf};

use nalgebra::Vector2;

use crate::pose::RobotTwist;
use crate::{FACING_FORWARD, FACING_RIGHT, PERPENDICULAR_TOLERANCE};

/// Cosine that snaps to zero within [`PERPENDICULAR_TOLERANCE`] of π/2 + nπ
pub fn guarded_cos(angle: f32) -> f32 {
    let from_perpendicular = fmodf(fabsf(angle - FRAC_PI_2), PI);
    if from_perpendicular < PERPENDICULAR_TOLERANCE
        || PI - from_perpendicular < PERPENDICULAR_TOLERANCE
    {
        0.0
    } else {
        cosf(angle)
    }
}

/// Mounting of an odometry wheel on the chassis
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WheelGeometry {
    /// Position of the wheel's contact point in the robot frame
    offset: Vector2<f32>,
    /// Rolling direction (rad); 0 faces right, π/2 faces forward
    orientation: f32,
}

impl WheelGeometry {
    /// Describe a wheel at (`x`, `y`) rolling toward `orientation`.
    ///
    /// Sideways wheels have two equally valid orientations; either works as
    /// long as the encoder counts up when the wheel rolls that way.
    pub const fn new(x: f32, y: f32, orientation: f32) -> Self {
        Self {
            offset: Vector2::new(x, y),
            orientation,
        }
    }

    /// Position of the wheel in the robot frame
    pub fn offset(&self) -> Vector2<f32> {
        self.offset
    }

    /// Rolling direction of the wheel (rad)
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Robot travel toward `target_angle` implied by the wheel rolling
    /// `delta_position`, assuming all of the robot's motion was along that
    /// direction.
    ///
    /// Returns 0 when the wheel is perpendicular to `target_angle` since it
    /// can't observe that direction at all.
    pub fn distance_traveled_towards_angle(&self, delta_position: f32, target_angle: f32) -> f32 {
        let projection = guarded_cos(target_angle - self.orientation);
        if projection == 0.0 {
            0.0
        } else {
            delta_position / projection
        }
    }

    /// How much of a robot translation (`magnitude` toward `direction`) this
    /// wheel registers.  Inverse of [`Self::distance_traveled_towards_angle`].
    pub fn dot_product(&self, magnitude: f32, direction: f32) -> f32 {
        magnitude * cosf(direction - self.orientation)
    }

    /// Direction the wheel moves when the robot spins counter-clockwise about
    /// `center`
    pub fn cc_tangent_dir(&self, center: Vector2<f32>) -> f32 {
        let from_center = self.offset - center;
        atan2f(from_center.y, from_center.x) + FRAC_PI_2
    }

    /// Distance between the wheel and `center`
    pub fn distance_to(&self, center: Vector2<f32>) -> f32 {
        let from_center = self.offset - center;
        hypotf(from_center.x, from_center.y)
    }

    /// Distance between the wheel and the origin of the robot frame
    pub fn distance_to_center(&self) -> f32 {
        self.distance_to(Vector2::zeros())
    }

    /// Robot rotation about `center` that sweeps the wheel through `arclength`.
    ///
    /// A wheel sitting on the pivot can't sense rotation, so it yields 0.
    pub fn arclength_to_angle(&self, arclength: f32, center: Vector2<f32>) -> f32 {
        let radius = self.distance_to(center);
        if radius == 0.0 {
            0.0
        } else {
            arclength / radius
        }
    }

    /// Arc length the wheel sweeps when the robot rotates `angle` about `center`
    pub fn angle_to_arclength(&self, angle: f32, center: Vector2<f32>) -> f32 {
        angle * self.distance_to(center)
    }

    /// Wheel travel converted to radians of robot rotation about `center`
    pub fn odo_delta_to_bot_angle(&self, delta_position: f32, center: Vector2<f32>) -> f32 {
        let arclength =
            self.distance_traveled_towards_angle(delta_position, self.cc_tangent_dir(center));
        self.arclength_to_angle(arclength, center)
    }

    /// Wheel travel produced by rotating the robot `angle` about `center`.
    /// Inverse of [`Self::odo_delta_to_bot_angle`].
    pub fn robot_angle_to_odo_delta(&self, angle: f32, center: Vector2<f32>) -> f32 {
        let arclength = self.angle_to_arclength(angle, center);
        self.dot_product(arclength, self.cc_tangent_dir(center))
    }

    /// How much a rotation estimate from this wheel should count.
    ///
    /// Wheels far from the pivot and aligned with their tangent see the most
    /// travel per radian, so their estimates amplify the least noise.
    pub fn rotation_weight(&self, center: Vector2<f32>) -> f32 {
        self.distance_to(center) * fabsf(self.dot_product(1.0, self.cc_tangent_dir(center)))
    }

    /// Delta this wheel would report if the robot moved by `twist` (rotating
    /// about `center`)
    pub fn expected_delta(&self, twist: &RobotTwist, center: Vector2<f32>) -> f32 {
        self.dot_product(twist.strafe, FACING_RIGHT)
            + self.dot_product(twist.forward, FACING_FORWARD)
            + self.robot_angle_to_odo_delta(twist.rotation, center)
    }
}
