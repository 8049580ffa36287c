//!
//! Pose and twist value types
//!

use nalgebra::{Rotation2, Vector2, Vector3};

/// A planar pose (x, y, heading).
///
/// As a cumulative estimate it lives in the field frame.  As the delta over one
/// cycle it lives in the robot frame at the start of that cycle, i.e.
/// (strafe, forward, rotation).
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Pose {
    /// Translation along x (right at heading 0)
    pub x: f32,
    /// Translation along y (forward at heading 0)
    pub y: f32,
    /// Heading (rad), counter-clockwise positive and not wrapped
    pub heading: f32,
}

impl Pose {
    /// Create a new pose
    pub const fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    /// The translational part of the pose
    pub fn position(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    /// Apply a robot-relative `delta` to this pose.
    ///
    /// The delta's translation is rotated by the current heading into the
    /// field frame before being added, and its rotation is added to the heading.
    pub fn translate_relative(&self, delta: Pose) -> Pose {
        let translation = Rotation2::new(self.heading) * delta.position();
        Pose::new(
            self.x + translation.x,
            self.y + translation.y,
            self.heading + delta.heading,
        )
    }
}

impl From<Vector3<f32>> for Pose {
    fn from(value: Vector3<f32>) -> Self {
        Pose::new(value[0], value[1], value[2])
    }
}

impl From<Pose> for Vector3<f32> {
    fn from(value: Pose) -> Self {
        Vector3::new(value.x, value.y, value.heading)
    }
}

/// Robot motion over a single sampling interval
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct RobotTwist {
    /// Translation toward the front of the robot
    pub forward: f32,
    /// Translation toward the right of the robot
    pub strafe: f32,
    /// Rotation (rad), counter-clockwise positive
    pub rotation: f32,
}

impl RobotTwist {
    /// Create a new twist
    pub const fn new(forward: f32, strafe: f32, rotation: f32) -> Self {
        Self { forward, strafe, rotation }
    }

    /// The twist of a robot that did not move
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<RobotTwist> for Pose {
    /// The straight-line (Euler) pose delta of a twist
    fn from(twist: RobotTwist) -> Self {
        Pose::new(twist.strafe, twist.forward, twist.rotation)
    }
}
