//!
//! Arc integration of a robot twist.
//!
//! Rather than assuming the robot moved in a straight line and then turned,
//! assume forward, strafe and rotation all changed at a constant rate over the
//! cycle.  The path is then an arc: take the straight segment from (0, 0) to
//! (dx, dy) and bend it into a circular sector subtending the rotation.
//!

use core::f32::consts::FRAC_PI_2;

use libm::{atan2f, hypotf, sinf};

use nalgebra::{Rotation2, Vector2};

use crate::fusion::{fuse, WheelReading};
use crate::pose::{Pose, RobotTwist};

/// Convert a twist into the pose delta of a constant-curvature path.
///
/// The delta is expressed in the robot frame at the start of the cycle; use
/// [`Pose::translate_relative`] to apply it to a field-frame pose.
pub fn curved_integrate(twist: RobotTwist) -> Pose {
    let (dx, dy, dr) = (twist.strafe, twist.forward, twist.rotation);

    // Without rotation there is no circle; the path is the straight segment
    if dr == 0.0 {
        return Pose::from(twist);
    }

    // Travelled arc of a circle with radius arclength / dr.  The endpoint
    // (r·cos(dr) - r, r·sin(dr)) is written with the half-angle identity so it
    // keeps its precision for small rotations.
    let arclength = hypotf(dx, dy);
    let half_turn = sinf(dr / 2.0);
    let curved = Vector2::new(
        -2.0 * arclength * half_turn * half_turn / dr,
        arclength * sinf(dr) / dr,
    );

    // Start the arc tangent to the straight-line direction of travel
    let rotated = Rotation2::new(atan2f(dy, dx) - FRAC_PI_2) * curved;

    Pose::new(rotated.x, rotated.y, dr)
}

/// The pose delta for one cycle of wheel readings, rotating about `center`
pub fn pose_delta(readings: &[WheelReading], center: Vector2<f32>) -> Pose {
    curved_integrate(fuse(readings, center))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    use core::f32::consts::PI;

    use crate::geometry::WheelGeometry;
    use crate::{FACING_FORWARD, FACING_RIGHT};

    const TOLERANCE: f32 = 0.0001;

    fn within_tolerance(value: f32, target: f32) -> bool {
        target > value - TOLERANCE && target < value + TOLERANCE
    }

    #[test]
    fn test_no_rotation_is_unchanged() {
        let twist = RobotTwist::new(2.0, -1.0, 0.0);

        assert_eq!(curved_integrate(twist), Pose::new(-1.0, 2.0, 0.0));
        assert_eq!(curved_integrate(RobotTwist::zero()), Pose::default());
    }

    #[test]
    fn test_small_rotation_converges_to_straight_line() {
        let twist = RobotTwist::new(2.0, 1.0, 0.0);
        let straight = curved_integrate(twist);
        let length = hypotf(1.0, 2.0);

        for dr in [0.1, 0.01, 0.001, -0.001] {
            let curved = curved_integrate(RobotTwist::new(2.0, 1.0, dr));
            let error = hypotf(curved.x - straight.x, curved.y - straight.y);

            // The endpoint drifts sideways by about length * dr / 2
            assert!(error <= length * libm::fabsf(dr), "dr = {dr}, error = {error}");
            assert_eq!(curved.heading, dr);
        }
    }

    #[test]
    fn test_quarter_turn_left() {
        let pose = curved_integrate(RobotTwist::new(FRAC_PI_2, 0.0, FRAC_PI_2));

        assert!(within_tolerance(pose.x, -1.0));
        assert!(within_tolerance(pose.y, 1.0));
        assert!(within_tolerance(pose.heading, FRAC_PI_2));
    }

    #[test]
    fn test_quarter_turn_right() {
        let pose = curved_integrate(RobotTwist::new(FRAC_PI_2, 0.0, -FRAC_PI_2));

        assert!(within_tolerance(pose.x, 1.0));
        assert!(within_tolerance(pose.y, 1.0));
        assert!(within_tolerance(pose.heading, -FRAC_PI_2));
    }

    #[test]
    fn test_strafing_arc() {
        let pose = curved_integrate(RobotTwist::new(0.0, FRAC_PI_2, FRAC_PI_2));

        assert!(within_tolerance(pose.x, 1.0));
        assert!(within_tolerance(pose.y, 1.0));
    }

    #[test]
    fn test_half_circle_returns_to_the_side() {
        let pose = curved_integrate(RobotTwist::new(PI, 0.0, PI));

        assert!(within_tolerance(pose.x, -2.0));
        assert!(within_tolerance(pose.y, 0.0));
    }

    #[test]
    fn test_chord_length() {
        let (forward, strafe, rotation) = (3.0, 4.0, 0.7);
        let pose = curved_integrate(RobotTwist::new(forward, strafe, rotation));

        let radius = 5.0 / rotation;
        let chord = 2.0 * radius * sinf(rotation / 2.0);

        assert!(within_tolerance(hypotf(pose.x, pose.y), chord));
    }

    #[test]
    fn test_rotation_in_place() {
        let pose = curved_integrate(RobotTwist::new(0.0, 0.0, 0.3));

        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.heading, 0.3);
    }

    #[test]
    fn test_straight_branch_needs_no_reorientation() {
        // Re-orienting the straight segment the same way as the curved branch
        // maps (0, length) back onto (dx, dy), so skipping it loses nothing
        let (dx, dy) = (-1.5, 0.5);
        let aligned = Vector2::new(0.0, hypotf(dx, dy));
        let reoriented = Rotation2::new(atan2f(dy, dx) - FRAC_PI_2) * aligned;

        let straight = curved_integrate(RobotTwist::new(dy, dx, 0.0));

        assert!(within_tolerance(reoriented.x, straight.x));
        assert!(within_tolerance(reoriented.y, straight.y));
    }

    #[test]
    fn test_both_branches_rotate_into_field_frame() {
        let start = Pose::new(1.0, 1.0, FRAC_PI_2);

        let straight = start.translate_relative(curved_integrate(RobotTwist::new(1.0, 0.0, 0.0)));
        let nearly_straight =
            start.translate_relative(curved_integrate(RobotTwist::new(1.0, 0.0, 1e-4)));

        // Facing the field's -x direction, forward travel decreases x
        assert!(within_tolerance(straight.x, 0.0));
        assert!(within_tolerance(straight.y, 1.0));
        assert!(within_tolerance(nearly_straight.x, straight.x));
        assert!(within_tolerance(nearly_straight.y, straight.y));
    }

    #[test]
    fn test_pose_delta_turning_in_place() {
        let readings = [
            WheelReading::new(WheelGeometry::new(10.0, 0.0, FACING_FORWARD), 1.0),
            WheelReading::new(WheelGeometry::new(-10.0, 0.0, FACING_FORWARD), -1.0),
            WheelReading::new(WheelGeometry::new(0.0, -10.0, FACING_RIGHT), 1.0),
            WheelReading::new(WheelGeometry::new(0.0, 10.0, FACING_RIGHT), -1.0),
        ];

        let delta = pose_delta(&readings, Vector2::zeros());

        assert!(within_tolerance(delta.x, 0.0));
        assert!(within_tolerance(delta.y, 0.0));
        assert!(within_tolerance(delta.heading, 0.1));
    }
}
