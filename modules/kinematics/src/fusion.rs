//!
//! Fusion of many odometry wheels into a single robot twist.
//!
//! Translation is shared by the whole rigid body, so it's estimated first from
//! all wheels jointly.  Whatever travel a wheel saw beyond that translation is
//! attributed to rotation, and the per-wheel rotation estimates are averaged
//! with weights favouring wheels whose geometry amplifies the least noise.
//!

use nalgebra::Vector2;

use crate::geometry::WheelGeometry;
use crate::pose::RobotTwist;
use crate::{FACING_FORWARD, FACING_RIGHT};

/// One wheel's travel over a cycle along with where it is mounted
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WheelReading {
    /// Mounting of the wheel
    pub geometry: WheelGeometry,
    /// Linear distance rolled over the cycle
    pub delta: f32,
}

impl WheelReading {
    /// Pair a wheel's geometry with its travel
    pub const fn new(geometry: WheelGeometry, delta: f32) -> Self {
        Self { geometry, delta }
    }

    /// Travel left over after removing the robot translation
    fn residual(&self, forward: f32, strafe: f32) -> f32 {
        self.delta
            - self.geometry.dot_product(strafe, FACING_RIGHT)
            - self.geometry.dot_product(forward, FACING_FORWARD)
    }
}

/// Mean of every wheel's travel projected onto `direction`
fn mean_translation(readings: &[WheelReading], direction: f32) -> f32 {
    let total: f32 = readings
        .iter()
        .map(|reading| {
            reading
                .geometry
                .distance_traveled_towards_angle(reading.delta, direction)
        })
        .sum();
    total / readings.len() as f32
}

/// Combine every wheel's travel into the robot's twist for the cycle.
///
/// `center` is the pivot rotation is measured about.  All readings must come
/// from the same cycle.
pub fn fuse(readings: &[WheelReading], center: Vector2<f32>) -> RobotTwist {
    if readings.is_empty() {
        return RobotTwist::zero();
    }

    let forward = mean_translation(readings, FACING_FORWARD);
    let strafe = mean_translation(readings, FACING_RIGHT);

    let (weighted_rotation, total_weight) =
        readings
            .iter()
            .fold((0.0, 0.0), |(weighted_rotation, total_weight), reading| {
                let residual = reading.residual(forward, strafe);
                let estimate = reading.geometry.odo_delta_to_bot_angle(residual, center);
                let weight = reading.geometry.rotation_weight(center);
                (weighted_rotation + estimate * weight, total_weight + weight)
            });

    // No wheel can see rotation about this pivot
    let rotation = if total_weight == 0.0 {
        0.0
    } else {
        weighted_rotation / total_weight
    };

    RobotTwist::new(forward, strafe, rotation)
}
