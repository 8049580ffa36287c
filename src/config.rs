//!
//! Odometry Constants and Configuration
//!

use nalgebra::Vector2;

pub use kinematics::{
    DEFAULT_TICKS_PER_REVOLUTION, DEFAULT_WHEEL_RADIUS, FACING_FORWARD, FACING_RIGHT,
    PERPENDICULAR_TOLERANCE,
};

/// Pause between estimator cycles (ms)
pub const CYCLE_PERIOD_MS: u32 = 1;

/// Tunables for the estimator loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OdometryConfig {
    /// Pause between cycles (ms)
    pub period_ms: u32,
    /// Pivot that rotation is measured about, in the robot frame
    pub center_of_rotation: Vector2<f32>,
}

impl Default for OdometryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OdometryConfig {
    /// The default configuration: a 1 ms cycle pivoting about the origin
    pub const fn new() -> Self {
        Self {
            period_ms: CYCLE_PERIOD_MS,
            center_of_rotation: Vector2::new(0.0, 0.0),
        }
    }

    /// Set the pause between cycles
    pub fn with_period_ms(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms;
        self
    }

    /// Set the pivot rotation is measured about
    pub fn with_center_of_rotation(mut self, x: f32, y: f32) -> Self {
        self.center_of_rotation = Vector2::new(x, y);
        self
    }
}
