//!
//! Kinematics for passive odometry wheels.
//!
//! This crate is the math half of the odometry: turning encoder ticks into
//! wheel travel, decomposing the travel of wheels mounted at arbitrary
//! offsets into a robot twist, and integrating that twist along an arc.  It
//! lives in its own crate so it can be unit tested on the host without a
//! compilation target.
//!
//! Robot frame: +x is right, +y is forward and rotation is counter-clockwise
//! positive.
//!

#![no_std]

pub mod error;
pub use error::ConfigError;

pub mod pose;
pub use pose::{Pose, RobotTwist};

pub mod sample;
pub use sample::{WheelConfig, WheelSample};

pub mod geometry;
pub use geometry::WheelGeometry;

pub mod fusion;
pub use fusion::{fuse, WheelReading};

pub mod integrator;
pub use integrator::{curved_integrate, pose_delta};

/// Direction a wheel faces when it rolls toward the front of the robot (rad)
pub const FACING_FORWARD: f32 = core::f32::consts::FRAC_PI_2;
/// Direction a wheel faces when it rolls toward the right of the robot (rad)
pub const FACING_RIGHT: f32 = 0.0;

/// Angular band (rad) around perpendicular inside which a wheel is considered
/// blind to a direction
pub const PERPENDICULAR_TOLERANCE: f32 = 0.01;

/// Default encoder resolution of an odometry wheel
pub const DEFAULT_TICKS_PER_REVOLUTION: u32 = 1024;
/// Default odometry wheel radius (cm)
pub const DEFAULT_WHEEL_RADIUS: f32 = 3.0;
