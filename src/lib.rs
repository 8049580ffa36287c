//!
//! Dead-reckoning odometry from passive tracking wheels.
//!
//! Any number of wheels at arbitrary mounting positions and orientations are
//! sampled each cycle, fused into a single robot twist and integrated along an
//! arc into a field-frame pose that other tasks can read at any time.
//!

#![no_std]

pub mod config;
pub use config::OdometryConfig;

pub mod errors;
pub use errors::{ConfigError, LifecycleError, OdometryError};

pub mod tick_source;
pub use tick_source::{QeiTicks, TickFn, TickSource};

pub mod wheel;
pub use wheel::OdometryWheel;

pub mod estimator;
pub use estimator::{Lifecycle, Odometry, OdometryState};

pub use kinematics::{
    curved_integrate, fuse, pose_delta, Pose, RobotTwist, WheelConfig, WheelGeometry,
    WheelReading, WheelSample,
};
