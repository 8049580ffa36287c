//!
//! Definitions of the errors that can occur while tracking odometry
//!

use core::fmt::Debug;

pub use kinematics::ConfigError;

/// A lifecycle transition the estimator refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The estimator loop is already running
    AlreadyRunning,
    /// The estimator was stopped and can't be started again
    Stopped,
}

// having the generic error type allows us to pass in the tick source's actual error type
#[derive(Debug, PartialEq)]
pub enum OdometryError<TickError: Debug> {
    /// Reading a wheel's encoder failed
    TickSource(TickError),
    /// The estimator was used in the wrong lifecycle state
    Lifecycle(LifecycleError),
}

impl<TickError: Debug> From<LifecycleError> for OdometryError<TickError> {
    fn from(value: LifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}
