//!
//! Errors that can occur when describing an odometry wheel
//!

/// Rejected wheel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// An encoder must report at least one tick per revolution
    ZeroTicksPerRevolution,
    /// The wheel radius must be finite and greater than zero
    InvalidRadius,
}
