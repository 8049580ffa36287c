//!
//! Encoder sampling for a single odometry wheel.
//!
//! A [`WheelSample`] is an immutable snapshot of one wheel's encoder history.
//! Each cycle a new snapshot is derived from the previous one and a fresh raw
//! reading, so no wheel state is mutated in place.
//!

use core::f32::consts::TAU;

use crate::error::ConfigError;
use crate::{DEFAULT_TICKS_PER_REVOLUTION, DEFAULT_WHEEL_RADIUS};

/// Resolve the signed tick change from `previous` to `current`.
///
/// The raw counter may wrap once per revolution, so the change is taken along
/// the shorter way around and always lands in
/// `(-ticks_per_revolution / 2, ticks_per_revolution / 2]`.
pub fn resolve_wrap(previous: i64, current: i64, ticks_per_revolution: u32) -> i64 {
    let ticks_per_revolution = i64::from(ticks_per_revolution.max(1));
    let forward = current.wrapping_sub(previous).rem_euclid(ticks_per_revolution);
    if 2 * forward > ticks_per_revolution {
        forward - ticks_per_revolution
    } else {
        forward
    }
}

/// Snapshot of a wheel's encoder state after a cycle
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WheelSample {
    /// Tick count the last delta was measured from
    accumulated_ticks: i64,
    /// Change in ticks over the last cycle
    delta_ticks: i64,
}

impl WheelSample {
    /// A sample whose history starts at `raw` with no motion recorded
    pub const fn baseline(raw: i64) -> Self {
        Self {
            accumulated_ticks: raw,
            delta_ticks: 0,
        }
    }

    /// Derive the next snapshot from a new raw encoder reading
    pub fn next(self, raw: i64, ticks_per_revolution: u32) -> Self {
        let accumulated_ticks = self.accumulated_ticks.wrapping_add(self.delta_ticks);
        Self {
            accumulated_ticks,
            delta_ticks: resolve_wrap(accumulated_ticks, raw, ticks_per_revolution),
        }
    }

    /// The difference in ticks between the two most recent readings
    pub fn delta_ticks(&self) -> i64 {
        self.delta_ticks
    }

    /// The tick count the current delta was measured from
    pub fn accumulated_ticks(&self) -> i64 {
        self.accumulated_ticks
    }
}

/// Physical description of an odometry wheel's encoder
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WheelConfig {
    /// Encoder ticks in one full wheel revolution
    ticks_per_revolution: u32,
    /// Wheel radius
    radius: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            ticks_per_revolution: DEFAULT_TICKS_PER_REVOLUTION,
            radius: DEFAULT_WHEEL_RADIUS,
        }
    }
}

impl WheelConfig {
    /// Describe a wheel, rejecting a zero resolution or a non-positive radius
    pub fn new(ticks_per_revolution: u32, radius: f32) -> Result<Self, ConfigError> {
        if ticks_per_revolution == 0 {
            return Err(ConfigError::ZeroTicksPerRevolution);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius);
        }

        Ok(Self {
            ticks_per_revolution,
            radius,
        })
    }

    /// Encoder ticks in one full revolution
    pub fn ticks_per_revolution(&self) -> u32 {
        self.ticks_per_revolution
    }

    /// Wheel radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance the contact point travels in one revolution
    pub fn circumference(&self) -> f32 {
        TAU * self.radius
    }

    /// Fraction of a revolution turned over the last cycle
    pub fn delta_revolutions(&self, sample: &WheelSample) -> f32 {
        sample.delta_ticks() as f32 / self.ticks_per_revolution as f32
    }

    /// Linear distance the wheel rolled over the last cycle
    pub fn delta_position(&self, sample: &WheelSample) -> f32 {
        self.delta_revolutions(sample) * self.circumference()
    }
}
