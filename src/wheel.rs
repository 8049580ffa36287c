//!
//! An odometry wheel: a tick source composed with its mounting and encoder
//! description.
//!

use kinematics::{WheelConfig, WheelGeometry, WheelReading, WheelSample};

use crate::tick_source::TickSource;

/// A passive odometry wheel
pub struct OdometryWheel<T> {
    /// Encoder counter for this wheel
    source: T,
    /// Where the wheel is mounted and which way it rolls
    geometry: WheelGeometry,
    /// Encoder resolution and wheel radius
    config: WheelConfig,
    /// Encoder state after the most recent cycle
    sample: WheelSample,
}

impl<T: TickSource> OdometryWheel<T> {
    /// Create a new odometry wheel.
    ///
    /// The encoder history starts at a count of 0, so the first update
    /// reports the whole count as motion unless the wheel is [tared](Self::tare).
    pub fn new(source: T, geometry: WheelGeometry, config: WheelConfig) -> Self {
        Self {
            source,
            geometry,
            config,
            sample: WheelSample::default(),
        }
    }

    /// Treat the encoder's current count as the starting point
    pub fn tare(&mut self) -> Result<(), T::Error> {
        self.sample = WheelSample::baseline(self.source.ticks()?);
        Ok(())
    }

    /// Request and calculate the change in ticks of this wheel
    pub fn update_delta(&mut self) -> Result<(), T::Error> {
        let raw = self.read_ticks()?;
        self.commit(raw);
        Ok(())
    }

    /// Read the encoder without touching the wheel's sample
    pub(crate) fn read_ticks(&mut self) -> Result<i64, T::Error> {
        self.source.ticks()
    }

    /// Advance the wheel's sample with a raw reading
    pub(crate) fn commit(&mut self, raw: i64) {
        self.sample = self.sample.next(raw, self.config.ticks_per_revolution());
    }
}

impl<T> OdometryWheel<T> {
    /// The difference in ticks between the last two updates
    pub fn delta_ticks(&self) -> i64 {
        self.sample.delta_ticks()
    }

    /// Linear distance the wheel rolled between the last two updates
    pub fn delta_position(&self) -> f32 {
        self.config.delta_position(&self.sample)
    }

    /// This cycle's travel paired with the wheel's geometry
    pub fn reading(&self) -> WheelReading {
        WheelReading::new(self.geometry, self.delta_position())
    }

    /// Where the wheel is mounted
    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    /// Encoder resolution and wheel radius
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Encoder state after the most recent update
    pub fn sample(&self) -> WheelSample {
        self.sample
    }

    /// Give back the tick source
    pub fn release(self) -> T {
        self.source
    }
}
