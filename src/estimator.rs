//!
//! The odometry estimator.
//!
//! [`OdometryState`] holds everything other tasks may look at: the cumulative
//! pose and the lifecycle of the loop.  [`Odometry`] owns the wheels and is the
//! only thing that ever writes the pose.  A cycle is exposed on its own through
//! [`Odometry::update`] so callers can drive it from whatever scheduler they
//! have; [`Odometry::run`] is a blocking loop for when a delay is all there is.
//!

use core::cell::Cell;

use critical_section::Mutex;
use embedded_hal::blocking::delay::DelayMs;
use log::{error, info, trace, warn};
use nalgebra::Vector2;
use portable_atomic::{AtomicU8, Ordering};

use kinematics::{curved_integrate, fuse, Pose, WheelReading};

use crate::config::OdometryConfig;
use crate::errors::{LifecycleError, OdometryError};
use crate::tick_source::TickSource;
use crate::wheel::OdometryWheel;

/// Lifecycle of the estimator loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Lifecycle {
    /// Not started yet
    Idle = 0,
    /// Running cycles
    Running = 1,
    /// Stopped for good
    Stopped = 2,
}

impl From<u8> for Lifecycle {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Running,
            _ => Self::Stopped,
        }
    }
}

/// State shared between the estimator loop and anyone reading the pose
pub struct OdometryState {
    /// The cumulative pose, replaced whole every cycle
    pose: Mutex<Cell<Pose>>,
    /// The current [`Lifecycle`]
    lifecycle: AtomicU8,
}

impl Default for OdometryState {
    fn default() -> Self {
        Self::new(Pose::new(0.0, 0.0, 0.0))
    }
}

impl OdometryState {
    /// Create the shared state starting at `initial`
    pub const fn new(initial: Pose) -> Self {
        Self {
            pose: Mutex::new(Cell::new(initial)),
            lifecycle: AtomicU8::new(Lifecycle::Idle as u8),
        }
    }

    /// The current best estimate of the robot's pose
    pub fn position(&self) -> Pose {
        critical_section::with(|cs| self.pose.borrow(cs).get())
    }

    /// Replace the cumulative pose
    fn replace(&self, pose: Pose) {
        critical_section::with(|cs| self.pose.borrow(cs).set(pose));
    }

    /// The current lifecycle of the estimator loop
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from(self.lifecycle.load(Ordering::Acquire))
    }

    /// Whether the estimator loop should keep cycling
    pub fn is_running(&self) -> bool {
        self.lifecycle() == Lifecycle::Running
    }

    /// Move from idle to running.  A stopped estimator can't be restarted.
    pub fn start(&self) -> Result<(), LifecycleError> {
        match self.lifecycle.compare_exchange(
            Lifecycle::Idle as u8,
            Lifecycle::Running as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(current) => {
                let err = match Lifecycle::from(current) {
                    Lifecycle::Stopped => LifecycleError::Stopped,
                    _ => LifecycleError::AlreadyRunning,
                };
                warn!("Refusing to start odometry: {:?}", err);
                Err(err)
            }
        }
    }

    /// Ask the estimator loop to stop after its current cycle
    pub fn end(&self) {
        self.lifecycle.store(Lifecycle::Stopped as u8, Ordering::Release);
    }
}

/// Dead-reckoning estimator for `N` odometry wheels.
///
/// Wheels on different hardware can be mixed as
/// `OdometryWheel<&mut dyn TickSource<Error = E>>`.
pub struct Odometry<'a, T, const N: usize> {
    /// The odometry wheels
    wheels: [OdometryWheel<T>; N],
    /// Loop tunables
    config: OdometryConfig,
    /// Pose and lifecycle shared with readers
    state: &'a OdometryState,
}

impl<'a, T: TickSource, const N: usize> Odometry<'a, T, N> {
    /// Create an estimator publishing into `state`
    pub fn new(wheels: [OdometryWheel<T>; N], config: OdometryConfig, state: &'a OdometryState) -> Self {
        Self {
            wheels,
            config,
            state,
        }
    }

    /// The state this estimator publishes into
    pub fn state(&self) -> &'a OdometryState {
        self.state
    }

    /// The odometry wheels
    pub fn wheels(&self) -> &[OdometryWheel<T>; N] {
        &self.wheels
    }

    /// The pivot rotation is measured about
    pub fn center_of_rotation(&self) -> Vector2<f32> {
        self.config.center_of_rotation
    }

    /// Move the pivot rotation is measured about
    pub fn set_center_of_rotation(&mut self, center: Vector2<f32>) {
        self.config.center_of_rotation = center;
    }

    /// Overwrite the cumulative pose, e.g. after relocalizing
    pub fn set_position(&mut self, pose: Pose) {
        self.state.replace(pose);
    }

    /// Treat every wheel's current count as its starting point
    pub fn tare(&mut self) -> Result<(), OdometryError<T::Error>> {
        for wheel in self.wheels.iter_mut() {
            wheel.tare().map_err(OdometryError::TickSource)?;
        }
        Ok(())
    }

    /// Run a single cycle and return the new cumulative pose.
    ///
    /// Refused once the estimator has been stopped.
    pub fn update(&mut self) -> Result<Pose, OdometryError<T::Error>> {
        if self.state.lifecycle() == Lifecycle::Stopped {
            return Err(LifecycleError::Stopped.into());
        }
        self.cycle()
    }

    /// Refresh every wheel, fuse and integrate their travel and publish the
    /// new pose
    fn cycle(&mut self) -> Result<Pose, OdometryError<T::Error>> {
        // Every encoder is read before any wheel's sample changes, so a failed
        // read leaves all wheels on the previous cycle
        let mut raw = [0i64; N];
        for (raw, wheel) in raw.iter_mut().zip(self.wheels.iter_mut()) {
            *raw = wheel.read_ticks().map_err(OdometryError::TickSource)?;
        }
        for (wheel, raw) in self.wheels.iter_mut().zip(raw) {
            wheel.commit(raw);
        }

        let readings: [WheelReading; N] = core::array::from_fn(|i| self.wheels[i].reading());
        let twist = fuse(&readings, self.config.center_of_rotation);
        let delta = curved_integrate(twist);

        let pose = self.state.position().translate_relative(delta);
        self.state.replace(pose);

        trace!("Twist: {:?}, Pose: {:?}", twist, pose);

        Ok(pose)
    }

    /// Cycle every `period_ms` until [`OdometryState::end`] is called.
    ///
    /// The stop request is only checked between cycles.  A failing tick source
    /// stops the estimator and its error is returned.
    pub fn run<D: DelayMs<u32>>(&mut self, delay: &mut D) -> Result<(), OdometryError<T::Error>> {
        self.state.start()?;
        info!("Odometry started with {} wheels", N);

        while self.state.is_running() {
            if let Err(err) = self.cycle() {
                error!("Odometry stopped on a tick source error: {:?}", err);
                self.state.end();
                return Err(err);
            }
            delay.delay_ms(self.config.period_ms);
        }

        info!("Odometry stopped at {:?}", self.state.position());
        Ok(())
    }
}
