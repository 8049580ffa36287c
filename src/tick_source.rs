//!
//! Encoder tick sources for odometry wheels.
//!
//! A tick source is the only thing the odometry needs from the hardware: a
//! counter that moves when the wheel rolls.  Each hardware variant implements
//! [`TickSource`] once and the geometry is layered on top by composition.
//!

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::Qei;

/// A wheel encoder counter
pub trait TickSource {
    /// Error reported when the counter can't be read
    type Error: Debug;

    /// Read the current tick count
    fn ticks(&mut self) -> Result<i64, Self::Error>;
}

// lets wheels backed by different hardware share one estimator as
// `&mut dyn TickSource<Error = E>`
impl<T: TickSource + ?Sized> TickSource for &mut T {
    type Error = T::Error;

    fn ticks(&mut self) -> Result<i64, Self::Error> {
        (**self).ticks()
    }
}

/// Tick source backed by a function returning the current count
pub struct TickFn<F> {
    read: F,
}

impl<F: FnMut() -> i64> TickFn<F> {
    /// Wrap a function that returns the wheel's tick count
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F: FnMut() -> i64> TickSource for TickFn<F> {
    type Error = Infallible;

    fn ticks(&mut self) -> Result<i64, Self::Error> {
        Ok((self.read)())
    }
}

/// Hardware counter widths that roll over
pub trait QeiCount: Copy {
    /// Signed change from `previous` to `self`, assuming less than half a
    /// rollover happened in between
    fn wrapping_delta(self, previous: Self) -> i64;
}

impl QeiCount for u16 {
    fn wrapping_delta(self, previous: Self) -> i64 {
        i64::from(self.wrapping_sub(previous) as i16)
    }
}

impl QeiCount for u32 {
    fn wrapping_delta(self, previous: Self) -> i64 {
        i64::from(self.wrapping_sub(previous) as i32)
    }
}

/// Tick source backed by a quadrature encoder interface peripheral.
///
/// The peripheral's counter is only 16 or 32 bits wide, so its overflows and
/// underflows are unrolled into a continuous count starting at 0.
pub struct QeiTicks<Q: Qei> {
    qei: Q,
    last_count: Q::Count,
    ticks: i64,
}

impl<Q> QeiTicks<Q>
where
    Q: Qei,
    Q::Count: QeiCount,
{
    /// Start counting from the peripheral's current position
    pub fn new(qei: Q) -> Self {
        let last_count = qei.count();
        Self {
            qei,
            last_count,
            ticks: 0,
        }
    }

    /// Give back the peripheral
    pub fn release(self) -> Q {
        self.qei
    }
}

impl<Q> TickSource for QeiTicks<Q>
where
    Q: Qei,
    Q::Count: QeiCount,
{
    type Error = Infallible;

    fn ticks(&mut self) -> Result<i64, Self::Error> {
        let count = self.qei.count();
        self.ticks += count.wrapping_delta(self.last_count);
        self.last_count = count;
        Ok(self.ticks)
    }
}
