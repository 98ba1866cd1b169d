//! Asynchronous clock abstraction providing the single scheduling primitive
//! required by `wait` and `interval`.

/// Clock trait abstraction; must remain thread-safe when applicable.
///
/// The returned future is the pending wake-up. Dropping it before completion
/// cancels the wake-up, so implementations must release any timer slot they
/// hold when the future is dropped. Real and virtual time are both valid.
pub trait Clock {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}

/// [`Clock`] driven by the embassy time driver.
///
/// The firmware must link an `embassy-time` driver (HAL or `std` driver).
#[cfg(feature = "embassy")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl Clock for EmbassyClock {
    async fn delay_ms(&mut self, millis: u32) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(millis as u64)).await;
    }
}
