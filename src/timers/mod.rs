//! Cancellable delay and the options shared with [`interval`].
//!
//! Both primitives race a [`Clock`] delay against an [`AbortSignal`]
//! notification. Whichever side loses is dropped before the call returns: the
//! pending wake-up is cancelled and the signal listener unsubscribed, on every
//! exit path.
use futures_util::future::{select, Either};
use futures_util::pin_mut;

use crate::clock::Clock;
use crate::error::TimersError;
use crate::signal::{AbortSignal, NeverAbort};

mod interval;

pub use interval::{interval, Interval, IntervalState};

/// Per-call configuration of [`wait`] and [`interval`].
///
/// Without a signal the operation cannot be aborted.
pub struct WaitOptions<'a, S: AbortSignal = NeverAbort> {
    pub signal: Option<&'a S>,
}

impl WaitOptions<'static, NeverAbort> {
    /// Options without an abort signal.
    pub const fn new() -> Self {
        Self { signal: None }
    }
}

impl Default for WaitOptions<'static, NeverAbort> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: AbortSignal> WaitOptions<'a, S> {
    /// Options observing `signal`.
    pub const fn with_signal(signal: &'a S) -> Self {
        Self {
            signal: Some(signal),
        }
    }
}

impl<S: AbortSignal> Clone for WaitOptions<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: AbortSignal> Copy for WaitOptions<'_, S> {}

/// Wait `millis` milliseconds on `clock`.
///
/// Fails with [`TimersError::Aborted`] as soon as the signal in `options` is
/// aborted, without waiting for the remaining time. A signal that is already
/// aborted fails before any delay is scheduled.
pub async fn wait<C, S>(
    clock: &mut C,
    millis: u32,
    options: WaitOptions<'_, S>,
) -> Result<(), TimersError>
where
    C: Clock,
    S: AbortSignal,
{
    let Some(signal) = options.signal else {
        clock.delay_ms(millis).await;
        return Ok(());
    };

    signal.check()?;

    let delay = clock.delay_ms(millis);
    let aborted = signal.on_abort();
    pin_mut!(delay);
    pin_mut!(aborted);

    match select(delay, aborted).await {
        Either::Left(_) => Ok(()),
        Either::Right(_) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("Wait of {} ms aborted", millis);
            Err(TimersError::Aborted)
        }
    }
}
