//! Lazy repeating timer: one tick per period, until the signal aborts.
use futures_core::Stream;

use super::{wait, WaitOptions};
use crate::clock::Clock;
use crate::error::TimersError;
use crate::signal::AbortSignal;

/// Build an [`Interval`] ticking every `millis` milliseconds on `clock`.
///
/// Nothing is scheduled until the first [`Interval::next`].
pub fn interval<'a, C, S>(
    clock: &'a mut C,
    millis: u32,
    options: WaitOptions<'a, S>,
) -> Interval<'a, C, S>
where
    C: Clock,
    S: AbortSignal,
{
    Interval {
        clock,
        period_ms: millis,
        options,
        state: IntervalState::Idle,
        ticks: 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Where an [`Interval`] stands between two pulls.
pub enum IntervalState {
    /// Ready for the next pull.
    Idle,
    /// A pull is waiting for its delay. Left behind if that pull was dropped;
    /// the next pull then starts a fresh delay.
    Waiting,
    /// Aborted. Every pull returns `None`.
    Terminal,
}

/// Pull-based tick sequence returned by [`interval`].
///
/// Abort ends the sequence instead of raising [`TimersError`]: the pull in
/// flight and every later pull return `None`.
pub struct Interval<'a, C: Clock, S: AbortSignal> {
    clock: &'a mut C,
    period_ms: u32,
    options: WaitOptions<'a, S>,
    state: IntervalState,
    ticks: u64,
}

impl<'a, C: Clock, S: AbortSignal> Interval<'a, C, S> {
    /// Wait one period and yield a tick, or `None` once aborted.
    pub async fn next(&mut self) -> Option<()> {
        if self.state == IntervalState::Terminal {
            return None;
        }

        self.state = IntervalState::Waiting;
        match wait(&mut *self.clock, self.period_ms, self.options).await {
            Ok(()) => {
                self.state = IntervalState::Idle;
                self.ticks += 1;

                #[cfg(feature = "defmt")]
                defmt::trace!("Interval tick #{}", self.ticks);

                Some(())
            }
            Err(TimersError::Aborted) => {
                self.state = IntervalState::Terminal;

                #[cfg(feature = "defmt")]
                defmt::info!("Interval terminated after {} tick(s)", self.ticks);

                None
            }
        }
    }

    /// Current position in the Idle/Waiting/Terminal cycle.
    pub fn state(&self) -> IntervalState {
        self.state
    }

    /// Ticks produced so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Delay between two ticks, in milliseconds.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Turn the sequence into a [`Stream`] of ticks.
    pub fn into_stream(self) -> impl Stream<Item = ()> + 'a
    where
        C: 'a,
        S: 'a,
    {
        futures_util::stream::unfold(self, |mut interval| async move {
            let tick = interval.next().await?;
            Some((tick, interval))
        })
    }
}
