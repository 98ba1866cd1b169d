//! `korri-timers` library: cancellable timing primitives for `no_std` async
//! code. The crate exposes a one-shot delay ([`wait`]), a lazy repeating
//! timer sequence ([`interval`]), the abort signal both of them observe, and
//! the clock abstraction they are scheduled on.
#![cfg_attr(not(test), no_std)]
//==================================================================================
/// Scheduler/clock abstraction the timers sleep on.
pub mod clock;
/// The single error kind raised by the timing primitives.
pub mod error;
/// Cooperative cancellation: the abort signal contract and a shared controller.
pub mod signal;
/// `wait` and `interval` themselves.
pub mod timers;
//==================================================================================
pub use clock::Clock;
#[cfg(feature = "embassy")]
pub use clock::EmbassyClock;
pub use error::TimersError;
pub use signal::{AbortController, AbortSignal, NeverAbort};
pub use timers::{interval, wait, Interval, IntervalState, WaitOptions};
