//! Cooperative cancellation.
//!
//! The timers never own cancellation: they only read an [`AbortSignal`]
//! supplied by the caller, and subscribe to it for the duration of one
//! operation. [`AbortController`] is the crate-provided signal, a tiny
//! publish/subscribe flag any number of operations can observe at once.
use crate::error::TimersError;

mod controller;

pub use controller::{AbortController, AbortListener};

/// Read-only view of an abort flag.
pub trait AbortSignal {
    /// Whether the signal has already been aborted.
    fn is_aborted(&self) -> bool;

    /// Subscribe to the abort notification.
    ///
    /// The returned future resolves once the signal is aborted (immediately if
    /// it already is). Dropping it unsubscribes.
    fn on_abort(&self) -> impl core::future::Future<Output = ()> + '_;

    /// Fail with [`TimersError::Aborted`] if the signal is already aborted.
    fn check(&self) -> Result<(), TimersError> {
        if self.is_aborted() {
            Err(TimersError::Aborted)
        } else {
            Ok(())
        }
    }
}

/// Signal that is never aborted. Stands in for "no signal supplied".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    fn is_aborted(&self) -> bool {
        false
    }

    fn on_abort(&self) -> impl core::future::Future<Output = ()> + '_ {
        core::future::pending()
    }
}
