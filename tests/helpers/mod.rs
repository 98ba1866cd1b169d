/// Test doubles driving the timers on tokio's (paused) clock.
use korri_timers::{AbortController, Clock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use tokio::time::{sleep, Duration};

#[allow(dead_code)]
pub type Controller = AbortController<CriticalSectionRawMutex>;

#[allow(dead_code)]
/// Clock based on `tokio::time::sleep`.
pub struct TokioClock;

impl Clock for TokioClock {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Clock reporting how many delays are currently scheduled.
///
/// A delay counts as pending from the moment it is created until its future
/// is dropped, whether it completed or was cancelled.
pub struct CountingClock {
    pending: Arc<AtomicUsize>,
    scheduled: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingClock {
    /// Delays created and not yet dropped.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Delays created since the clock was built.
    pub fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::SeqCst)
    }
}

/// Decrements the pending counter when the delay future goes away.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Clock for CountingClock {
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl std::future::Future<Output = ()> + 'a {
        self.scheduled.fetch_add(1, Ordering::SeqCst);
        self.pending.fetch_add(1, Ordering::SeqCst);
        let guard = PendingGuard(self.pending.clone());
        async move {
            let _guard = guard;
            sleep(Duration::from_millis(millis as u64)).await;
        }
    }
}
