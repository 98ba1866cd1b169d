//! # Ticker Example
//!
//! Minimal example demonstrating the basics of korri-timers:
//! - Share one abort controller between tasks
//! - Drive an interval until it is aborted
//! - Observe `wait` failing once the signal is aborted
//!
//! This example uses `std` and tokio for a quick trial run.
//!
//! ```bash
//! cargo run --example ticker
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use korri_timers::{interval, wait, AbortController, Clock, TimersError, WaitOptions};
use static_cell::StaticCell;
use tokio::time::{sleep, Duration, Instant};

/// Clock based on `tokio::time::sleep`.
struct TokioClock;

impl Clock for TokioClock {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

type Controller = AbortController<CriticalSectionRawMutex>;

static CONTROLLER: StaticCell<Controller> = StaticCell::new();

#[tokio::main]
async fn main() {
    println!("=== korri-timers Ticker ===\n");

    let controller: &'static Controller = CONTROLLER.init(Controller::new());
    let start = Instant::now();

    // ======================================================================
    // 1. Abort from another task after 350 ms
    // ======================================================================
    tokio::spawn(async move {
        sleep(Duration::from_millis(350)).await;
        println!("   [{:>4} ms] abort!", start.elapsed().as_millis());
        controller.abort();
    });

    // ======================================================================
    // 2. Tick every 100 ms until the abort ends the sequence
    // ======================================================================
    println!("1. Interval of 100 ms");

    let mut clock = TokioClock;
    let mut ticker = interval(&mut clock, 100, WaitOptions::with_signal(controller));
    while ticker.next().await.is_some() {
        println!(
            "   [{:>4} ms] tick #{}",
            start.elapsed().as_millis(),
            ticker.ticks()
        );
    }
    println!("   Sequence finished after {} tick(s)\n", ticker.ticks());

    // ======================================================================
    // 3. Waiting on an aborted signal fails straight away
    // ======================================================================
    println!("2. Wait of 1 s on the aborted signal");

    match wait(&mut clock, 1_000, WaitOptions::with_signal(controller)).await {
        Ok(()) => println!("   Waited the full second"),
        Err(TimersError::Aborted) => println!("   Error: {}", TimersError::Aborted),
    }

    println!("\n=== Done ===");
}
