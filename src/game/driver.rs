//! Tick loop shared by the headless runner and the tests.
//!
//! The engine itself never sleeps or reads input; both come through the
//! [`InputSource`] and [`Clock`] seams so the loop can be driven by a real
//! terminal or by scripted doubles.

use std::time::Duration;

use cpu_time::ProcessTime;

use super::engine::{GameEngine, TickReport};
use super::state::GameStatus;

/// Non-blocking source of stop requests
pub trait InputSource {
    /// Whether a stop was requested since the last poll. Must not block.
    fn poll_stop_requested(&mut self) -> bool;
}

/// Pause between ticks, and the CPU time spent for the end-of-run report
pub trait Clock {
    fn sleep(&mut self, duration: Duration);

    /// Process CPU time used since the clock was created
    fn elapsed_cpu_time(&self) -> Duration;
}

/// Input source that never asks to stop
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_stop_requested(&mut self) -> bool {
        false
    }
}

/// Requests a stop once `limit` polls have happened
#[derive(Debug, Clone, Copy)]
pub struct TickLimit {
    remaining: u64,
}

impl TickLimit {
    pub fn new(limit: u64) -> Self {
        Self { remaining: limit }
    }
}

impl InputSource for TickLimit {
    fn poll_stop_requested(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Clock backed by `std::thread::sleep` and the process CPU clock
#[derive(Debug, Clone, Copy)]
pub struct ThreadClock {
    started: ProcessTime,
}

impl ThreadClock {
    pub fn new() -> Self {
        Self {
            started: ProcessTime::now(),
        }
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    fn elapsed_cpu_time(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Tick until the run ends.
///
/// After every non-terminal tick the loop sleeps for the configured delay,
/// then polls `input`; a stop request ends the run at the following tick.
/// `on_tick` sees the engine and the report of every tick, the last one
/// included.
pub fn run<I, C, F>(
    engine: &mut GameEngine,
    input: &mut I,
    clock: &mut C,
    mut on_tick: F,
) -> GameStatus
where
    I: InputSource,
    C: Clock,
    F: FnMut(&GameEngine, &TickReport),
{
    let delay = engine.tick_delay();
    loop {
        let report = engine.tick();
        on_tick(engine, &report);
        if report.status.is_terminal() {
            return report.status;
        }

        clock.sleep(delay);
        if input.poll_stop_requested() {
            engine.request_stop();
        }
    }
}
