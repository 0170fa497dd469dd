//! Terminal-free runner: plays the autopilot to the end and prints a report.
//!
//! Useful for checking a layout quickly, e.g. with `--tick-ms 0`.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::game::{
    Clock, GameConfig, GameEngine, GameStatus, NoInput, ThreadClock, TickLimit, TickReport,
    driver,
};
use crate::metrics::RunMetrics;

pub struct HeadlessMode {
    engine: GameEngine,
    metrics: RunMetrics,
    max_ticks: Option<u64>,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, max_ticks: Option<u64>) -> Result<Self> {
        let engine = GameEngine::new(config).context("Invalid game configuration")?;

        Ok(Self {
            engine,
            metrics: RunMetrics::new(),
            max_ticks,
        })
    }

    /// Run to a terminal state. Without a tick limit a snake stuck in a loop
    /// runs forever.
    pub fn run(&mut self) -> Result<GameStatus> {
        let mut clock = ThreadClock::new();
        let metrics = &mut self.metrics;
        let mut record = |_: &GameEngine, report: &TickReport| {
            metrics.record(report);
            debug!(outcome = ?report.outcome, head = ?report.head, "tick");
        };

        let status = match self.max_ticks {
            Some(limit) => driver::run(
                &mut self.engine,
                &mut TickLimit::new(limit),
                &mut clock,
                &mut record,
            ),
            None => driver::run(&mut self.engine, &mut NoInput, &mut clock, &mut record),
        };
        self.metrics.cpu_time = clock.elapsed_cpu_time();

        info!(status = status.label(), moves = self.metrics.moves, "run finished");
        Ok(status)
    }

    pub fn report(&self) -> String {
        self.metrics
            .summary(self.engine.state().status, self.engine.state().quota)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn config() -> GameConfig {
        GameConfig {
            targets: vec![Cell::new(15, 5), Cell::new(15, 8)],
            quota: 2,
            tick_delay_micros: 0,
            ..GameConfig::open(30, 12)
        }
    }

    #[test]
    fn test_headless_run_wins() {
        let mut mode = HeadlessMode::new(config(), None).unwrap();
        let status = mode.run().unwrap();

        assert_eq!(status, GameStatus::Won);
        assert!(mode.report().contains("Targets eaten: 2/2"));
        assert!(mode.report().contains("CPU time: "));
    }

    #[test]
    fn test_tick_limit_stops_run() {
        let mut mode = HeadlessMode::new(config(), Some(2)).unwrap();
        let status = mode.run().unwrap();

        assert_eq!(status, GameStatus::Stopped);
        assert_eq!(mode.metrics.moves, 2);
    }

    #[test]
    fn test_default_layout_terminates() {
        let config = GameConfig {
            tick_delay_micros: 0,
            ..GameConfig::default()
        };
        let mut mode = HeadlessMode::new(config, Some(5_000)).unwrap();
        let status = mode.run().unwrap();
        assert!(status.is_terminal());
        assert!(mode.metrics.cpu_time > std::time::Duration::ZERO);
    }
}
