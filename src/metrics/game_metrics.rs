use std::time::{Duration, Instant};

use crate::game::{GameStatus, TickOutcome, TickReport};

/// Counters collected over one run, reported when it ends
pub struct RunMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Process CPU time, filled in from the run's clock
    pub cpu_time: Duration,
    pub moves: u32,
    pub targets_eaten: usize,
    pub portal_crossings: u32,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            cpu_time: Duration::ZERO,
            moves: 0,
            targets_eaten: 0,
            portal_crossings: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold one tick into the counters
    pub fn record(&mut self, report: &TickReport) {
        if report.vacated.is_some() {
            self.moves += 1;
        }
        if matches!(report.outcome, TickOutcome::AteTarget | TickOutcome::Won) {
            self.targets_eaten += 1;
        }
        if report.teleported {
            self.portal_crossings += 1;
        }
        self.update();
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time)
    }

    /// End-of-run report, one line per figure
    pub fn summary(&self, status: GameStatus, quota: usize) -> String {
        [
            format!("Result: {}", status.label()),
            format!("Targets eaten: {}/{}", self.targets_eaten, quota),
            format!("Moves: {}", self.moves),
            format!("Portal crossings: {}", self.portal_crossings),
            format!("Elapsed: {}", self.format_time()),
            format!("CPU time: {}", format_duration(self.cpu_time)),
        ]
        .join("\n")
    }
}

/// `MM:SS.mmm`
fn format_duration(duration: Duration) -> String {
    let total_millis = duration.as_millis();
    let minutes = total_millis / 60_000;
    let seconds = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
