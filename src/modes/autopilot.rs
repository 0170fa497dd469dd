use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::sleep;
use tracing::info;

use crate::game::{Clock, GameConfig, GameEngine, GameStatus, InputSource, ThreadClock};
use crate::input::KeyboardInput;
use crate::metrics::RunMetrics;
use crate::render::Renderer;

/// Watch the autopilot play in the terminal
pub struct AutopilotMode {
    engine: GameEngine,
    metrics: RunMetrics,
    renderer: Renderer,
    /// Only read for CPU time; pacing goes through tokio
    clock: ThreadClock,
}

impl AutopilotMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Invalid game configuration")?;

        Ok(Self {
            engine,
            metrics: RunMetrics::new(),
            renderer: Renderer::new(),
            clock: ThreadClock::new(),
        })
    }

    /// Play until the run ends, then print the report
    pub async fn run(&mut self) -> Result<GameStatus> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        result?;

        self.metrics.cpu_time = self.clock.elapsed_cpu_time();
        let status = self.engine.state().status;
        println!("{}", self.metrics.summary(status, self.engine.state().quota));
        Ok(status)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut input = KeyboardInput::new();
        let delay = self.engine.tick_delay();
        self.draw(terminal)?;

        loop {
            let report = self.engine.tick();
            self.metrics.record(&report);
            self.draw(terminal)?;

            if report.status.is_terminal() {
                break;
            }

            tokio::select! {
                _ = sleep(delay) => {}

                // Ctrl+C outside raw mode
                _ = tokio::signal::ctrl_c() => {
                    self.engine.request_stop();
                }
            }

            if input.poll_stop_requested() {
                self.engine.request_stop();
            }
        }

        let status = self.engine.state().status;
        info!(status = status.label(), moves = self.metrics.moves, "run finished");

        // Leave the final board on screen until a key is pressed
        if status != GameStatus::Stopped {
            tokio::select! {
                _ = input.next_key_press() => {}
                _ = tokio::signal::ctrl_c() => {}
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let state = self.engine.state();
        let route = self.engine.route();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, state, &self.metrics, route);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
