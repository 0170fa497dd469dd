use anyhow::{Context, Result};
use auto_snake::game::GameConfig;
use auto_snake::modes::{AutopilotMode, HeadlessMode};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "auto_snake")]
#[command(version, about = "A snake that steers itself towards its targets")]
struct Cli {
    /// How to run the game
    #[arg(long, default_value = "autopilot")]
    mode: Mode,

    /// JSON file with the board layout; built-in layout when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width (overrides the layout)
    #[arg(long)]
    width: Option<i32>,

    /// Board height (overrides the layout)
    #[arg(long)]
    height: Option<i32>,

    /// Milliseconds between two moves (overrides the layout)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Targets to eat to win (overrides the layout)
    #[arg(long)]
    quota: Option<usize>,

    /// Stop a headless run after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write logs to this file (the interactive mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Watch the snake play in the terminal
    Autopilot,
    /// Play without a terminal UI and print the report
    Headless,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.mode == Mode::Headless)?;

    let config = build_config(&cli)?;

    match cli.mode {
        Mode::Autopilot => {
            let mut autopilot = AutopilotMode::new(config)?;
            autopilot.run().await?;
        }
        Mode::Headless => {
            let mut headless = HeadlessMode::new(config, cli.max_ticks)?;
            headless.run()?;
            println!("{}", headless.report());
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_delay_micros = tick_ms * 1000;
    }
    if let Some(quota) = cli.quota {
        config.quota = quota;
    }

    Ok(config)
}

fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The interactive mode owns the terminal
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }

    Ok(())
}
