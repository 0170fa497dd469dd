//! Auto Snake - a snake that steers itself towards a fixed list of targets
//!
//! This library provides:
//! - The autopilot core: board, snake, navigator and tick loop (game module)
//! - TUI rendering (render module)
//! - Stop-key polling (input module)
//! - Run metrics (metrics module)
//! - Interactive and headless runners (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
