//! Core autopilot logic
//!
//! This module contains the board, the snake, the navigator and the tick loop
//! without any terminal I/O. It can be driven by the interactive mode, the
//! headless runner or tests alike.

pub mod board;
pub mod collision;
pub mod config;
pub mod direction;
pub mod driver;
pub mod engine;
pub mod error;
pub mod navigator;
pub mod state;

// Re-export commonly used types
pub use board::{Board, Tile};
pub use collision::would_collide;
pub use config::GameConfig;
pub use direction::Direction;
pub use driver::{Clock, InputSource, NoInput, ThreadClock, TickLimit};
pub use engine::{GameEngine, TickOutcome, TickReport};
pub use error::ConfigError;
pub use navigator::{AxisPriority, Navigator, Route, classify_route, step_toward};
pub use state::{Advance, Cell, CollisionType, GameState, GameStatus, Snake};
