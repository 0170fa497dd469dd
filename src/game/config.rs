use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::board::{Board, Tile};
use super::direction::Direction;
use super::error::ConfigError;
use super::state::{Cell, Snake};

/// Configuration for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board, border included
    pub width: i32,
    /// Height of the board, border included
    pub height: i32,
    /// Initial head column
    pub start_x: i32,
    /// Initial head row
    pub start_y: i32,
    /// Initial heading; the body trails behind it
    pub start_direction: Direction,
    /// Number of segments, constant for the whole run
    pub length: usize,
    /// Targets in the order they are eaten
    pub targets: Vec<Cell>,
    /// Top-left corners of the square obstacles
    pub obstacles: Vec<Cell>,
    /// Side of every obstacle, in cells
    pub obstacle_size: usize,
    /// Pause between two ticks
    pub tick_delay_micros: u64,
    /// Targets to eat before the run is won
    pub quota: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        let targets = [
            (75, 8),
            (75, 39),
            (78, 2),
            (2, 2),
            (8, 5),
            (78, 39),
            (74, 33),
            (2, 38),
            (72, 35),
            (5, 2),
        ];
        let obstacles = [(3, 3), (74, 3), (3, 34), (74, 34), (38, 21), (38, 15)];

        Self {
            width: 80,
            height: 40,
            start_x: 40,
            start_y: 20,
            start_direction: Direction::Right,
            length: 10,
            targets: targets.iter().map(|&(x, y)| Cell::new(x, y)).collect(),
            obstacles: obstacles.iter().map(|&(x, y)| Cell::new(x, y)).collect(),
            obstacle_size: 5,
            tick_delay_micros: 100_000,
            quota: 10,
        }
    }
}

impl GameConfig {
    /// An empty bordered board of the given size, snake centred and heading right
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            start_x: width / 2,
            // one row below the left/right portals
            start_y: height / 2 + 1,
            length: 3,
            targets: Vec::new(),
            obstacles: Vec::new(),
            quota: 0,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn start(&self) -> Cell {
        Cell::new(self.start_x, self.start_y)
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_micros(self.tick_delay_micros)
    }

    /// The snake as laid out at the start of a run
    pub fn initial_snake(&self) -> Snake {
        Snake::new(self.start(), self.start_direction, self.length)
    }

    /// Check that the configuration describes a playable board.
    ///
    /// Returns the built board so callers don't stamp obstacles twice.
    pub fn validate(&self) -> Result<Board, ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.quota == 0 || self.quota > self.targets.len() {
            return Err(ConfigError::InvalidQuota {
                quota: self.quota,
                targets: self.targets.len(),
            });
        }

        let board = Board::from_config(self)?;

        // Walk the body instead of building it: stops at the first bad segment
        let (dx, dy) = self.start_direction.opposite().delta();
        let mut segment = self.start();
        for _ in 0..self.length {
            if !board.contains(segment) {
                return Err(ConfigError::SnakeOutOfBounds {
                    x: segment.x,
                    y: segment.y,
                });
            }
            if board.tile(segment) == Tile::Wall {
                return Err(ConfigError::SnakeOnWall {
                    x: segment.x,
                    y: segment.y,
                });
            }
            segment = segment.moved_by(dx, dy);
        }

        Ok(board)
    }
}
