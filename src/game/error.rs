use thiserror::Error;

use super::board::Tile;

/// A game configuration that cannot produce a playable board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 4x4, got {width}x{height}")]
    BoardTooSmall { width: i32, height: i32 },

    #[error("board sides are limited to {max}, got {width}x{height}")]
    BoardTooLarge { width: i32, height: i32, max: i32 },

    #[error("snake length must be at least 1")]
    EmptySnake,

    #[error("obstacle size must be at least 1")]
    ZeroObstacleSize,

    #[error("quota must be between 1 and the number of targets ({targets}), got {quota}")]
    InvalidQuota { quota: usize, targets: usize },

    #[error("obstacle anchored at ({x}, {y}) does not fit on the board")]
    ObstacleOutOfBounds { x: i32, y: i32 },

    #[error("obstacle anchored at ({x}, {y}) covers a portal")]
    ObstacleCoversPortal { x: i32, y: i32 },

    #[error("target ({x}, {y}) is outside the board")]
    TargetOutOfBounds { x: i32, y: i32 },

    #[error("target ({x}, {y}) lies on a {tile:?} cell")]
    TargetNotOpen { x: i32, y: i32, tile: Tile },

    #[error("snake segment ({x}, {y}) is outside the board")]
    SnakeOutOfBounds { x: i32, y: i32 },

    #[error("snake segment ({x}, {y}) lies on a wall")]
    SnakeOnWall { x: i32, y: i32 },
}
