//! Static playfield: border walls, square obstacles and the four edge portals.
//!
//! Cells are addressed with 1-based [`Cell`] coordinates. The border ring is
//! wall except for the midpoint of each edge, which is a portal: a head that
//! steps off the board through a portal reappears on the opposite edge.

use super::config::GameConfig;
use super::direction::Direction;
use super::error::ConfigError;
use super::state::Cell;

/// Largest accepted board side
pub const MAX_SIDE: i32 = 1000;

/// Content of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Open,
    Wall,
    Portal,
    /// The target currently waiting to be eaten
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a bordered board without obstacles
    pub fn new(width: i32, height: i32) -> Self {
        let mut tiles = Vec::with_capacity(width.max(0) as usize * height.max(0) as usize);
        for y in 1..=height {
            for x in 1..=width {
                let on_border = x == 1 || y == 1 || x == width || y == height;
                tiles.push(if on_border { Tile::Wall } else { Tile::Open });
            }
        }

        let mut board = Self {
            width,
            height,
            tiles,
        };
        for side in Direction::ALL {
            let cell = board.portal(side);
            board.set(cell, Tile::Portal);
        }
        board
    }

    /// Build the board described by `config`: border, portals, then obstacles.
    /// Every target is checked against the finished board.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        if config.width < 4 || config.height < 4 {
            return Err(ConfigError::BoardTooSmall {
                width: config.width,
                height: config.height,
            });
        }
        if config.width > MAX_SIDE || config.height > MAX_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width: config.width,
                height: config.height,
                max: MAX_SIDE,
            });
        }
        if config.obstacle_size == 0 {
            return Err(ConfigError::ZeroObstacleSize);
        }

        let mut board = Self::new(config.width, config.height);
        let size = i32::try_from(config.obstacle_size).unwrap_or(i32::MAX);

        for anchor in &config.obstacles {
            let fits = board.contains(*anchor)
                && size <= MAX_SIDE
                && board.contains(anchor.moved_by(size - 1, size - 1));
            if !fits {
                return Err(ConfigError::ObstacleOutOfBounds {
                    x: anchor.x,
                    y: anchor.y,
                });
            }
            for dy in 0..size {
                for dx in 0..size {
                    let cell = anchor.moved_by(dx, dy);
                    if board.tile(cell) == Tile::Portal {
                        return Err(ConfigError::ObstacleCoversPortal {
                            x: anchor.x,
                            y: anchor.y,
                        });
                    }
                    board.set(cell, Tile::Wall);
                }
            }
        }

        for target in &config.targets {
            if !board.contains(*target) {
                return Err(ConfigError::TargetOutOfBounds {
                    x: target.x,
                    y: target.y,
                });
            }
            let tile = board.tile(*target);
            if tile != Tile::Open {
                return Err(ConfigError::TargetNotOpen {
                    x: target.x,
                    y: target.y,
                    tile,
                });
            }
        }

        Ok(board)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `cell` lies in `[1, width] x [1, height]`
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.x <= self.width && cell.y >= 1 && cell.y <= self.height
    }

    /// Classify a cell. Anything outside the board reads as [`Tile::Wall`].
    pub fn tile(&self, cell: Cell) -> Tile {
        match self.index(cell) {
            Some(i) => self.tiles[i],
            None => Tile::Wall,
        }
    }

    /// Portal cell in the middle of the given edge
    pub fn portal(&self, side: Direction) -> Cell {
        match side {
            Direction::Up => Cell::new(self.width / 2, 1),
            Direction::Down => Cell::new(self.width / 2, self.height),
            Direction::Left => Cell::new(1, self.height / 2),
            Direction::Right => Cell::new(self.width, self.height / 2),
        }
    }

    /// Map a cell just outside the board to the cell just inside the opposite
    /// edge. Only the row or column of a portal wraps; any other off-board cell
    /// (and any on-board cell) yields `None`.
    pub fn portal_crossing(&self, cell: Cell) -> Option<Cell> {
        let up = self.portal(Direction::Up);
        let left = self.portal(Direction::Left);

        if cell.y == 0 && cell.x == up.x {
            Some(Cell::new(cell.x, self.height))
        } else if cell.y == self.height + 1 && cell.x == up.x {
            Some(Cell::new(cell.x, 1))
        } else if cell.x == 0 && cell.y == left.y {
            Some(Cell::new(self.width, cell.y))
        } else if cell.x == self.width + 1 && cell.y == left.y {
            Some(Cell::new(1, cell.y))
        } else {
            None
        }
    }

    /// Mark `cell` as the active target
    pub fn place_target(&mut self, cell: Cell) {
        self.set(cell, Tile::Target);
    }

    /// Turn an eaten target back into an open cell
    pub fn clear_target(&mut self, cell: Cell) {
        if self.tile(cell) == Tile::Target {
            self.set(cell, Tile::Open);
        }
    }

    fn set(&mut self, cell: Cell, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(((cell.y - 1) * self.width + (cell.x - 1)) as usize)
    }
}
