use serde::{Deserialize, Serialize};

use super::board::Board;
use super::direction::Direction;

/// A cell on the board. Coordinates are 1-based: `(1, 1)` is the top-left
/// corner and `(width, height)` the bottom-right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction, without any wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance to another cell
    pub fn manhattan(&self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Result of moving the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// New head position (already wrapped if a portal was crossed)
    pub head: Cell,
    /// Cell the tail just left
    pub vacated: Cell,
    /// Whether the head went through a portal
    pub teleported: bool,
}

/// The snake. Its length never changes during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction of the last move
    pub heading: Direction,
}

impl Snake {
    /// Create a new snake with the body trailing behind `head`, opposite to `heading`
    pub fn new(head: Cell, heading: Direction, length: usize) -> Self {
        let mut body = Vec::with_capacity(length);
        body.push(head);

        let (dx, dy) = heading.opposite().delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(dx, dy));
        }

        Self { body, heading }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check whether any segment, head included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Shift the snake one cell towards `direction`.
    ///
    /// Every segment takes its predecessor's place and the head moves by one
    /// unit. A head that leaves the board is wrapped to the far edge when it
    /// goes through one of the four portals; anywhere else the move is refused
    /// and `None` is returned with the snake left untouched.
    ///
    /// No collision check happens here, see [`super::collision::would_collide`].
    pub fn advance(&mut self, direction: Direction, board: &Board) -> Option<Advance> {
        let projected = self.head().moved_in_direction(direction);
        let (head, teleported) = if board.contains(projected) {
            (projected, false)
        } else {
            (board.portal_crossing(projected)?, true)
        };

        let vacated = self.tail();
        self.body.pop();
        self.body.insert(0, head);
        self.heading = direction;

        Some(Advance {
            head,
            vacated,
            teleported,
        })
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head entered a wall or obstacle
    Wall,
    /// Head entered one of its own segments
    SelfCollision,
    /// Head left the board away from a portal
    OutOfBounds,
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Collided(CollisionType),
    Stopped,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Won => "won",
            GameStatus::Collided(CollisionType::Wall) => "hit a wall",
            GameStatus::Collided(CollisionType::SelfCollision) => "bit itself",
            GameStatus::Collided(CollisionType::OutOfBounds) => "left the board",
            GameStatus::Stopped => "stopped",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    /// Target currently pursued, `None` once the quota is reached
    pub target: Option<Cell>,
    pub targets_eaten: usize,
    pub quota: usize,
    pub moves: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(board: Board, snake: Snake, quota: usize) -> Self {
        Self {
            board,
            snake,
            target: None,
            targets_eaten: 0,
            quota,
            moves: 0,
            status: GameStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Cell::new(2, 3).manhattan(Cell::new(5, 1)), 5);
        assert_eq!(Cell::new(4, 4).manhattan(Cell::new(4, 4)), 0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.body[1], Cell::new(4, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));

        let snake = Snake::new(Cell::new(5, 5), Direction::Up, 3);
        assert_eq!(snake.body[1], Cell::new(5, 6));
    }

    #[test]
    fn test_advance_shifts_segments() {
        let board = Board::new(10, 10);
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 4);
        let before = snake.body.clone();

        let step = snake.advance(Direction::Down, &board).unwrap();

        assert_eq!(snake.len(), 4);
        assert_eq!(step.head, Cell::new(5, 6));
        assert_eq!(step.vacated, before[3]);
        assert!(!step.teleported);
        for i in 1..snake.len() {
            assert_eq!(snake.body[i], before[i - 1]);
        }
        assert_eq!(snake.heading, Direction::Down);
    }

    #[test]
    fn test_advance_wraps_through_portals() {
        // 10x10: portals at (5,1), (5,10), (1,5), (10,5)
        let board = Board::new(10, 10);

        let mut snake = Snake::new(Cell::new(1, 5), Direction::Left, 3);
        let step = snake.advance(Direction::Left, &board).unwrap();
        assert_eq!(step.head, Cell::new(10, 5));
        assert!(step.teleported);

        let mut snake = Snake::new(Cell::new(10, 5), Direction::Right, 3);
        assert_eq!(snake.advance(Direction::Right, &board).unwrap().head, Cell::new(1, 5));

        let mut snake = Snake::new(Cell::new(5, 1), Direction::Up, 3);
        assert_eq!(snake.advance(Direction::Up, &board).unwrap().head, Cell::new(5, 10));

        let mut snake = Snake::new(Cell::new(5, 10), Direction::Down, 3);
        assert_eq!(snake.advance(Direction::Down, &board).unwrap().head, Cell::new(5, 1));
    }

    #[test]
    fn test_advance_refuses_exit_away_from_portal() {
        let board = Board::new(10, 10);
        let mut snake = Snake::new(Cell::new(1, 3), Direction::Left, 3);
        let before = snake.clone();

        assert!(snake.advance(Direction::Left, &board).is_none());
        assert_eq!(snake, before);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!GameStatus::Running.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Stopped.is_terminal());
        assert!(GameStatus::Collided(CollisionType::Wall).is_terminal());
    }
}
