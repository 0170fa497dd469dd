use super::board::{Board, Tile};
use super::direction::Direction;
use super::state::Snake;

/// Would moving the head one step towards `direction` be fatal?
///
/// The step is projected without wrapping. A projection off the board is
/// only safe through a portal. On the board it is fatal when it lands on a
/// wall or on any current segment, the tail included.
pub fn would_collide(snake: &Snake, board: &Board, direction: Direction) -> bool {
    let projected = snake.head().moved_in_direction(direction);

    if !board.contains(projected) {
        return board.portal_crossing(projected).is_none();
    }

    board.tile(projected) == Tile::Wall || snake.occupies(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;
    use crate::game::state::Cell;

    /// 5x5 board, one interior wall cell at (3, 2), snake (3,3) (3,4) heading up
    /// with its tail bent to (2,4)
    fn small_world() -> (Board, Snake) {
        let config = GameConfig {
            width: 5,
            height: 5,
            start_x: 3,
            start_y: 3,
            length: 3,
            targets: vec![Cell::new(4, 3)],
            quota: 1,
            obstacles: vec![Cell::new(3, 2)],
            obstacle_size: 1,
            ..GameConfig::default()
        };
        let board = Board::from_config(&config).unwrap();
        let snake = Snake {
            body: vec![Cell::new(3, 3), Cell::new(3, 4), Cell::new(2, 4)],
            heading: Direction::Up,
        };
        (board, snake)
    }

    #[test]
    fn test_wall_ahead_collides() {
        let (board, snake) = small_world();
        assert!(would_collide(&snake, &board, Direction::Up));
    }

    #[test]
    fn test_own_body_collides() {
        let (board, snake) = small_world();
        assert!(would_collide(&snake, &board, Direction::Down));
    }

    #[test]
    fn test_free_cells_do_not_collide() {
        let (board, snake) = small_world();
        assert!(!would_collide(&snake, &board, Direction::Left));
        assert!(!would_collide(&snake, &board, Direction::Right));
    }

    #[test]
    fn test_tail_counts_as_body() {
        let (board, mut snake) = small_world();
        snake.body = vec![Cell::new(3, 3), Cell::new(3, 4), Cell::new(2, 4), Cell::new(2, 3)];
        assert!(would_collide(&snake, &board, Direction::Left));
    }

    #[test]
    fn test_portal_exit_is_safe() {
        let board = Board::new(10, 10);
        let snake = Snake::new(Cell::new(1, 5), Direction::Left, 3);
        assert!(!would_collide(&snake, &board, Direction::Left));

        let snake = Snake::new(Cell::new(5, 1), Direction::Up, 3);
        assert!(!would_collide(&snake, &board, Direction::Up));
    }

    #[test]
    fn test_is_pure() {
        let (board, snake) = small_world();
        let before = snake.clone();
        for direction in Direction::ALL {
            would_collide(&snake, &board, direction);
        }
        assert_eq!(snake, before);
    }
}
