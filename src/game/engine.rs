use std::time::Duration;
use tracing::{debug, info};

use super::{
    board::Tile,
    config::GameConfig,
    direction::Direction,
    error::ConfigError,
    navigator::{Navigator, Route},
    state::{Cell, CollisionType, GameState, GameStatus},
};

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved and nothing else happened
    Moved,
    /// The snake ate a target and the next one is active
    AteTarget,
    /// The snake ate the last target of the quota
    Won,
    Collided(CollisionType),
    /// A stop was requested before this tick
    Stopped,
    /// The run had already ended; nothing changed
    Halted,
}

/// Result of a tick, listing the cells that changed
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Direction the navigator picked, if a move was attempted
    pub direction: Option<Direction>,
    pub head: Cell,
    /// Cell freed by the tail
    pub vacated: Option<Cell>,
    /// Target eaten this tick
    pub consumed: Option<Cell>,
    /// Target placed this tick
    pub placed: Option<Cell>,
    pub teleported: bool,
    pub status: GameStatus,
}

impl TickReport {
    fn idle(outcome: TickOutcome, state: &GameState) -> Self {
        Self {
            outcome,
            direction: None,
            head: state.snake.head(),
            vacated: None,
            consumed: None,
            placed: None,
            teleported: false,
            status: state.status,
        }
    }
}

/// Runs the autopilot one tick at a time
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    navigator: Navigator,
    stop_pending: bool,
}

impl GameEngine {
    /// Create an engine for a validated configuration, with the first target active
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let board = config.validate()?;
        let state = GameState::new(board, config.initial_snake(), config.quota);

        let mut engine = Self {
            config,
            state,
            navigator: Navigator::new(),
            stop_pending: false,
        };
        engine.activate_target(0);
        Ok(engine)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn route(&self) -> Route {
        self.navigator.route()
    }

    pub fn tick_delay(&self) -> Duration {
        self.config.tick_delay()
    }

    /// Ask the run to stop. Takes effect at the next tick.
    pub fn request_stop(&mut self) {
        self.stop_pending = true;
    }

    /// Advance the game by one tick
    pub fn tick(&mut self) -> TickReport {
        if self.state.status.is_terminal() {
            return TickReport::idle(TickOutcome::Halted, &self.state);
        }
        if self.stop_pending {
            self.state.status = GameStatus::Stopped;
            info!(moves = self.state.moves, "stop requested");
            return TickReport::idle(TickOutcome::Stopped, &self.state);
        }

        // Running always has a target
        let Some(goal) = self.state.target else {
            self.state.status = GameStatus::Won;
            return TickReport::idle(TickOutcome::Won, &self.state);
        };

        let direction = self
            .navigator
            .choose(&self.state.snake, &self.state.board, goal);

        let Some(step) = self.state.snake.advance(direction, &self.state.board) else {
            return self.collide(CollisionType::OutOfBounds, direction);
        };
        self.state.moves += 1;

        if step.teleported {
            self.navigator.note_portal_crossing();
        }

        let mut report = TickReport {
            outcome: TickOutcome::Moved,
            direction: Some(direction),
            head: step.head,
            vacated: Some(step.vacated),
            consumed: None,
            placed: None,
            teleported: step.teleported,
            status: self.state.status,
        };

        if step.head == goal {
            self.state.board.clear_target(goal);
            self.state.targets_eaten += 1;
            report.consumed = Some(goal);
            info!(
                eaten = self.state.targets_eaten,
                quota = self.state.quota,
                moves = self.state.moves,
                "target eaten"
            );

            if self.state.targets_eaten >= self.state.quota {
                self.state.target = None;
                self.state.status = GameStatus::Won;
                report.outcome = TickOutcome::Won;
                info!(moves = self.state.moves, "quota reached");
            } else {
                report.placed = Some(self.activate_target(self.state.targets_eaten));
                report.outcome = TickOutcome::AteTarget;
            }
        } else if let Some(kind) = self.collision_at(step.head) {
            self.state.status = GameStatus::Collided(kind);
            report.outcome = TickOutcome::Collided(kind);
            info!(?kind, ?direction, head = ?step.head, "collision");
        }

        report.status = self.state.status;
        debug!(?direction, head = ?step.head, outcome = ?report.outcome, "tick");
        report
    }

    /// Place target `index` on the board and pick a route to it
    fn activate_target(&mut self, index: usize) -> Cell {
        let goal = self.config.targets[index];
        self.state.board.place_target(goal);
        self.state.target = Some(goal);
        self.navigator
            .begin_episode(&self.state.board, self.state.snake.head(), goal);
        info!(?goal, route = self.navigator.route().label(), "target placed");
        goal
    }

    /// Fatal content of the cell the head just moved into
    fn collision_at(&self, head: Cell) -> Option<CollisionType> {
        if self.state.board.tile(head) == Tile::Wall {
            Some(CollisionType::Wall)
        } else if self.state.snake.body_segments().contains(&head) {
            Some(CollisionType::SelfCollision)
        } else {
            None
        }
    }

    fn collide(&mut self, kind: CollisionType, direction: Direction) -> TickReport {
        self.state.status = GameStatus::Collided(kind);
        info!(?kind, ?direction, head = ?self.state.snake.head(), "collision");
        let mut report = TickReport::idle(TickOutcome::Collided(kind), &self.state);
        report.direction = Some(direction);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 40x20 board, snake of 4 at (10, 10) heading right, no obstacles
    fn open_config(targets: Vec<Cell>) -> GameConfig {
        GameConfig {
            width: 40,
            height: 20,
            start_x: 10,
            start_y: 10,
            length: 4,
            quota: targets.len(),
            targets,
            obstacles: Vec::new(),
            tick_delay_micros: 0,
            ..GameConfig::default()
        }
    }

    fn run_until_done(engine: &mut GameEngine, max_ticks: usize) -> Vec<TickReport> {
        let mut reports = Vec::new();
        for _ in 0..max_ticks {
            let report = engine.tick();
            let done = report.status.is_terminal();
            reports.push(report);
            if done {
                break;
            }
        }
        reports
    }

    #[test]
    fn test_new_engine_activates_first_target() {
        let engine = GameEngine::new(open_config(vec![Cell::new(15, 10)])).unwrap();
        let state = engine.state();

        assert!(state.is_running());
        assert_eq!(state.target, Some(Cell::new(15, 10)));
        assert_eq!(state.board.tile(Cell::new(15, 10)), Tile::Target);
        assert_eq!(state.moves, 0);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameEngine::new(open_config(vec![Cell::new(0, 10)]));
        assert_eq!(
            result.err(),
            Some(ConfigError::TargetOutOfBounds { x: 0, y: 10 })
        );
    }

    #[test]
    fn test_target_straight_ahead() {
        let mut engine =
            GameEngine::new(open_config(vec![Cell::new(15, 10), Cell::new(15, 14)])).unwrap();

        for i in 1..=5 {
            let report = engine.tick();
            assert_eq!(report.direction, Some(Direction::Right));
            assert_eq!(report.head, Cell::new(10 + i, 10));
            if i < 5 {
                assert_eq!(report.outcome, TickOutcome::Moved);
            } else {
                assert_eq!(report.outcome, TickOutcome::AteTarget);
                assert_eq!(report.consumed, Some(Cell::new(15, 10)));
                assert_eq!(report.placed, Some(Cell::new(15, 14)));
            }
        }

        let state = engine.state();
        assert_eq!(state.targets_eaten, 1);
        assert_eq!(state.target, Some(Cell::new(15, 14)));
        assert_eq!(state.board.tile(Cell::new(15, 10)), Tile::Open);
        assert_eq!(state.board.tile(Cell::new(15, 14)), Tile::Target);
    }

    #[test]
    fn test_tick_report_lists_vacated_tail() {
        let mut engine = GameEngine::new(open_config(vec![Cell::new(15, 10)])).unwrap();
        let tail = engine.state().snake.tail();

        let report = engine.tick();
        assert_eq!(report.vacated, Some(tail));
        assert_eq!(engine.state().snake.len(), 4);
    }

    #[test]
    fn test_blocked_ahead_takes_first_fallback() {
        // Obstacle right above the head, target beyond it
        let config = GameConfig {
            width: 10,
            height: 10,
            start_x: 5,
            start_y: 5,
            start_direction: Direction::Up,
            length: 3,
            targets: vec![Cell::new(5, 2)],
            quota: 1,
            obstacles: vec![Cell::new(5, 4)],
            obstacle_size: 1,
            tick_delay_micros: 0,
        };
        let mut engine = GameEngine::new(config).unwrap();

        let report = engine.tick();
        assert_eq!(report.direction, Some(Direction::Left));
        assert_eq!(report.head, Cell::new(4, 5));
        assert_eq!(report.outcome, TickOutcome::Moved);
    }

    #[test]
    fn test_wins_after_quota() {
        let targets = vec![Cell::new(15, 10), Cell::new(15, 14), Cell::new(20, 14)];
        let mut engine = GameEngine::new(open_config(targets)).unwrap();

        // 5 + 4 + 5 Manhattan steps
        let reports = run_until_done(&mut engine, 100);
        let last = reports.last().unwrap();

        assert_eq!(last.outcome, TickOutcome::Won);
        assert_eq!(engine.state().status, GameStatus::Won);
        assert_eq!(reports.len(), 14);
        assert_eq!(engine.state().moves, 14);
        assert_eq!(engine.state().targets_eaten, 3);
        assert_eq!(engine.state().target, None);
    }

    #[test]
    fn test_boxed_in_collides() {
        // Walls right, up and left of the head, body below it
        let config = GameConfig {
            width: 10,
            height: 10,
            start_x: 5,
            start_y: 5,
            start_direction: Direction::Up,
            length: 3,
            targets: vec![Cell::new(8, 5)],
            quota: 1,
            obstacles: vec![Cell::new(6, 5), Cell::new(5, 4), Cell::new(4, 5)],
            obstacle_size: 1,
            tick_delay_micros: 0,
        };
        let mut engine = GameEngine::new(config).unwrap();

        let reports = run_until_done(&mut engine, 10);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].outcome,
            TickOutcome::Collided(CollisionType::Wall)
        );
        assert_eq!(
            engine.state().status,
            GameStatus::Collided(CollisionType::Wall)
        );
        assert_eq!(engine.state().targets_eaten, 0);
    }

    #[test]
    fn test_dead_end_corridor_collides() {
        // Corridor along row 5 closed at x = 15, target beyond the closing wall
        let mut obstacles: Vec<Cell> = (10..=15)
            .flat_map(|x| [Cell::new(x, 4), Cell::new(x, 6)])
            .collect();
        obstacles.push(Cell::new(15, 5));
        let config = GameConfig {
            width: 30,
            height: 20,
            start_x: 12,
            start_y: 5,
            start_direction: Direction::Right,
            length: 3,
            targets: vec![Cell::new(18, 5)],
            quota: 1,
            obstacles,
            obstacle_size: 1,
            tick_delay_micros: 0,
        };
        let mut engine = GameEngine::new(config).unwrap();
        assert_eq!(engine.route(), Route::Direct);

        let reports = run_until_done(&mut engine, 50);
        let last = reports.last().unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(last.direction, Some(Direction::Left));
        assert!(matches!(last.outcome, TickOutcome::Collided(_)));
        assert!(reports.iter().all(|r| r.outcome != TickOutcome::Won));
        assert_eq!(engine.state().targets_eaten, 0);
    }

    #[test]
    fn test_stop_takes_effect_next_tick() {
        let mut engine = GameEngine::new(open_config(vec![Cell::new(30, 10)])).unwrap();

        engine.tick();
        engine.request_stop();
        let report = engine.tick();

        assert_eq!(report.outcome, TickOutcome::Stopped);
        assert_eq!(report.direction, None);
        assert_eq!(engine.state().status, GameStatus::Stopped);
        assert_eq!(engine.state().moves, 1);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::new(open_config(vec![Cell::new(11, 10)])).unwrap();
        engine.tick();
        assert_eq!(engine.state().status, GameStatus::Won);
        let moves_before = engine.state().moves;

        let report = engine.tick();

        assert_eq!(report.outcome, TickOutcome::Halted);
        assert_eq!(engine.state().moves, moves_before);
    }

    #[test]
    fn test_route_through_portal() {
        // Target just inside the right edge next to the right portal, snake
        // near the left portal: going through the left portal is cheaper
        let config = GameConfig {
            width: 40,
            height: 20,
            start_x: 4,
            start_y: 10,
            start_direction: Direction::Right,
            length: 3,
            targets: vec![Cell::new(38, 10)],
            quota: 1,
            obstacles: Vec::new(),
            obstacle_size: 1,
            tick_delay_micros: 0,
        };
        let mut engine = GameEngine::new(config).unwrap();
        assert_eq!(engine.route(), Route::Portal(Direction::Left));

        let reports = run_until_done(&mut engine, 200);
        assert!(reports.iter().any(|r| r.teleported));
        assert_eq!(engine.state().status, GameStatus::Won);
    }

    #[test]
    fn test_segments_stay_on_board() {
        let mut engine = GameEngine::new(GameConfig {
            tick_delay_micros: 0,
            ..GameConfig::default()
        })
        .unwrap();

        for _ in 0..3000 {
            let report = engine.tick();
            let state = engine.state();
            for segment in &state.snake.body {
                assert!(state.board.contains(*segment), "{segment:?} off board");
            }
            assert_eq!(state.snake.len(), 10);
            if report.status.is_terminal() {
                break;
            }
        }
    }
}
