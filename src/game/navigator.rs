//! Heuristic steering towards the current target.
//!
//! Each time a target is activated the navigator compares the direct
//! Manhattan distance with the four portal relays and remembers the cheapest
//! route. Every tick it then picks a direction towards the route's waypoint,
//! falling back through the other directions when the preferred one is fatal.

use tracing::{debug, warn};

use super::board::Board;
use super::collision::would_collide;
use super::direction::Direction;
use super::state::{Cell, Snake};

/// Route chosen to reach a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Head straight for the target
    Direct,
    /// Go through the portal on this edge, then on to the target from the
    /// opposite portal
    Portal(Direction),
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Direct => "direct",
            Route::Portal(Direction::Up) => "via top portal",
            Route::Portal(Direction::Down) => "via bottom portal",
            Route::Portal(Direction::Left) => "via left portal",
            Route::Portal(Direction::Right) => "via right portal",
        }
    }
}

/// Which axis to try first when the waypoint is off both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPriority {
    VerticalFirst,
    HorizontalFirst,
}

/// Moves needed to go from `head` to `goal` through the portal on `side`,
/// counting the step that crosses from one portal to the other
pub fn relay_cost(board: &Board, head: Cell, goal: Cell, side: Direction) -> i32 {
    head.manhattan(board.portal(side)) + 1 + board.portal(side.opposite()).manhattan(goal)
}

/// Pick the cheapest route from `head` to `goal`.
///
/// Candidates are compared in the order Direct, Up, Down, Left, Right and
/// the first one with the lowest cost wins, so ties always favour the
/// earlier candidate.
pub fn classify_route(board: &Board, head: Cell, goal: Cell) -> Route {
    let mut best = Route::Direct;
    let mut best_cost = head.manhattan(goal);

    for side in Direction::ALL {
        let cost = relay_cost(board, head, goal, side);
        if cost < best_cost {
            best = Route::Portal(side);
            best_cost = cost;
        }
    }

    best
}

/// Pick a direction that brings the head closer to `waypoint`.
///
/// The primary axis is the vertical one unless the offset is zero there
/// (or `priority` says horizontal first and there is a horizontal offset).
/// Candidates are tried in order: primary towards the waypoint, secondary
/// towards it, secondary away, primary away. The first candidate that does
/// not collide is returned; if all four collide, the last one is returned
/// anyway. With no offset at all the current heading is kept.
pub fn step_toward(
    snake: &Snake,
    board: &Board,
    waypoint: Cell,
    priority: AxisPriority,
) -> Direction {
    let head = snake.head();
    let dx = waypoint.x - head.x;
    let dy = waypoint.y - head.y;

    if dx == 0 && dy == 0 {
        return snake.heading;
    }

    let vertical_first = match priority {
        AxisPriority::VerticalFirst => dy != 0,
        AxisPriority::HorizontalFirst => dx == 0,
    };
    let (primary, secondary) = if vertical_first {
        (Direction::vertical(dy), Direction::horizontal(dx))
    } else {
        (Direction::horizontal(dx), Direction::vertical(dy))
    };

    let candidates = [
        primary,
        secondary,
        secondary.opposite(),
        primary.opposite(),
    ];
    for direction in candidates {
        if !would_collide(snake, board, direction) {
            return direction;
        }
    }

    warn!(?head, ?waypoint, "every direction is blocked");
    primary.opposite()
}

/// Per-target steering state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    route: Route,
    /// Set once the head goes through a portal while chasing the current target
    crossed_portal: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            route: Route::Direct,
            crossed_portal: false,
        }
    }

    /// Start chasing a new target: pick its route and reset the portal latch
    pub fn begin_episode(&mut self, board: &Board, head: Cell, goal: Cell) {
        self.route = classify_route(board, head, goal);
        self.crossed_portal = false;
        debug!(?goal, route = self.route.label(), "new target");
    }

    /// Record that the head went through a portal
    pub fn note_portal_crossing(&mut self) {
        self.crossed_portal = true;
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn crossed_portal(&self) -> bool {
        self.crossed_portal
    }

    /// Cell the snake is currently steering towards
    pub fn waypoint(&self, board: &Board, goal: Cell) -> Cell {
        match self.route {
            Route::Portal(side) if !self.crossed_portal => board.portal(side),
            _ => goal,
        }
    }

    /// Direction to attempt this tick
    pub fn choose(&self, snake: &Snake, board: &Board, goal: Cell) -> Direction {
        if let Route::Portal(side) = self.route {
            if !self.crossed_portal && snake.head() == board.portal(side) {
                // standing in the portal: step out through it
                return side;
            }
        }

        let priority = if self.crossed_portal {
            AxisPriority::HorizontalFirst
        } else {
            AxisPriority::VerticalFirst
        };
        step_toward(snake, board, self.waypoint(board, goal), priority)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
