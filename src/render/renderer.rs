use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::game::{Cell, GameState, GameStatus, Route, Tile};
use crate::metrics::RunMetrics;

/// What a single board cell looks like on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Head,
    Body,
    Wall,
    Target,
    Blank,
}

impl Glyph {
    /// Glyph for `cell`, snake segments drawn over the board
    pub fn at(state: &GameState, cell: Cell) -> Glyph {
        if cell == state.snake.head() {
            return Glyph::Head;
        }
        if state.snake.body_segments().contains(&cell) {
            return Glyph::Body;
        }
        match state.board.tile(cell) {
            Tile::Wall => Glyph::Wall,
            Tile::Target => Glyph::Target,
            Tile::Open | Tile::Portal => Glyph::Blank,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Head => "O",
            Glyph::Body => "X",
            Glyph::Wall => "#",
            Glyph::Target => "6",
            Glyph::Blank => " ",
        }
    }

    fn style(&self) -> Style {
        match self {
            Glyph::Head => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Glyph::Body => Style::default().fg(Color::Green),
            Glyph::Wall => Style::default().fg(Color::Gray),
            Glyph::Target => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Glyph::Blank => Style::default(),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &RunMetrics, route: Route) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                            // Header
                Constraint::Length(state.board.height() as u16), // Board
                Constraint::Length(1),                            // Footer
                Constraint::Min(0),
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, route);
        frame.render_widget(stats, chunks[0]);

        let board_area = Rect {
            width: chunks[1].width.min(state.board.width() as u16),
            ..chunks[1]
        };
        frame.render_widget(self.render_board(state), board_area);

        let footer = if state.status.is_terminal() {
            self.render_game_over(state.status)
        } else {
            self.render_controls()
        };
        frame.render_widget(footer, chunks[2]);
    }

    fn render_board(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = (1..=state.board.height())
            .map(|y| {
                let spans: Vec<Span> = (1..=state.board.width())
                    .map(|x| {
                        let glyph = Glyph::at(state, Cell::new(x, y));
                        Span::styled(glyph.symbol(), glyph.style())
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
    }

    fn render_stats(&self, state: &GameState, metrics: &RunMetrics, route: Route) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Targets: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", state.targets_eaten, state.quota),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Moves: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.moves.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Route: ", Style::default().fg(Color::Yellow)),
            Span::styled(route.label(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Left)
    }

    fn render_game_over(&self, status: GameStatus) -> Paragraph<'_> {
        let color = match status {
            GameStatus::Won => Color::Green,
            _ => Color::Red,
        };
        let text = vec![Line::from(vec![
            Span::styled(
                status.label().to_uppercase(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  press any key to exit", Style::default().fg(Color::Gray)),
        ])];

        Paragraph::new(text)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("A", Style::default().fg(Color::Red)),
            Span::raw(", "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to stop the autopilot"),
        ])];

        Paragraph::new(text).alignment(Alignment::Left)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
