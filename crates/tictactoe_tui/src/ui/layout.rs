//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Everything here is a pure function of the terminal area, so a click is
//! resolved against exactly the rectangles the last frame was drawn in.

use crate::session::Phase;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use strum::{EnumIter, IntoEnumIterator};
use tictactoe_engine::{COLS, Position, ROWS};

/// Width of one board cell in columns.
pub const CELL_WIDTH: u16 = 7;

/// Height of one board cell in rows.
pub const CELL_HEIGHT: u16 = 3;

/// Width of the hint panel.
const HINT_WIDTH: u16 = 24;

/// Gap between buttons.
const BUTTON_GAP: u16 = 2;

/// Clickable buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Button {
    /// Leave the home screen.
    Start,
    /// Play again.
    NewMatch,
    /// Back to the home screen.
    Home,
}

impl Button {
    /// Text drawn inside the button.
    pub fn label(self) -> &'static str {
        match self {
            Button::Start => "[ Start ]",
            Button::NewMatch => "[ New Match ]",
            Button::Home => "[ Home ]",
        }
    }

    /// Whether the button is shown in `phase`.
    pub fn visible_in(self, phase: Phase) -> bool {
        match self {
            Button::Start => phase == Phase::NotStarted,
            Button::NewMatch | Button::Home => matches!(phase, Phase::Over(_)),
        }
    }

    fn width(self) -> u16 {
        self.label().len() as u16 + 4
    }
}

/// Where the 3x3 grid sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    origin_x: u16,
    origin_y: u16,
}

impl BoardGeometry {
    /// Full width of the grid including separators.
    pub const WIDTH: u16 = CELL_WIDTH * COLS as u16 + (COLS as u16 - 1);

    /// Full height of the grid including separators.
    pub const HEIGHT: u16 = CELL_HEIGHT * ROWS as u16 + (ROWS as u16 - 1);

    /// Centers the grid in `area`.
    pub fn centered(area: Rect) -> Self {
        Self {
            origin_x: area.x + area.width.saturating_sub(Self::WIDTH) / 2,
            origin_y: area.y + area.height.saturating_sub(Self::HEIGHT) / 2,
        }
    }

    /// Bounding rectangle of the grid.
    pub fn area(&self) -> Rect {
        Rect::new(self.origin_x, self.origin_y, Self::WIDTH, Self::HEIGHT)
    }

    /// Rectangle of one cell.
    pub fn cell_rect(&self, pos: Position) -> Rect {
        Rect::new(
            self.origin_x + pos.col as u16 * (CELL_WIDTH + 1),
            self.origin_y + pos.row as u16 * (CELL_HEIGHT + 1),
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }

    /// Cell under terminal coordinates, if any. Separators hit nothing.
    pub fn hit(&self, column: u16, row: u16) -> Option<Position> {
        Position::all().find(|pos| contains(self.cell_rect(*pos), column, row))
    }
}

/// Regions of the whole screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title line.
    pub title: Rect,
    /// Score line.
    pub scores: Rect,
    /// Region the board is centered in.
    pub board_area: Rect,
    /// Grid geometry.
    pub board: BoardGeometry,
    /// Hint panel, when hints are on.
    pub hints: Option<Rect>,
    /// Status box.
    pub status: Rect,
    /// Button row.
    pub controls: Rect,
    /// Key help line.
    pub help: Rect,
}

impl ScreenLayout {
    /// Splits `area` into screen regions.
    pub fn new(area: Rect, show_hints: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                      // Title
                Constraint::Length(1),                      // Scores
                Constraint::Min(BoardGeometry::HEIGHT + 2), // Board
                Constraint::Length(3),                      // Status
                Constraint::Length(3),                      // Buttons
                Constraint::Length(1),                      // Help
            ])
            .split(area);

        let (board_area, hints) = if show_hints {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Min(BoardGeometry::WIDTH),
                    Constraint::Length(HINT_WIDTH),
                ])
                .split(chunks[2]);
            (cols[0], Some(cols[1]))
        } else {
            (chunks[2], None)
        };

        Self {
            title: chunks[0],
            scores: chunks[1],
            board_area,
            board: BoardGeometry::centered(board_area),
            hints,
            status: chunks[3],
            controls: chunks[4],
            help: chunks[5],
        }
    }

    /// Visible buttons and their rectangles, centered in the button row.
    pub fn buttons(&self, phase: Phase) -> Vec<(Button, Rect)> {
        let visible: Vec<Button> = Button::iter().filter(|b| b.visible_in(phase)).collect();
        let total: u16 = visible.iter().map(|b| b.width()).sum::<u16>()
            + BUTTON_GAP * visible.len().saturating_sub(1) as u16;

        let mut x = self.controls.x + self.controls.width.saturating_sub(total) / 2;
        visible
            .into_iter()
            .map(|button| {
                let rect = Rect::new(x, self.controls.y, button.width(), self.controls.height);
                x += button.width() + BUTTON_GAP;
                (button, rect)
            })
            .collect()
    }

    /// Button under terminal coordinates, if any.
    pub fn button_at(&self, phase: Phase, column: u16, row: u16) -> Option<Button> {
        self.buttons(phase)
            .into_iter()
            .find(|(_, rect)| contains(*rect, column, row))
            .map(|(button, _)| button)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::{Mark, Outcome};

    #[test]
    fn test_board_dimensions() {
        assert_eq!(BoardGeometry::WIDTH, 23);
        assert_eq!(BoardGeometry::HEIGHT, 11);
    }

    #[test]
    fn test_hit_maps_every_cell_center() {
        let geometry = BoardGeometry::centered(Rect::new(0, 0, 80, 24));
        for pos in Position::all() {
            let cell = geometry.cell_rect(pos);
            let x = cell.x + cell.width / 2;
            let y = cell.y + cell.height / 2;
            assert_eq!(geometry.hit(x, y), Some(pos));
        }
    }

    #[test]
    fn test_separators_and_outside_miss() {
        let geometry = BoardGeometry::centered(Rect::new(0, 0, 80, 24));
        let first = geometry.cell_rect(Position::new(0, 0));
        // Column just right of the first cell is the vertical separator.
        assert_eq!(geometry.hit(first.x + CELL_WIDTH, first.y), None);
        assert_eq!(geometry.hit(0, 0), None);
    }

    #[test]
    fn test_buttons_follow_phase() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 30), false);
        let start: Vec<Button> = layout
            .buttons(Phase::NotStarted)
            .into_iter()
            .map(|(b, _)| b)
            .collect();
        assert_eq!(start, vec![Button::Start]);

        let over = layout.buttons(Phase::Over(Outcome::Draw));
        assert_eq!(over.len(), 2);
        let (button, rect) = over[1];
        assert_eq!(button, Button::Home);
        assert_eq!(
            layout.button_at(Phase::Over(Outcome::Draw), rect.x, rect.y),
            Some(Button::Home)
        );
        let playing = Phase::InProgress {
            to_move: Mark::Player,
        };
        assert_eq!(layout.button_at(playing, rect.x, rect.y), None);
    }

    #[test]
    fn test_hint_panel_only_when_enabled() {
        let area = Rect::new(0, 0, 80, 30);
        assert!(ScreenLayout::new(area, false).hints.is_none());
        assert!(ScreenLayout::new(area, true).hints.is_some());
    }
}
