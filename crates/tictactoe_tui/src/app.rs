//! Application state for the terminal front end.
//!
//! `App` turns key presses, clicks and worker results into session
//! transitions. It never searches on the UI task: the computer's move is
//! requested through [`Action::Search`] and hints through [`Action::Hints`].

use crate::input::{Command, move_cursor};
use crate::session::{Phase, Session, SessionError, Turn};
use crate::ui::layout::{Button, ScreenLayout};
use crate::worker::WorkerEvent;
use ratatui::layout::Rect;
use tictactoe_engine::{Board, Mark, MoveScore, Position, SearchStats};
use tracing::{debug, instrument, warn};

/// What the event loop must do after the app handled an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing further.
    None,
    /// Leave the program.
    Quit,
    /// Start a background search for the computer.
    Search {
        /// Match the search belongs to.
        generation: u64,
        /// Board to search.
        board: Board,
    },
    /// Start a background search scoring the human's moves.
    Hints {
        /// Match the hints belong to.
        generation: u64,
        /// Board to score.
        board: Board,
    },
}

/// Application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    cursor: Position,
    status: String,
    show_hints: bool,
    hints: Vec<MoveScore>,
    last_stats: Option<SearchStats>,
    area: Rect,
}

impl App {
    /// Creates the app on the home screen.
    pub fn new(show_hints: bool) -> Self {
        Self {
            session: Session::new(),
            cursor: Position::new(1, 1),
            status: HOME_STATUS.to_string(),
            show_hints,
            hints: Vec::new(),
            last_stats: None,
            area: Rect::default(),
        }
    }

    /// The match session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the hint panel is shown.
    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    /// Root scores for the human's moves, computer's point of view.
    pub fn hints(&self) -> &[MoveScore] {
        &self.hints
    }

    /// Hint score for one square, if hints are on and it is empty.
    pub fn hint_at(&self, pos: Position) -> Option<i32> {
        self.hints
            .iter()
            .find(|hint| hint.position == pos)
            .map(|hint| hint.score)
    }

    /// Counters from the computer's last search.
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    /// Records the terminal area the next frame is drawn in.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
    }

    /// Screen regions for the current area.
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.area, self.show_hints)
    }

    /// Handles a keyboard command.
    #[instrument(skip(self), fields(phase = %self.session.phase()))]
    pub fn handle_command(&mut self, command: Command) -> Action {
        match command {
            Command::Quit => Action::Quit,
            Command::Start => {
                let result = self.session.start();
                self.begin(result)
            }
            Command::NewMatch => {
                let result = self.session.new_match();
                self.begin(result)
            }
            Command::Home => {
                self.session.home();
                self.hints.clear();
                self.status = HOME_STATUS.to_string();
                Action::None
            }
            Command::ResetScores => {
                self.session.reset_scores();
                self.status = "Scores reset.".to_string();
                Action::None
            }
            Command::ToggleHints => {
                self.show_hints = !self.show_hints;
                self.request_hints()
            }
            Command::MoveCursor(key) => {
                self.cursor = move_cursor(self.cursor, key);
                Action::None
            }
            Command::PlayCursor => self.play(self.cursor),
            Command::PlayAt(pos) => {
                self.cursor = pos;
                self.play(pos)
            }
        }
    }

    /// Handles a left click at terminal coordinates.
    #[instrument(skip(self))]
    pub fn handle_click(&mut self, column: u16, row: u16) -> Action {
        let layout = self.layout();
        let phase = self.session.phase();

        if let Some(button) = layout.button_at(phase, column, row) {
            let command = match button {
                Button::Start => Command::Start,
                Button::NewMatch => Command::NewMatch,
                Button::Home => Command::Home,
            };
            return self.handle_command(command);
        }

        match (phase, layout.board.hit(column, row)) {
            (Phase::InProgress { .. }, Some(pos)) => self.handle_command(Command::PlayAt(pos)),
            _ => Action::None,
        }
    }

    /// Applies a result from the search worker.
    #[instrument(skip(self))]
    pub fn handle_worker_event(&mut self, event: WorkerEvent) -> Action {
        let (generation, position, stats) = match event {
            WorkerEvent::ComputerMove {
                generation,
                position,
                stats,
            } => (generation, position, stats),
            WorkerEvent::Hints {
                generation,
                board,
                scores,
            } => {
                self.accept_hints(generation, &board, scores);
                return Action::None;
            }
        };

        match self.session.apply_computer(generation, position) {
            Ok(turn) => {
                self.last_stats = Some(stats);
                self.after_turn(turn)
            }
            Err(SessionError::StaleResult { .. }) => Action::None,
            Err(e) => {
                warn!(error = %e, "Could not apply computer move");
                self.status = e.to_string();
                Action::None
            }
        }
    }

    fn begin(&mut self, result: Result<(), SessionError>) -> Action {
        match result {
            Ok(()) => {
                self.cursor = Position::new(1, 1);
                self.last_stats = None;
                self.after_turn(Turn::PlayerToMove)
            }
            Err(e) => {
                self.status = e.to_string();
                Action::None
            }
        }
    }

    fn play(&mut self, pos: Position) -> Action {
        match self.session.play(pos) {
            Ok(turn) => self.after_turn(turn),
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.status = e.to_string();
                Action::None
            }
        }
    }

    fn after_turn(&mut self, turn: Turn) -> Action {
        match turn {
            Turn::ComputerToMove => {
                self.hints.clear();
                self.status = "Bot is thinking...".to_string();
                match self.session.search_snapshot() {
                    Some((generation, board)) => Action::Search { generation, board },
                    None => Action::None,
                }
            }
            Turn::PlayerToMove => {
                self.status = "Your move.".to_string();
                self.request_hints()
            }
            Turn::Finished(_) => {
                self.hints.clear();
                self.status = self.session.verdict().unwrap_or_default().to_string();
                Action::None
            }
        }
    }

    fn players_turn(&self) -> bool {
        self.session.phase()
            == Phase::InProgress {
                to_move: Mark::Player,
            }
    }

    /// Clears the current hints and asks the worker for fresh ones if needed.
    fn request_hints(&mut self) -> Action {
        self.hints.clear();
        if !self.show_hints || !self.players_turn() {
            return Action::None;
        }
        Action::Hints {
            generation: self.session.generation(),
            board: self.session.board().clone(),
        }
    }

    fn accept_hints(&mut self, generation: u64, board: &Board, scores: Vec<MoveScore>) {
        let current = generation == self.session.generation()
            && board == self.session.board()
            && self.players_turn();
        if !self.show_hints || !current {
            debug!(generation, "Dropping stale hints");
            return;
        }
        self.hints = scores;
    }
}

const HOME_STATUS: &str = "Press Enter to start.";
