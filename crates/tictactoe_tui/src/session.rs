//! Match session: board, phase and running score.
//!
//! The session owns every phase transition. The engine only answers
//! questions about the board (`outcome`, `best_move`); the session decides
//! what those answers mean for the match.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tictactoe_engine::{Board, BoardError, Mark, Minimax, Outcome, Position, outcome};
use tracing::{debug, info, instrument, warn};

/// Where the match currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum Phase {
    /// On the home screen.
    #[default]
    #[display("not started")]
    NotStarted,
    /// A match is running.
    #[display("in progress")]
    InProgress {
        /// Side whose move it is.
        to_move: Mark,
    },
    /// The match has ended.
    #[display("over")]
    Over(Outcome),
}

/// What happens next after a move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The computer must reply.
    ComputerToMove,
    /// The human is to move.
    PlayerToMove,
    /// The move ended the match.
    Finished(Outcome),
}

/// Errors from session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The action is not available in the current phase.
    #[display("Cannot {action} while the match is {phase}")]
    WrongPhase {
        /// What was attempted.
        action: &'static str,
        /// Phase at the time.
        phase: Phase,
    },

    /// The human tried to move while the computer is thinking.
    #[display("Waiting for the computer to move")]
    NotYourTurn,

    /// A search result arrived for a match that has since been reset.
    #[display("Discarded search result from match {generation}")]
    StaleResult {
        /// Generation the result was computed for.
        generation: u64,
    },

    /// The board rejected the move.
    #[display("{_0}")]
    Board(#[error(not(source))] BoardError),
}

impl From<BoardError> for SessionError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

/// Win counters carried across matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Matches won by the human.
    pub player: u32,
    /// Matches won by the computer.
    pub computer: u32,
}

/// One human-versus-computer session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
    phase: Phase,
    scores: Scores,
    generation: u64,
}

impl Session {
    /// Creates a session on the home screen with zeroed scores.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the running score.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Identifier of the current match; changes on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Result banner for a finished match.
    pub fn verdict(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Over(Outcome::PlayerWins) => Some("Player wins!"),
            Phase::Over(Outcome::OpponentWins) => Some("Bot wins!"),
            Phase::Over(_) => Some("It's a tie!"),
            _ => None,
        }
    }

    /// Leaves the home screen and starts the first match.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::NotStarted {
            return Err(SessionError::WrongPhase {
                action: "start",
                phase: self.phase,
            });
        }
        self.reset(Phase::InProgress {
            to_move: Mark::Player,
        });
        info!(generation = self.generation, "Match started");
        Ok(())
    }

    /// Starts another match after one has finished. Scores are kept.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn new_match(&mut self) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Over(_)) {
            return Err(SessionError::WrongPhase {
                action: "start a new match",
                phase: self.phase,
            });
        }
        self.reset(Phase::InProgress {
            to_move: Mark::Player,
        });
        info!(generation = self.generation, "New match started");
        Ok(())
    }

    /// Returns to the home screen from any phase. Scores are kept.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn home(&mut self) {
        self.reset(Phase::NotStarted);
        info!("Returned to home screen");
    }

    /// Zeroes both win counters.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
    }

    /// Plays the human's mark at `pos`.
    ///
    /// # Errors
    ///
    /// Fails if no match is running, if the computer is to move, or if the
    /// board rejects the square. The session is unchanged on error.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn play(&mut self, pos: Position) -> Result<Turn, SessionError> {
        match self.phase {
            Phase::InProgress {
                to_move: Mark::Player,
            } => {}
            Phase::InProgress { .. } => return Err(SessionError::NotYourTurn),
            phase => {
                return Err(SessionError::WrongPhase {
                    action: "play",
                    phase,
                });
            }
        }
        self.board.apply_move(pos, Mark::Player)?;
        debug!(%pos, "Player moved");
        Ok(self.settle(Mark::Player))
    }

    /// Copy of the board for an off-thread search, tagged with the match
    /// generation. `None` unless the computer is to move.
    pub fn search_snapshot(&self) -> Option<(u64, Board)> {
        match self.phase {
            Phase::InProgress {
                to_move: Mark::Opponent,
            } => Some((self.generation, self.board.clone())),
            _ => None,
        }
    }

    /// Applies the computer's chosen square for match `generation`.
    ///
    /// `None` means the engine found no empty square; the match is settled
    /// from the board as it stands.
    #[instrument(skip(self), fields(phase = %self.phase, current = self.generation))]
    pub fn apply_computer(
        &mut self,
        generation: u64,
        choice: Option<Position>,
    ) -> Result<Turn, SessionError> {
        if generation != self.generation {
            warn!("Dropping search result for an earlier match");
            return Err(SessionError::StaleResult { generation });
        }
        if self.phase
            != (Phase::InProgress {
                to_move: Mark::Opponent,
            })
        {
            return Err(SessionError::WrongPhase {
                action: "apply the computer's move",
                phase: self.phase,
            });
        }
        if let Some(pos) = choice {
            self.board.apply_move(pos, Mark::Opponent)?;
            debug!(%pos, "Computer moved");
        }
        Ok(self.settle(Mark::Opponent))
    }

    /// Searches and applies the computer's move on the calling thread.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn play_computer(&mut self) -> Result<Turn, SessionError> {
        let Some((generation, mut board)) = self.search_snapshot() else {
            return Err(SessionError::WrongPhase {
                action: "ask the computer to move",
                phase: self.phase,
            });
        };
        let mut searcher = Minimax::new();
        let choice = searcher.best_move(&mut board);
        debug!(nodes = searcher.stats().nodes, "Search finished");
        self.apply_computer(generation, choice)
    }

    /// Moves the match on after `just_moved` played.
    fn settle(&mut self, just_moved: Mark) -> Turn {
        let result = outcome(&self.board);
        if result.is_terminal() {
            self.finish(result);
            return Turn::Finished(result);
        }
        let to_move = just_moved.other();
        self.phase = Phase::InProgress { to_move };
        match to_move {
            Mark::Opponent => Turn::ComputerToMove,
            Mark::Player => Turn::PlayerToMove,
        }
    }

    fn finish(&mut self, result: Outcome) {
        match result.winner() {
            Some(Mark::Player) => self.scores.player += 1,
            Some(Mark::Opponent) => self.scores.computer += 1,
            None => {}
        }
        self.phase = Phase::Over(result);
        info!(
            outcome = %result,
            player = self.scores.player,
            computer = self.scores.computer,
            "Match over"
        );
    }

    fn reset(&mut self, phase: Phase) {
        self.board = Board::new();
        self.phase = phase;
        self.generation += 1;
    }
}
