//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]: terminal detection and move
//! enumeration. None of them mutate the board.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{LINES, winning_line};

use crate::board::Board;
use crate::types::{Cell, Mark, Position};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// State of a board as far as the rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Outcome {
    /// Nobody has won and empty squares remain.
    #[display("In progress")]
    InProgress,
    /// The human completed a line.
    #[display("Player wins")]
    PlayerWins,
    /// The computer completed a line.
    #[display("Opponent wins")]
    OpponentWins,
    /// Board full with no line.
    #[display("Draw")]
    Draw,
}

impl Outcome {
    /// Outcome for a line completed by `mark`.
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::Player => Outcome::PlayerWins,
            Mark::Opponent => Outcome::OpponentWins,
        }
    }

    /// Returns true once the game is over.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWins => Some(Mark::Player),
            Outcome::OpponentWins => Some(Mark::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// The same outcome seen with the marks swapped.
    pub fn swapped(self) -> Self {
        match self {
            Outcome::PlayerWins => Outcome::OpponentWins,
            Outcome::OpponentWins => Outcome::PlayerWins,
            other => other,
        }
    }
}

/// Computes the outcome of `board`.
///
/// Lines are checked rows first, then columns, then the two diagonals; the
/// first complete line decides the winner. With no complete line a full
/// board is a draw.
pub fn outcome(board: &Board) -> Outcome {
    if let Some((mark, _)) = winning_line(board) {
        Outcome::won_by(mark)
    } else if is_draw(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Every empty square, row-major.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    board
        .iter()
        .filter(|(_, cell)| *cell == Cell::Empty)
        .map(|(pos, _)| pos)
        .collect()
}
