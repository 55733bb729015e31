//! Tic-tac-toe engine: board model and exhaustive minimax search.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid, its one public mutator and its text form
//! - **Rules**: pure terminal tests and legal-move enumeration
//! - **Search**: full-depth minimax that picks the computer's reply
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, Mark, Outcome, Position, best_move, outcome};
//!
//! let mut board = Board::new();
//! board.apply_move(Position::new(1, 1), Mark::Player)?;
//!
//! let reply = best_move(&mut board).expect("board has empty squares");
//! board.apply_move(reply, Mark::Opponent)?;
//! assert_eq!(outcome(&board), Outcome::InProgress);
//! # Ok::<(), tictactoe_engine::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod error;
mod rules;
mod search;
mod types;

// Crate-level exports - Board model
pub use board::Board;
pub use error::BoardError;
pub use types::{COLS, Cell, Mark, Position, ROWS};

// Crate-level exports - Rules
pub use rules::{LINES, Outcome, is_draw, legal_moves, outcome, winning_line};

// Crate-level exports - Search
pub use search::{
    DRAW, LOSS, Minimax, MoveScore, SearchStats, WIN, best_move, evaluate, score_moves,
    terminal_score,
};
