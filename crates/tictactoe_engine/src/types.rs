//! Core domain types for tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Number of rows on the board.
pub const ROWS: usize = 3;

/// Number of columns on the board.
pub const COLS: usize = 3;

/// A mark placed on the board.
///
/// The human always plays [`Mark::Player`] and moves first; the computer
/// plays [`Mark::Opponent`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Mark {
    /// The human's mark (X).
    #[display("X")]
    Player,
    /// The computer's mark (O).
    #[display("O")]
    Opponent,
}

impl Mark {
    /// Returns the other side's mark.
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    /// Character used in the board's text form.
    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Character used in the board's text form (`.` for empty).
    pub fn symbol(self) -> char {
        self.mark().map_or('.', Mark::symbol)
    }
}

/// Board coordinates, zero-based.
///
/// Constructing a position never fails. Board operations reject positions
/// outside the grid with [`BoardError::InvalidPosition`](crate::BoardError).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
    derive_new::new,
)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Position {
    /// Returns true if the position lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Row-major index (0-8) for in-bounds positions.
    pub fn index(self) -> Option<usize> {
        self.in_bounds().then_some(self.row * COLS + self.col)
    }

    /// Creates a position from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ROWS * COLS).then(|| Self::new(index / COLS, index % COLS))
    }

    /// Every position on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS * COLS).map(|i| Self::new(i / COLS, i % COLS))
    }
}
