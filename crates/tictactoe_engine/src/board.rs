//! The 3x3 board and its single public mutator.

use crate::error::BoardError;
use crate::types::{COLS, Cell, Mark, Position, ROWS};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::{debug, instrument};

/// 3x3 tic-tac-toe board, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at `pos`.
    pub fn cell(&self, pos: Position) -> Result<Cell, BoardError> {
        self.cells
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .ok_or(BoardError::InvalidPosition {
                row: pos.row,
                col: pos.col,
            })
    }

    /// Returns true if `pos` holds a mark.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosition`] if `pos` is off the board.
    pub fn is_occupied(&self, pos: Position) -> Result<bool, BoardError> {
        Ok(self.cell(pos)? != Cell::Empty)
    }

    /// Writes `mark` into the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosition`] if `pos` is off the board and
    /// [`BoardError::IllegalMove`] if the cell is already occupied.
    #[instrument(skip(self), fields(board = %self))]
    pub fn apply_move(&mut self, pos: Position, mark: Mark) -> Result<(), BoardError> {
        if self.is_occupied(pos)? {
            debug!("Rejected move onto occupied square");
            return Err(BoardError::IllegalMove {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[pos.row][pos.col] = Cell::Occupied(mark);
        Ok(())
    }

    /// Resets the cell at `pos` to empty.
    ///
    /// Only the search's backtracking step calls this, through [`PlacedMove`].
    pub(crate) fn clear_move(&mut self, pos: Position) {
        debug_assert!(pos.in_bounds(), "clear_move off the board: {pos}");
        if let Some(cell) = self.cells.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
            *cell = Cell::Empty;
        }
    }

    /// Places `mark` on an empty in-bounds cell and returns a guard that
    /// clears it again when dropped.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) -> PlacedMove<'_> {
        debug_assert_eq!(
            self.cell(pos),
            Ok(Cell::Empty),
            "search placed a mark on a non-empty cell"
        );
        self.cells[pos.row][pos.col] = Cell::Occupied(mark);
        PlacedMove {
            board: self,
            position: pos,
        }
    }

    /// Returns the grid as rows.
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Iterates over every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::all().map(|pos| (pos, self.cells[pos.row][pos.col]))
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.iter()
            .filter(|(_, cell)| *cell == Cell::Occupied(mark))
            .count()
    }

    /// Returns true if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.iter().all(|(_, cell)| cell != Cell::Empty)
    }

    /// Returns true if the mark counts are consistent with the player
    /// moving first and turns alternating.
    pub fn is_balanced(&self) -> bool {
        let players = self.count(Mark::Player);
        let opponents = self.count(Mark::Opponent);
        players == opponents || players == opponents + 1
    }

    /// Returns a copy with every mark swapped for the other side's.
    pub fn swapped(&self) -> Self {
        let mut cells = self.cells;
        for cell in cells.iter_mut().flatten() {
            if let Cell::Occupied(mark) = *cell {
                *cell = Cell::Occupied(mark.other());
            }
        }
        Self { cells }
    }

    /// Formats the board as a grid, numbering empty squares 1-9.
    pub fn pretty(&self) -> String {
        let mut result = String::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell.mark() {
                    Some(mark) => result.push(mark.symbol()),
                    None => result.push_str(&(row * COLS + col + 1).to_string()),
                }
                if col < COLS - 1 {
                    result.push('|');
                }
            }
            if row < ROWS - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in cells {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses `XX./OO./...`: three `/`-separated rows of `X`, `O` or `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != ROWS {
            return Err(BoardError::MalformedBoard {
                reason: format!("expected {ROWS} rows, found {}", rows.len()),
            });
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.trim().chars().collect();
            if chars.len() != COLS {
                return Err(BoardError::MalformedBoard {
                    reason: format!("row {row} has {} cells, expected {COLS}", chars.len()),
                });
            }
            for (col, c) in chars.into_iter().enumerate() {
                board.cells[row][col] = match c {
                    'X' | 'x' => Cell::Occupied(Mark::Player),
                    'O' | 'o' => Cell::Occupied(Mark::Opponent),
                    '.' | '_' | '-' => Cell::Empty,
                    other => {
                        return Err(BoardError::MalformedBoard {
                            reason: format!("unexpected character {other:?} at ({row}, {col})"),
                        });
                    }
                };
            }
        }
        Ok(board)
    }
}

/// A mark placed during search.
///
/// Dereferences to the board it was placed on and clears the cell when
/// dropped, so the board is restored on every return path.
#[derive(Debug)]
pub(crate) struct PlacedMove<'a> {
    board: &'a mut Board,
    position: Position,
}

impl Deref for PlacedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedMove<'_> {
    fn drop(&mut self) {
        self.board.clear_move(self.position);
    }
}
