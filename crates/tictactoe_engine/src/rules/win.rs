//! Win detection logic for tic-tac-toe.

use crate::board::Board;
use crate::types::{Cell, Mark, Position};

const fn at(row: usize, col: usize) -> Position {
    Position { row, col }
}

/// Every winning line, in scan order: rows, columns, main diagonal,
/// anti-diagonal.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [at(0, 0), at(0, 1), at(0, 2)],
    [at(1, 0), at(1, 1), at(1, 2)],
    [at(2, 0), at(2, 1), at(2, 2)],
    // Columns
    [at(0, 0), at(1, 0), at(2, 0)],
    [at(0, 1), at(1, 1), at(2, 1)],
    [at(0, 2), at(1, 2), at(2, 2)],
    // Diagonals
    [at(0, 0), at(1, 1), at(2, 2)],
    [at(0, 2), at(1, 1), at(2, 0)],
];

/// Returns the first complete line and the mark that owns it.
///
/// A line only matches when all three cells hold the same mark; three
/// empty cells never match.
pub fn winning_line(board: &Board) -> Option<(Mark, [Position; 3])> {
    let rows = board.rows();
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.map(|p| rows[p.row][p.col]);
        match a {
            Cell::Occupied(mark) if a == b && b == c => Some((mark, line)),
            _ => None,
        }
    })
}
