//! Board error types.

use derive_more::{Display, Error};

/// Errors raised by board operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Coordinates fall outside the 3x3 grid.
    #[display("Position ({row}, {col}) is outside the board")]
    InvalidPosition {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Square ({row}, {col}) is already occupied")]
    IllegalMove {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Board text could not be parsed.
    #[display("Malformed board: {reason}")]
    MalformedBoard {
        /// What was wrong with the input.
        reason: String,
    },
}
