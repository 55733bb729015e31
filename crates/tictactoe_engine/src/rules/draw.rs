//! Draw detection logic for tic-tac-toe.

use super::win::winning_line;
use crate::board::Board;

/// Returns true if the board is full and nobody completed a line.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winning_line(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_board_not_draw() {
        let board: Board = "XO./.../...".parse().unwrap();
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board: Board = "XXX/OOX/OXO".parse().unwrap();
        assert!(!is_draw(&board));
    }
}
