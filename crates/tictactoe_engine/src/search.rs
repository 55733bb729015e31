//! Exhaustive minimax search.
//!
//! The searcher explores the full remaining game tree on a borrowed board,
//! placing and clearing marks in place. Scores are from the computer's
//! point of view: a computer win is `+1`, a human win `-1`, a draw `0`.
//! Depth is not part of the score, so a slow win is worth as much as a fast
//! one, and among equal scores the first move in row-major order is kept.

use crate::board::Board;
use crate::rules::{Outcome, legal_moves, outcome};
use crate::types::{Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a position won by the computer.
pub const WIN: i32 = 1;

/// Score of a drawn position.
pub const DRAW: i32 = 0;

/// Score of a position won by the human.
pub const LOSS: i32 = -1;

/// Score for a terminal outcome, or `None` while the game is running.
pub fn terminal_score(outcome: Outcome) -> Option<i32> {
    match outcome {
        Outcome::PlayerWins => Some(LOSS),
        Outcome::OpponentWins => Some(WIN),
        Outcome::Draw => Some(DRAW),
        Outcome::InProgress => None,
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, root children included.
    pub nodes: u64,
}

/// Root score of one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveScore {
    /// The candidate square.
    pub position: Position,
    /// Minimax value after playing it, from the computer's point of view.
    pub score: i32,
}

/// Minimax searcher.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    stats: SearchStats,
}

impl Minimax {
    /// Creates a searcher with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters accumulated since creation.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Exact value of `board` with the computer maximizing.
    ///
    /// `maximizing` is true when the computer is to move. The board is
    /// restored before returning.
    pub fn evaluate(&mut self, board: &mut Board, maximizing: bool) -> i32 {
        self.stats.nodes += 1;
        if let Some(score) = terminal_score(outcome(board)) {
            return score;
        }

        let mover = if maximizing {
            Mark::Opponent
        } else {
            Mark::Player
        };
        let children = legal_moves(board).into_iter().map(|pos| {
            let mut child = board.place(pos, mover);
            self.evaluate(&mut child, !maximizing)
        });

        let best = if maximizing {
            children.max()
        } else {
            children.min()
        };
        // A non-terminal board always has an empty square.
        best.unwrap_or(DRAW)
    }

    /// Root scores for every legal move of `mover`, row-major.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn score_moves_for(&mut self, board: &mut Board, mover: Mark) -> Vec<MoveScore> {
        let maximizing_next = mover == Mark::Player;
        let scores: Vec<MoveScore> = legal_moves(board)
            .into_iter()
            .map(|position| {
                let mut child = board.place(position, mover);
                let score = self.evaluate(&mut child, maximizing_next);
                MoveScore { position, score }
            })
            .collect();
        debug!(candidates = scores.len(), nodes = self.stats.nodes, "Scored root moves");
        scores
    }

    /// Best move for `mover`, or `None` on a full board.
    ///
    /// The computer keeps the first strictly greater score, the human the
    /// first strictly smaller one.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn best_move_for(&mut self, board: &mut Board, mover: Mark) -> Option<Position> {
        let mut best: Option<MoveScore> = None;
        for candidate in self.score_moves_for(board, mover) {
            let improves = match best {
                None => true,
                Some(current) => match mover {
                    Mark::Opponent => candidate.score > current.score,
                    Mark::Player => candidate.score < current.score,
                },
            };
            if improves {
                best = Some(candidate);
            }
        }

        match best {
            Some(choice) => {
                debug!(
                    position = %choice.position,
                    score = choice.score,
                    nodes = self.stats.nodes,
                    "Chose move"
                );
                Some(choice.position)
            }
            None => {
                debug!("No legal moves");
                None
            }
        }
    }

    /// Best move for the computer.
    pub fn best_move(&mut self, board: &mut Board) -> Option<Position> {
        self.best_move_for(board, Mark::Opponent)
    }
}

/// Exact value of `board`; see [`Minimax::evaluate`].
pub fn evaluate(board: &mut Board, maximizing: bool) -> i32 {
    Minimax::new().evaluate(board, maximizing)
}

/// The computer's optimal reply on `board`, or `None` if the board is full.
///
/// The board is borrowed exclusively for the duration of the search and is
/// unchanged on return.
pub fn best_move(board: &mut Board) -> Option<Position> {
    Minimax::new().best_move(board)
}

/// Root scores the computer compares when choosing a move.
pub fn score_moves(board: &mut Board) -> Vec<MoveScore> {
    Minimax::new().score_moves_for(board, Mark::Opponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(evaluate(&mut board("OOO/XX./X.."), true), WIN);
        assert_eq!(evaluate(&mut board("XXX/OO./..."), false), LOSS);
        assert_eq!(evaluate(&mut board("XOX/OXX/OXO"), true), DRAW);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut searcher = Minimax::new();
        assert_eq!(searcher.evaluate(&mut Board::new(), false), DRAW);
        assert!(searcher.stats().nodes > 100_000);
    }

    #[test]
    fn test_search_restores_board() {
        let mut b = board("X../.O./..X");
        let before = b.clone();
        let _ = best_move(&mut b);
        let _ = score_moves(&mut b);
        assert_eq!(b, before);
    }

    #[test]
    fn test_takes_first_winning_move() {
        let mut b = board("OO./XX./X..");
        assert_eq!(best_move(&mut b), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut b = board("XOX/OXX/OXO");
        assert_eq!(best_move(&mut b), None);
        assert!(score_moves(&mut b).is_empty());
    }

    #[test]
    fn test_ties_keep_first_move() {
        // After a corner opening only the centre holds the draw.
        let mut b = board("X../.../...");
        let scores = score_moves(&mut b);
        assert_eq!(scores[3].position, Position::new(1, 1));
        assert_eq!(scores[3].score, DRAW);
        assert!(
            scores
                .iter()
                .filter(|s| s.position != Position::new(1, 1))
                .all(|s| s.score == LOSS)
        );
        assert_eq!(best_move(&mut b), Some(Position::new(1, 1)));

        // After a centre opening the four corners draw; the first is kept.
        let mut b = board(".../.X./...");
        assert_eq!(best_move(&mut b), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_player_side_minimizes() {
        // The human to move can win at once on the top row.
        let mut b = board("XX./OO./...");
        let mut searcher = Minimax::new();
        assert_eq!(
            searcher.best_move_for(&mut b, Mark::Player),
            Some(Position::new(0, 2))
        );
    }
}
