//! Background searches for the computer's move and the human's hints.
//!
//! Searches are CPU-bound, so they run on the blocking pool and report back
//! over a channel. Each request carries the match generation it was made for;
//! results whose generation no longer matches are dropped by the receiver.

use std::time::Duration;
use tictactoe_engine::{Board, Mark, Minimax, MoveScore, Position, SearchStats};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, instrument};

/// Events sent from the worker to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// The computer has picked a square.
    ComputerMove {
        /// Match the search was run for.
        generation: u64,
        /// Chosen square, `None` on a full board.
        position: Option<Position>,
        /// Search counters.
        stats: SearchStats,
    },
    /// Root scores of the human's candidate moves.
    Hints {
        /// Match the search was run for.
        generation: u64,
        /// Board the scores belong to.
        board: Board,
        /// One score per empty square, computer's point of view.
        scores: Vec<MoveScore>,
    },
}

/// Runs minimax searches off the UI task.
#[derive(Debug, Clone)]
pub struct SearchWorker {
    tx: mpsc::UnboundedSender<WorkerEvent>,
    delay: Duration,
}

impl SearchWorker {
    /// Creates a worker that reports on `tx`.
    ///
    /// Computer moves are held back until at least `delay` has passed since
    /// the request, so fast searches do not look instantaneous. Hints are
    /// sent as soon as they are ready.
    pub fn new(tx: mpsc::UnboundedSender<WorkerEvent>, delay: Duration) -> Self {
        Self { tx, delay }
    }

    /// Searches the computer's reply on `board` for match `generation`.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn request(&self, generation: u64, board: Board) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            let started = Instant::now();
            let search = tokio::task::spawn_blocking(move || {
                let mut board = board;
                let mut searcher = Minimax::new();
                let position = searcher.best_move(&mut board);
                (position, searcher.stats())
            })
            .await;

            let (position, stats) = match search {
                Ok(result) => result,
                Err(e) => {
                    error!(error = %e, "Search task failed");
                    return;
                }
            };

            tokio::time::sleep_until(started + delay).await;
            debug!(generation, nodes = stats.nodes, "Search complete");
            send(
                &tx,
                WorkerEvent::ComputerMove {
                    generation,
                    position,
                    stats,
                },
            );
        })
    }

    /// Scores every move the human could make on `board`.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn request_hints(&self, generation: u64, board: Board) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let search = tokio::task::spawn_blocking(move || {
                let mut scratch = board.clone();
                let scores = Minimax::new().score_moves_for(&mut scratch, Mark::Player);
                (board, scores)
            })
            .await;

            match search {
                Ok((board, scores)) => {
                    debug!(generation, candidates = scores.len(), "Hints ready");
                    send(
                        &tx,
                        WorkerEvent::Hints {
                            generation,
                            board,
                            scores,
                        },
                    );
                }
                Err(e) => error!(error = %e, "Hint task failed"),
            }
        })
    }
}

fn send(tx: &mpsc::UnboundedSender<WorkerEvent>, event: WorkerEvent) {
    if tx.send(event).is_err() {
        debug!("UI closed before search result arrived");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_worker_reports_best_move() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = SearchWorker::new(tx, Duration::ZERO);
        let board: Board = "OO./XX./X..".parse().unwrap();

        worker.request(7, board).await.unwrap();

        match rx.recv().await.unwrap() {
            WorkerEvent::ComputerMove {
                generation,
                position,
                stats,
            } => {
                assert_eq!(generation, 7);
                assert_eq!(position, Some(Position::new(0, 2)));
                assert!(stats.nodes > 0);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_full_board_reports_no_move() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = SearchWorker::new(tx, Duration::ZERO);
        let board: Board = "XOX/OXX/OXO".parse().unwrap();

        worker.request(1, board).await.unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            WorkerEvent::ComputerMove { position: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_hints_scored_for_human() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // Hints ignore the thinking delay.
        let worker = SearchWorker::new(tx, Duration::from_secs(60));
        let board: Board = "XX./OO./...".parse().unwrap();

        worker.request_hints(3, board.clone()).await.unwrap();

        match rx.recv().await.unwrap() {
            WorkerEvent::Hints {
                generation,
                board: scored,
                scores,
            } => {
                assert_eq!(generation, 3);
                assert_eq!(scored, board);
                assert_eq!(scores.len(), 5);
                // Completing the top row wins for the human.
                assert_eq!(scores[0].position, Position::new(0, 2));
                assert_eq!(scores[0].score, tictactoe_engine::LOSS);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
