//! Headless commands: engine self-play and board analysis.

use anyhow::{Context, Result};
use serde::Serialize;
use tictactoe_engine::{
    Board, Mark, Minimax, MoveScore, Outcome, Position, SearchStats, legal_moves, outcome,
};
use tracing::{info, instrument, warn};

/// One move of a self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    /// Side that moved.
    pub mark: Mark,
    /// Square played.
    pub position: Position,
    /// Board in text form after the move.
    pub board: String,
}

/// Result of a self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfPlayReport {
    /// Moves in order, human side first.
    pub moves: Vec<PlayedMove>,
    /// Final outcome.
    pub outcome: Outcome,
    /// Positions visited across all searches.
    pub nodes: u64,
}

/// Analysis of a single board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Board in text form.
    pub board: String,
    /// Outcome as it stands.
    pub outcome: Outcome,
    /// Side to move, inferred from the mark counts.
    pub to_move: Mark,
    /// Whether the mark counts could arise in a real game.
    pub balanced: bool,
    /// True when the board is already won or drawn.
    pub game_over: bool,
    /// Empty squares, row-major; none once the game is over.
    pub legal_moves: Vec<Position>,
    /// Root score of each legal move, computer's point of view.
    pub scores: Vec<MoveScore>,
    /// Move the engine would pick for the side to move.
    pub best_move: Option<Position>,
    /// Search counters.
    pub stats: SearchStats,
}

/// Lets the engine play both sides from the empty board.
#[instrument]
pub fn self_play() -> SelfPlayReport {
    let mut board = Board::new();
    let mut mover = Mark::Player;
    let mut moves = Vec::new();
    let mut searcher = Minimax::new();

    while !outcome(&board).is_terminal() {
        let Some(position) = searcher.best_move_for(&mut board, mover) else {
            break;
        };
        if let Err(e) = board.apply_move(position, mover) {
            warn!(error = %e, "Engine chose an occupied square");
            break;
        }
        moves.push(PlayedMove {
            mark: mover,
            position,
            board: board.to_string(),
        });
        mover = mover.other();
    }

    let report = SelfPlayReport {
        moves,
        outcome: outcome(&board),
        nodes: searcher.stats().nodes,
    };
    info!(outcome = %report.outcome, moves = report.moves.len(), "Self-play finished");
    report
}

/// Scores every legal move on `text`.
#[instrument]
pub fn analyze(text: &str) -> Result<Analysis> {
    let mut board: Board = text
        .parse()
        .with_context(|| format!("Could not read board {text:?}"))?;

    let to_move = if board.count(Mark::Player) > board.count(Mark::Opponent) {
        Mark::Opponent
    } else {
        Mark::Player
    };
    let balanced = board.is_balanced();
    if !balanced {
        warn!(board = %board, "Mark counts cannot occur in a real game");
    }

    let result = outcome(&board);
    let game_over = result.is_terminal();
    let mut searcher = Minimax::new();
    let (legal, scores, best_move) = if game_over {
        info!(outcome = %result, "Board is already decided");
        (Vec::new(), Vec::new(), None)
    } else {
        let scores = searcher.score_moves_for(&mut board, to_move);
        let best_move = searcher.best_move_for(&mut board, to_move);
        (legal_moves(&board), scores, best_move)
    };

    Ok(Analysis {
        board: board.to_string(),
        outcome: result,
        to_move,
        balanced,
        game_over,
        legal_moves: legal,
        scores,
        best_move,
        stats: searcher.stats(),
    })
}

/// Prints a self-play game.
pub fn print_self_play(report: &SelfPlayReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for (turn, played) in report.moves.iter().enumerate() {
        println!("{:>2}. {} -> {}", turn + 1, played.mark, played.position);
    }
    if let Some(last) = report.moves.last() {
        let board: Board = last.board.parse()?;
        println!("\n{}\n", board.pretty());
    }
    println!("Result: {} ({} positions searched)", report.outcome, report.nodes);
    Ok(())
}

/// Prints a board analysis.
pub fn print_analysis(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }
    let board: Board = analysis.board.parse()?;
    println!("{}\n", board.pretty());
    println!("Outcome: {}", analysis.outcome);
    if !analysis.balanced {
        println!("Warning: mark counts cannot occur in a real game");
    }
    if analysis.game_over {
        println!("Game over");
        return Ok(());
    }
    println!("To move: {}", analysis.to_move);
    for score in &analysis.scores {
        println!("  {}  {:+}", score.position, score.score);
    }
    match analysis.best_move {
        Some(pos) => println!("Best move: {pos}"),
        None => println!("Best move: none"),
    }
    println!("Positions searched: {}", analysis.stats.nodes);
    Ok(())
}
