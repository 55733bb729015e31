//! Terminal front end for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Session**: phases, scores and the human/computer turn order
//! - **App**: maps keys, clicks and search results onto the session
//! - **Worker**: runs the computer's search off the UI task
//! - **UI**: stateless ratatui rendering over a shared screen layout
//! - **Commands**: headless self-play and board analysis
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Outcome, Position};
//! use tictactoe_tui::{Phase, Session, Turn};
//!
//! let mut session = Session::new();
//! session.start()?;
//! assert_eq!(session.play(Position::new(1, 1))?, Turn::ComputerToMove);
//! assert_eq!(session.play_computer()?, Turn::PlayerToMove);
//! assert!(matches!(session.phase(), Phase::InProgress { .. }));
//! # Ok::<(), tictactoe_tui::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app;
mod cli;
mod commands;
mod config;
mod input;
mod logging;
mod session;
mod tui;
mod ui;
mod worker;

// Crate-level exports - Session
pub use session::{Phase, Scores, Session, SessionError, Turn};

// Crate-level exports - Configuration
pub use cli::{Cli, Command};
pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
pub use logging::{init_file_tracing, init_stderr_tracing};

// Crate-level exports - Terminal UI
pub use app::{Action, App};
pub use input::{Command as InputCommand, command_for_key, move_cursor};
pub use tui::run_tui;
pub use ui::draw;
pub use ui::layout::{BoardGeometry, Button, CELL_HEIGHT, CELL_WIDTH, ScreenLayout};
pub use worker::{SearchWorker, WorkerEvent};

// Crate-level exports - Headless commands
pub use commands::{
    Analysis, PlayedMove, SelfPlayReport, analyze, print_analysis, print_self_play, self_play,
};
