//! Command-line interface for tictactoe.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the log file from the config
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Show the value of each empty square while playing
    #[arg(long)]
    pub hints: bool,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Let the engine play both sides and print the game
    Selfplay {
        /// Print the game as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every move on a board, e.g. "XX./OO./..."
    Analyze {
        /// Board as three `/`-separated rows of X, O and .
        board: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.hints);
    }

    #[test]
    fn test_analyze_arguments() {
        let cli =
            Cli::try_parse_from(["tictactoe", "--hints", "analyze", "XX./OO./...", "--json"])
                .unwrap();
        assert!(cli.hints);
        assert_eq!(
            cli.command,
            Some(Command::Analyze {
                board: "XX./OO./...".to_string(),
                json: true,
            })
        );
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
