//! tictactoe - play against an exhaustive minimax opponent.

use anyhow::Result;
use clap::Parser;
use tictactoe_tui::{
    Cli, Command, Config, analyze, init_stderr_tracing, print_analysis, print_self_play,
    run_tui, self_play,
};
use tracing::instrument;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_tui(config).await,
        Command::Selfplay { json } => {
            init_stderr_tracing(&config);
            print_self_play(&self_play(), json)
        }
        Command::Analyze { board, json } => {
            init_stderr_tracing(&config);
            print_analysis(&analyze(&board)?, json)
        }
    }
}

/// Reads the config file and applies command-line overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(log_file) = &cli.log_file {
        config = config.with_log_file(log_file.clone());
    }
    if cli.hints {
        config = config.with_show_hints(true);
    }
    Ok(config)
}
