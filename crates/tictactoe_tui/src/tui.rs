//! Terminal setup and the event loop.

use crate::app::{Action, App};
use crate::config::Config;
use crate::input::command_for_key;
use crate::logging::init_file_tracing;
use crate::ui;
use crate::worker::{SearchWorker, WorkerEvent};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the terminal UI until the user quits.
#[instrument(skip(config))]
pub async fn run_tui(config: Config) -> Result<()> {
    init_file_tracing(&config)?;
    info!("Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let worker = SearchWorker::new(event_tx, config.thinking_delay());
    let app = App::new(*config.show_hints());

    let res = run_app(&mut terminal, app, &worker, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "TUI exited with error");
    }
    info!("TUI closed");
    res
}

async fn run_app(
    terminal: &mut Tui,
    mut app: App,
    worker: &SearchWorker,
    event_rx: &mut mpsc::UnboundedReceiver<WorkerEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            app.resize(f.area());
            ui::draw(f, &app);
        })?;

        // Results from the search worker
        while let Ok(event) = event_rx.try_recv() {
            let action = app.handle_worker_event(event);
            if dispatch(action, worker) {
                return Ok(());
            }
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match command_for_key(key.code, app.session().phase()) {
                    Some(command) => app.handle_command(command),
                    None => Action::None,
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.handle_click(mouse.column, mouse.row)
            }
            _ => Action::None,
        };
        if dispatch(action, worker) {
            return Ok(());
        }
    }
}

/// Carries out an app action. Returns true when the loop should end.
fn dispatch(action: Action, worker: &SearchWorker) -> bool {
    match action {
        Action::None => false,
        Action::Quit => true,
        Action::Search { generation, board } => {
            // The task detaches; its result arrives on the event channel.
            let _ = worker.request(generation, board);
            false
        }
        Action::Hints { generation, board } => {
            let _ = worker.request_hints(generation, board);
            false
        }
    }
}
