//! Stateless UI rendering.

pub mod layout;

use crate::app::App;
use crate::session::Phase;
use layout::{BoardGeometry, CELL_HEIGHT, CELL_WIDTH, ScreenLayout};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::{COLS, Cell, DRAW, LOSS, Mark, Position, ROWS, WIN};

/// Renders one frame from the app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = app.layout();
    let phase = app.session().phase();

    // Title
    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    render(frame, title, layout.title);

    draw_scores(frame, app, layout.scores);

    match phase {
        Phase::NotStarted => draw_splash(frame, layout.board_area),
        Phase::InProgress { .. } | Phase::Over(_) => draw_board(frame, app, layout.board),
    }

    if let Some(area) = layout.hints {
        draw_hints(frame, app, area);
    }

    // Status
    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    render(frame, status, layout.status);

    draw_buttons(frame, &layout, phase);

    let help = Paragraph::new(help_text(phase))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    render(frame, help, layout.help);
}

fn draw_scores(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(area);
    let scores = app.session().scores();

    let bot = Paragraph::new(format!(" Bot: {}", scores.computer))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Left);
    let player = Paragraph::new(format!("Player: {} ", scores.player))
        .style(Style::default().fg(Color::Blue))
        .alignment(Alignment::Right);
    render(frame, bot, columns[0]);
    render(frame, player, columns[2]);

    if let Some(stats) = app.last_stats() {
        let searched = Paragraph::new(format!("Searched: {}", stats.nodes))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        render(frame, searched, columns[1]);
    }
}

fn draw_splash(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from("You play X and move first."),
        Line::from("The bot plays O and searches every game to the end."),
        Line::from(""),
        Line::from("Best you can do is a draw."),
    ];
    let splash = Paragraph::new(lines).alignment(Alignment::Center);
    render(frame, splash, area);
}

fn draw_board(frame: &mut Frame, app: &App, geometry: BoardGeometry) {
    let grid = Paragraph::new(grid_lines()).style(Style::default().fg(Color::DarkGray));
    render(frame, grid, geometry.area());

    let show_cursor = app.session().phase()
        == Phase::InProgress {
            to_move: Mark::Player,
        };
    for (pos, cell) in app.session().board().iter() {
        let is_cursor = show_cursor && pos == app.cursor();
        let area = geometry.cell_rect(pos);
        draw_cell(frame, area, pos, cell, is_cursor, app.hint_at(pos));
    }
}

/// Separator lines drawn behind the cells.
fn grid_lines() -> Vec<Line<'static>> {
    let blank = " ".repeat(CELL_WIDTH as usize);
    let bar = "─".repeat(CELL_WIDTH as usize);
    let cell_row = vec![blank; COLS].join("│");
    let separator = vec![bar; COLS].join("┼");

    let mut lines = Vec::new();
    for row in 0..ROWS {
        if row > 0 {
            lines.push(Line::from(separator.clone()));
        }
        for _ in 0..CELL_HEIGHT {
            lines.push(Line::from(cell_row.clone()));
        }
    }
    lines
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    pos: Position,
    cell: Cell,
    is_cursor: bool,
    hint: Option<i32>,
) {
    let (symbol, base_style) = match cell {
        Cell::Occupied(Mark::Player) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Mark::Opponent) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => match hint {
            Some(score) => (hint_label(score).to_string(), hint_style(score)),
            None => (
                pos.index().map(|i| i + 1).unwrap_or_default().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        },
    };

    let style = if is_cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
        Line::from(""),
    ];
    let paragraph = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    render(frame, paragraph, area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .hints()
        .iter()
        .map(|hint| {
            Line::from(vec![
                Span::raw(format!("{}  ", hint.position)),
                Span::styled(hint_label(hint.score), hint_style(hint.score)),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Hints "));
    render(frame, panel, area);
}

/// Hint text from the human's point of view.
fn hint_label(score: i32) -> &'static str {
    match score {
        LOSS => "win",
        DRAW => "draw",
        WIN => "loss",
        _ => "?",
    }
}

fn hint_style(score: i32) -> Style {
    match score {
        LOSS => Style::default().fg(Color::Green),
        DRAW => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Red),
    }
}

fn draw_buttons(frame: &mut Frame, layout: &ScreenLayout, phase: Phase) {
    for (button, area) in layout.buttons(phase) {
        let widget = Paragraph::new(button.label())
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        render(frame, widget, area);
    }
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::NotStarted => "Enter: start  r: reset scores  q: quit",
        Phase::InProgress { .. } => {
            "arrows/1-9: choose  Enter: play  i: hints  h: home  r: reset scores  q: quit"
        }
        Phase::Over(_) => "n: new match  h: home  r: reset scores  q: quit",
    }
}

/// Renders `widget` clipped to the frame.
fn render(frame: &mut Frame, widget: Paragraph<'_>, area: Rect) {
    let area = area.intersection(frame.area());
    if area.width > 0 && area.height > 0 {
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::input::Command;
    use crate::worker::WorkerEvent;
    use ratatui::{Terminal, backend::TestBackend};
    use tictactoe_engine::SearchStats;

    fn screen_text(app: &mut App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                app.resize(frame.area());
                draw(frame, app);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_home_screen_shows_start() {
        let mut app = App::new(false);
        let text = screen_text(&mut app);
        assert!(text.contains("[ Start ]"));
        assert!(text.contains("Bot: 0"));
        assert!(text.contains("Player: 0"));
    }

    #[test]
    fn test_board_screen_numbers_squares() {
        let mut app = App::new(false);
        app.handle_command(Command::Start);
        let text = screen_text(&mut app);
        assert!(text.contains("Your move."));
        assert!(!text.contains("[ Start ]"));
        assert!(text.contains('┼'));
    }

    #[test]
    fn test_search_count_shown_after_bot_move() {
        let mut app = App::new(false);
        app.handle_command(Command::Start);
        assert!(!screen_text(&mut app).contains("Searched:"));

        let generation = match app.handle_command(Command::PlayAt(Position::new(0, 0))) {
            Action::Search { generation, .. } => generation,
            other => panic!("expected a search request, got {other:?}"),
        };
        app.handle_worker_event(WorkerEvent::ComputerMove {
            generation,
            position: Some(Position::new(1, 1)),
            stats: SearchStats { nodes: 1234 },
        });
        assert!(screen_text(&mut app).contains("Searched: 1234"));

        app.handle_command(Command::Home);
        app.handle_command(Command::Start);
        assert!(!screen_text(&mut app).contains("Searched:"));
    }

    #[test]
    fn test_hint_labels() {
        assert_eq!(hint_label(LOSS), "win");
        assert_eq!(hint_label(DRAW), "draw");
        assert_eq!(hint_label(WIN), "loss");
    }

    #[test]
    fn test_grid_matches_geometry() {
        let lines = grid_lines();
        assert_eq!(lines.len(), BoardGeometry::HEIGHT as usize);
        assert_eq!(lines[0].width(), BoardGeometry::WIDTH as usize);
    }
}
