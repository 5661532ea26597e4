//! Stateless UI rendering for tic-tac-toe.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;
use tictally_engine::{Board, Mode, Player, Position, Square};

const X_COLOR: Color = Color::Rgb(0x42, 0x69, 0xf5);
const O_COLOR: Color = Color::Rgb(0xf4, 0x43, 0x36);
const HIGHLIGHT: Color = Color::Rgb(0xff, 0xff, 0xaa);

/// Draws the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(3),  // Mode selector
            Constraint::Length(3),  // Status
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Controls
            Constraint::Length(4),  // Score
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_modes(frame, chunks[1], app.session().mode());

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    draw_board(frame, chunks[3], app);

    let help = Paragraph::new(
        "Arrows+Enter or 1-9: play | M: Multiplayer | C: vs Computer | N: New Game | R: Reset All | Q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[4]);

    draw_score(frame, chunks[5], app);
}

fn draw_modes(frame: &mut Frame, area: Rect, active: Mode) {
    let mut spans = Vec::new();
    for (i, mode) in Mode::iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
    }

    let selector = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Mode"));
    frame.render_widget(selector, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board_area = center_rect(area, 40, 11);
    let highlight: Vec<Position> = app
        .session()
        .winning_line()
        .map(|line| line.to_vec())
        .unwrap_or_default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        let cells = [
            Position::ALL[row * 3],
            Position::ALL[row * 3 + 1],
            Position::ALL[row * 3 + 2],
        ];
        draw_row(frame, rows[row * 2], app, &cells, &highlight);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, positions: &[Position; 3], highlight: &[Position]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
        ])
        .split(area);

    let board = app.session().board();
    for (i, &pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], board, pos, pos == app.cursor(), highlight.contains(&pos));
        if i < 2 {
            draw_separator_vertical(frame, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, pos: Position, cursor: bool, winning: bool) {
    let (symbol, base_style) = match board.get(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(X_COLOR).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(O_COLOR).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else if winning {
        base_style.bg(HIGHLIGHT)
    } else {
        base_style
    };

    // Pad vertically so the mark sits in the middle of its three rows.
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}  ", symbol), style)),
        Line::from(""),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"), Line::from("│"), Line::from("│")])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(sep, area);
}

fn draw_score(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.session().score();
    let bold = Modifier::BOLD;
    let header = Line::from(vec![
        Span::styled(format!("{:^12}", "X"), Style::default().fg(X_COLOR).add_modifier(bold)),
        Span::styled(format!("{:^12}", "Ties"), Style::default().add_modifier(bold)),
        Span::styled(format!("{:^12}", "O"), Style::default().fg(O_COLOR).add_modifier(bold)),
    ]);
    let values = Line::from(vec![
        Span::raw(format!("{:^12}", score.x_wins())),
        Span::raw(format!("{:^12}", score.ties())),
        Span::raw(format!("{:^12}", score.o_wins())),
    ]);

    let paragraph = Paragraph::new(vec![header, values])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
