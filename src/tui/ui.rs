//! Stateless UI rendering for the remote game.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

use super::view::TuiPresenter;
use crate::games::tictactoe::{Cell, Role, Symbol};
use crate::machine::MachineState;
use crate::session::GameSession;

/// Renders the board, both player panels and the help line.
pub fn draw(
    frame: &mut Frame,
    view: &TuiPresenter,
    session: &GameSession,
    state: &MachineState,
    cursor: Cell,
) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Players
            Constraint::Length(1), // Error
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Strictly Remote - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], view, cursor);
    draw_players(frame, chunks[2], view, session, state);

    if let Some(error) = view.error() {
        let error = Paragraph::new(error)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[3]);
    }

    let help = match state {
        MachineState::Won { .. } | MachineState::Tied => "r: start over   q: quit",
        MachineState::Idle => "f: retry connection   q: quit",
        _ => "arrows/enter or 1-9: move   c: computer moves   f: refresh   q: quit",
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_players(
    frame: &mut Frame,
    area: Rect,
    view: &TuiPresenter,
    session: &GameSession,
    state: &MachineState,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let finished = matches!(state, MachineState::Won { .. } | MachineState::Tied);
    for (col, role) in [Role::Human, Role::Remote].into_iter().enumerate() {
        // Only the active player's panel is lit while the game runs.
        let active = finished || view.turn() == role;
        let message = match role {
            Role::Human => view.human_message(),
            Role::Remote => view.remote_message(),
        };
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if active { message } else { "" };
        let title = format!("{} ({})", role, session.symbol_of(role).glyph());
        let panel = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(panel, cols[col]);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, view: &TuiPresenter, cursor: Cell) {
    let board_area = center_rect(area, 40, 11);
    let now = Instant::now();

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

    for row in 0..3u8 {
        let cells = [0u8, 1, 2].map(|col| Cell::ALL[usize::from(row * 3 + col)]);
        draw_row(frame, rows[usize::from(row) * 2], view, cursor, &cells, now);
        if row < 2 {
            draw_separator(frame, rows[usize::from(row) * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    view: &TuiPresenter,
    cursor: Cell,
    cells: &[Cell; 3],
    now: Instant,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], view, cursor, cells[0], now);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], view, cursor, cells[1], now);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], view, cursor, cells[2], now);
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    view: &TuiPresenter,
    cursor: Cell,
    cell: Cell,
    now: Instant,
) {
    let (symbol, base_style) = match view.mark(cell) {
        None => ("   ", Style::default().fg(Color::DarkGray)),
        Some(Symbol::Ex) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Symbol::Oh) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if view.is_highlighted(cell, now) {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if cell == cursor && view.is_input_enabled() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─────────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
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
