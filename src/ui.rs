//! Layout and drawing: playfield, next preview, scoreboard, pause and
//! game-over overlays. The renderer only queries the session; it never
//! writes game state back.

use crate::grid;
use crate::session::GameSession;
use crate::tetromino::{PREVIEW_WIDTH, TetrominoKind};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::collections::{HashMap, HashSet};

/// Each grid cell is drawn two terminal cells wide.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 22;

fn board_outer_size() -> (u16, u16) {
    (
        grid::WIDTH as u16 * CELL_WIDTH + 2,
        grid::HEIGHT as u16 + 2,
    )
}

/// Centered board + sidebar rects for the given frame area.
fn layout(area: Rect) -> (Rect, Rect) {
    let (bw, bh) = board_outer_size();
    let total_w = bw + SIDEBAR_WIDTH;
    let x = area.x + area.width.saturating_sub(total_w) / 2;
    let y = area.y + area.height.saturating_sub(bh) / 2;
    let board = Rect {
        x,
        y,
        width: bw.min(area.width),
        height: bh.min(area.height),
    };
    let sidebar = Rect {
        x: (board.x + bw).min(area.x + area.width),
        y,
        width: SIDEBAR_WIDTH.min(area.width.saturating_sub(bw)),
        height: bh.min(area.height),
    };
    (board, sidebar)
}

/// Draw the whole screen. `flash` is a transient status line from the event
/// sink (e.g. a line-clear message).
pub fn draw(frame: &mut Frame, session: &GameSession, theme: &Theme, flash: Option<&str>) {
    let (board_rect, sidebar_rect) = layout(frame.area());
    draw_board(frame, session, theme, board_rect);
    draw_sidebar(frame, session, theme, sidebar_rect, flash);
    if session.is_game_over() {
        draw_overlay(frame, theme, board_rect, "GAME OVER", "r restart · q quit");
    } else if !session.is_running() {
        draw_overlay(frame, theme, board_rect, "PAUSED", "space to play");
    }
}

fn draw_board(frame: &mut Frame, session: &GameSession, theme: &Theme, rect: Rect) {
    let (active_kind, active_cells) = session.active_piece();
    let active: HashSet<usize> = active_cells.into_iter().collect();
    let taken: HashMap<usize, TetrominoKind> = session.grid().taken_cells().collect();
    let active_style = Style::default().fg(theme.piece_color(active_kind.color_index()));
    let empty_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let mut lines = Vec::with_capacity(grid::HEIGHT);
    for row in 0..grid::HEIGHT {
        let mut spans = Vec::with_capacity(grid::WIDTH);
        for col in 0..grid::WIDTH {
            let index = row * grid::WIDTH + col;
            let span = if active.contains(&index) {
                Span::styled("██", active_style)
            } else if let Some(kind) = taken.get(&index) {
                Span::styled(
                    "██",
                    Style::default().fg(theme.piece_color(kind.color_index())),
                )
            } else {
                Span::styled(" ·", empty_style)
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line))
        .title(Span::styled(" gridfall ", Style::default().fg(theme.title)));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_sidebar(
    frame: &mut Frame,
    session: &GameSession,
    theme: &Theme,
    rect: Rect,
    flash: Option<&str>,
) {
    if rect.width == 0 {
        return;
    }
    let label = Style::default().fg(theme.title);
    let value = Style::default().fg(theme.main_fg);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" score ", label),
            Span::styled(session.score().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" lines ", label),
            Span::styled(session.lines_cleared().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" level ", label),
            Span::styled(session.level().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" speed ", label),
            Span::styled(format!("{} ms", session.fall_interval_ms()), value),
        ]),
        Line::default(),
        Line::from(Span::styled(" next", label)),
    ];
    lines.extend(preview_lines(session, theme));
    lines.push(Line::default());
    if let Some(msg) = flash {
        lines.push(Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        " ←→ move  ↑ rotate",
        Style::default().fg(theme.div_line),
    )));
    lines.push(Line::from(Span::styled(
        " ↓ drop  space pause",
        Style::default().fg(theme.div_line),
    )));

    frame.render_widget(Paragraph::new(lines), rect);
}

/// Next-piece preview on the 4-wide mini-grid.
fn preview_lines(session: &GameSession, theme: &Theme) -> Vec<Line<'static>> {
    let kind = session.next_piece();
    let cells: HashSet<i32> = kind.preview_offsets().into_iter().collect();
    let style = Style::default().fg(theme.piece_color(kind.color_index()));
    let mut lines = Vec::new();
    for row in 0..PREVIEW_WIDTH {
        let mut spans = vec![Span::raw(" ")];
        for col in 0..PREVIEW_WIDTH {
            if cells.contains(&(row * PREVIEW_WIDTH + col)) {
                spans.push(Span::styled("██", style));
            } else {
                spans.push(Span::raw("  "));
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn draw_overlay(frame: &mut Frame, theme: &Theme, board: Rect, title: &str, hint: &str) {
    let w = (title.len().max(hint.len()) as u16 + 4).min(board.width);
    let rect = Rect {
        x: board.x + board.width.saturating_sub(w) / 2,
        y: board.y + board.height.saturating_sub(4) / 2,
        width: w,
        height: 4.min(board.height),
    };
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(theme.main_fg),
        )),
    ];
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line)),
        ),
        rect,
    );
}
