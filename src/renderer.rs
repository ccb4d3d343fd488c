use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::session::Session;
use crate::snake::Position;
use crate::store::RunRecord;
use crate::theme::Theme;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns per board cell; two keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_SNAKE_BODY: &str = "██";
const GLYPH_SNAKE_TAIL: &str = "▓▓";
const GLYPH_APPLE: &str = "●";
const GLYPH_EMPTY: &str = "  ";

/// Read-only view of everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo<'a> {
    pub best: u32,
    /// Best score before the current run, for the "new best" banner.
    pub reference_best: u32,
    pub top_runs: &'a [RunRecord],
    pub theme: &'a Theme,
}

/// Renders the session's current state.
pub fn render_session(frame: &mut Frame<'_>, session: &Session) {
    let top_runs = session.top_runs();
    let info = FrameInfo {
        best: session.records().best,
        reference_best: session.reference_best(),
        top_runs: &top_runs,
        theme: session.theme(),
    };
    render(frame, session.state(), &info);
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, info: &FrameInfo<'_>) {
    let [hud_area, board_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_hud(
        frame,
        hud_area,
        state,
        &HudInfo {
            best: info.best,
            theme: info.theme,
        },
    );

    let play_area = board_rect(board_area, state.grid);
    let block = Block::bordered().border_style(Style::new().fg(info.theme.border_fg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_background(frame, inner, info.theme);
    render_apple(frame, inner, state, info.theme);
    render_snake(frame, inner, state, info.theme);

    match state.status {
        GameStatus::Ready => {
            render_start_menu(frame, play_area, info.best, info.top_runs, info.theme);
        }
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::Dead => render_game_over_menu(
            frame,
            play_area,
            state.score,
            info.reference_best,
            state.death_reason,
        ),
        GameStatus::Running => {}
    }
}

/// Centres a bordered `grid`×`grid` board inside `area`, clipped to fit.
#[must_use]
pub fn board_rect(area: Rect, grid: u16) -> Rect {
    let width = grid.saturating_mul(CELL_WIDTH).saturating_add(2).min(area.width);
    let height = grid.saturating_add(2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_background(frame: &mut Frame<'_>, inner: Rect, theme: &Theme) {
    let style = Style::new().bg(theme.board_bg);
    let buffer = frame.buffer_mut();
    for y in inner.y..inner.bottom() {
        for x in inner.x..inner.right() {
            buffer.set_string(x, y, " ", style);
        }
    }
}

fn render_apple(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.grid, state.apple) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_EMPTY, Style::new().bg(theme.board_bg));
    buffer.set_string(x, y, GLYPH_APPLE, Style::new().fg(theme.apple).bg(theme.board_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let tail = state.snake.tail();
    let single = state.snake.len() == 1;

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(state.dir),
                Style::new()
                    .fg(theme.board_bg)
                    .bg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        if *segment == tail && !single {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "^^",
        Direction::Down => "vv",
        Direction::Left => "<<",
        Direction::Right => ">>",
    }
}

fn logical_to_terminal(inner: Rect, grid: u16, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
