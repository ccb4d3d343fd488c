use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::GameState;
use crate::theme::Theme;

const SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub best: u32,
    pub theme: &'a Theme,
}

/// Renders the one-line status bar into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) {
    let available = usize::from(area.width);
    let line = hud_line(state, info, available);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().fg(info.theme.hud_muted)),
        area,
    );
}

fn hud_line(state: &GameState, info: &HudInfo<'_>, available_width: usize) -> Line<'static> {
    let mut compact = false;
    let mut fields = hud_fields(state, info.best, compact);
    if fields_width(&fields) > available_width {
        compact = true;
        fields = hud_fields(state, info.best, compact);
    }

    let value_style = Style::default().fg(info.theme.hud_value);
    let best_style = if state.score > 0 && state.score >= info.best {
        Style::default().fg(info.theme.accent)
    } else {
        value_style
    };

    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (idx, (label, value)) in fields.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        if !label.is_empty() {
            spans.push(Span::raw(format!("{label}: ")));
        }
        let style = if label == "Best" || label == "B" {
            best_style
        } else {
            value_style
        };
        spans.push(Span::styled(value, style));
    }

    Line::from(spans)
}

fn hud_fields(state: &GameState, best: u32, compact: bool) -> Vec<(&'static str, String)> {
    let walls = if state.wrap_walls { "Wrap" } else { "Walls" };
    vec![
        (if compact { "S" } else { "Score" }, state.score.to_string()),
        (if compact { "B" } else { "Best" }, best.max(state.score).to_string()),
        (if compact { "L" } else { "Length" }, state.snake.len().to_string()),
        ("", state.difficulty.label().to_owned()),
        ("", walls.to_owned()),
        ("", format!("{:.1}x", state.speed_multiplier())),
    ]
}

fn fields_width(fields: &[(&'static str, String)]) -> usize {
    let separators = fields.len().saturating_sub(1) * SEPARATOR.width();
    let content: usize = fields
        .iter()
        .map(|(label, value)| {
            let label_width = if label.is_empty() { 0 } else { label.width() + 2 };
            label_width + value.width()
        })
        .sum();
    separators + content
}
