use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::game::DeathReason;
use crate::store::RunRecord;
use crate::theme::Theme;

/// Draws the start screen with controls and the best recorded runs.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    best: u32,
    top_runs: &[RunRecord],
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 80);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = vec![Line::from(format!("Best: {best}")), Line::from("")];
    if top_runs.is_empty() {
        body.push(Line::from("No runs yet"));
    } else {
        for (rank, run) in top_runs.iter().enumerate() {
            body.push(Line::from(format!("{}. {}", rank + 1, run.score)));
        }
    }
    body.push(Line::from(""));
    body.push(Line::from("[Enter]/[Space] Start"));
    body.push(Line::from("[Q] Quit"));

    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD or drag to steer, [T] theme"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_muted)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[R] Restart"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reference_best: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let is_new_best = score > reference_best;
    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Best: {}", reference_best.max(score))),
        Line::from(death_reason_text(death_reason)),
        Line::from(if is_new_best { "New best!" } else { "" }),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn death_reason_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::Wall) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
