//! Popup overlays.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::helpers::centered_rect;
use crate::constants::{HELP_POPUP_HEIGHT, HELP_POPUP_WIDTH};
use crate::ui::state::AppState;

const HELP_KEYS: &[(&str, &str)] = &[
    ("f", "Feed (hunger -20, happy)"),
    ("p", "Play (energy +15, excited)"),
    ("s", "Scold (sad for a moment)"),
    ("Space", "Pause / resume time"),
    ("T", "Cycle theme"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let popup = centered_rect(HELP_POPUP_WIDTH, HELP_POPUP_HEIGHT, area);

    let mut lines = vec![Line::from("")];
    for (key, desc) in HELP_KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<9}", key),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(t.text_primary)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Mood follows CPU load, then temperature,",
        Style::default().fg(t.text_dim),
    )));
    lines.push(Line::from(Span::styled(
        "  then memory. Needs decay while time runs.",
        Style::default().fg(t.text_dim),
    )));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent))
            .title(Span::styled(" Help ", t.header_style()))
            .style(Style::default().bg(t.bg_dark)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}
