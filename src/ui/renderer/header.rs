//! Header bar: logo, mood badge, source summary.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::state::{AppState, SceneView};
use crate::utils::spinner_char;

pub fn render_header(frame: &mut Frame, area: Rect, view: &SceneView, state: &AppState) {
    let t = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Logo
            Constraint::Min(20),    // Mood
            Constraint::Length(30), // Source summary
        ])
        .split(area);

    let block = || {
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style())
    };

    // Logo
    let pulse = if view.frame % 30 < 15 { "●" } else { "○" };
    let logo = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(pulse, Style::default().fg(t.success)),
        Span::styled(" syspet ", t.header_style()),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(t.text_muted),
        ),
    ]))
    .block(block());
    frame.render_widget(logo, chunks[0]);

    // Mood badge + lifecycle badges
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", view.pet.mood.label()),
            t.mood_badge_style(view.pet.mood),
        ),
    ];
    if view.sprite.is_none() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} hatching ", spinner_char(view.frame / 4)),
            Style::default().fg(t.bg_dark).bg(t.info),
        ));
    }
    if state.paused {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " PAUSED ",
            Style::default()
                .fg(t.bg_dark)
                .bg(t.warning)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block()), chunks[1]);

    // Source summary
    let dim = Style::default().fg(t.text_dim);
    let value = Style::default().fg(t.accent_secondary);
    let summary = Paragraph::new(Line::from(vec![
        Span::styled("src ", dim),
        Span::styled(view.source, value),
        Span::styled(" · clock ", dim),
        Span::styled(state.clock_label, value),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right)
    .block(block());
    frame.render_widget(summary, chunks[2]);
}
