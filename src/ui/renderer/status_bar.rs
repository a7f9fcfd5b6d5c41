//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    // Helper to create a keybind badge
    let badge = |key: &str, color: ratatui::style::Color| -> Span {
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(t.bg_dark)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::raw(" "),
        badge("q", t.accent),
        dim(" Quit "),
        badge("f", t.success),
        dim(" Feed "),
        badge("p", t.mood_excited),
        dim(" Play "),
        badge("Space", t.accent),
        dim(if state.paused { " Resume " } else { " Pause " }),
        badge("T", t.accent),
        dim(&format!(" Theme: {} ", t.name)),
        badge("?", t.accent),
        dim(" Help "),
    ];

    // Status message (feed/play confirmation) -- auto-expires
    if let Some(msg) = state.active_status() {
        spans.push(Span::styled(
            format!("  {} ", msg),
            Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
