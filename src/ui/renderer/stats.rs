//! Vitals panel: machine metrics on top, the pet's needs and pose below.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::helpers::format_rate;
use crate::constants::{ENERGY_ALERT, HUNGER_ALERT};
use crate::models::PetState;
use crate::ui::state::{AppState, SceneView};
use crate::ui::widgets::GradientGauge;

/// Rows the panel needs, borders included.
pub const STATS_HEIGHT: u16 = 13;

pub fn render_stats(frame: &mut Frame, area: Rect, view: &SceneView, state: &AppState) {
    let t = &state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title(Span::styled(" Vitals ", t.header_style()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let m = view.metrics;
    let pet = &view.pet;
    let row = |i: u16| Rect {
        x: inner.x,
        y: inner.y + i,
        width: inner.width,
        height: 1,
    };
    let fits = |i: u16| i < inner.height;

    if fits(0) {
        frame.render_widget(GradientGauge::new(m.cpu.usage as f32, "CPU   ", t), row(0));
    }
    if fits(1) {
        frame.render_widget(
            GradientGauge::new(m.cpu.temp as f32, "Temp  ", t)
                .value(format!("{:>5.1}°C", m.cpu.temp))
                .color(t.temp_color(m.cpu.temp as f32)),
            row(1),
        );
    }
    if fits(2) {
        frame.render_widget(GradientGauge::new(m.memory.percent as f32, "Memory", t), row(2));
    }
    if fits(3) {
        let net = Line::from(vec![
            Span::styled("Net    ", Style::default().fg(t.text_dim)),
            Span::styled(
                format!("↓ {}/s ", format_rate(m.network.rx)),
                Style::default().fg(t.success),
            ),
            Span::styled(
                format!("↑ {}/s", format_rate(m.network.tx)),
                Style::default().fg(t.info),
            ),
        ]);
        frame.render_widget(Paragraph::new(net), row(3));
    }

    if fits(5) {
        frame.render_widget(
            GradientGauge::new(pet.energy as f32, "Energy", t).inverted(),
            row(5),
        );
    }
    if fits(6) {
        frame.render_widget(GradientGauge::new(pet.hunger as f32, "Hunger", t), row(6));
    }

    if fits(7) {
        if let Some(alert) = needs_alert(pet) {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("! {}", alert), t.alert_style())),
                row(7),
            );
        }
    }

    let dim = |s: String| Span::styled(s, Style::default().fg(t.text_dim));
    let value = |s: String| Span::styled(s, Style::default().fg(t.text_primary));
    let lines = [
        Line::from(vec![
            dim("Mood   ".to_string()),
            Span::styled(
                pet.mood.label().to_string(),
                Style::default().fg(t.mood_color(pet.mood)),
            ),
        ]),
        Line::from(vec![
            dim("Pos    ".to_string()),
            value(format!("{:.1}, {:.1}", pet.position.x, pet.position.y)),
        ]),
        Line::from(vec![
            dim("Scale  ".to_string()),
            value(format!("{:.2}", view.transform.scale)),
            dim("  Alpha ".to_string()),
            value(format!("{:.2}", view.transform.alpha)),
        ]),
        Line::from(vec![
            dim("Cores  ".to_string()),
            value(format!("{}", m.cpu.cores)),
            dim("  Used ".to_string()),
            value(format!("{:.0}/{:.0} MiB", m.memory_used(), m.memory.total)),
        ]),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        let idx = 8 + i as u16;
        if fits(idx) {
            frame.render_widget(Paragraph::new(line), row(idx));
        }
    }
}

/// Warning for a neglected pet: hunger first, then exhaustion.
fn needs_alert(pet: &PetState) -> Option<&'static str> {
    if pet.hunger >= HUNGER_ALERT {
        Some("Starving, press f")
    } else if pet.energy <= ENERGY_ALERT {
        Some("Exhausted, press p")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_alert_for_fresh_pet() {
        assert_eq!(needs_alert(&PetState::default()), None);
    }

    #[test]
    fn hunger_alert_wins() {
        let pet = PetState {
            hunger: 90.0,
            energy: 5.0,
            ..PetState::default()
        };
        assert_eq!(needs_alert(&pet), Some("Starving, press f"));
    }

    #[test]
    fn energy_alert_at_threshold() {
        let pet = PetState {
            energy: ENERGY_ALERT,
            ..PetState::default()
        };
        assert_eq!(needs_alert(&pet), Some("Exhausted, press p"));
    }
}
