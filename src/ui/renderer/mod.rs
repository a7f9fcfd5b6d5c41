//! Renderer module: split into focused submodules.
//!
//! - `header`: Logo, mood badge, source summary
//! - `scene`: The playground with the pet sprite
//! - `stats`: Metrics and needs gauges
//! - `status_bar`: Bottom status bar with keybinds
//! - `overlays`: Help popup
//! - `helpers`: Shared rendering utilities

mod header;
pub mod helpers;
mod overlays;
mod scene;
mod stats;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::state::{AppState, SceneView};

/// Width of the stats column on wide terminals.
const STATS_WIDTH: u16 = 38;
/// Below this width the stats panel moves under the scene.
const NARROW_WIDTH: u16 = 80;

/// Top-level render function.
pub fn render(frame: &mut Frame, view: &SceneView, state: &AppState) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Min(8),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    header::render_header(frame, main_chunks[0], view, state);
    status_bar::render_status_bar(frame, main_chunks[2], state);

    let content = if size.width < NARROW_WIDTH {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(stats::STATS_HEIGHT)])
            .split(main_chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(STATS_WIDTH)])
            .split(main_chunks[1])
    };

    scene::render_scene(frame, content[0], view, state);
    stats::render_stats(frame, content[1], view, state);

    if state.show_help {
        overlays::render_help_overlay(frame, size, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PetState, Transform};
    use crate::monitor::mock_metrics_at;
    use crate::sprite::Sprite;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(width: u16, height: u16, sprite: Option<&Sprite>, state: &AppState) -> String {
        let metrics = mock_metrics_at(0);
        let view = SceneView {
            pet: PetState::default(),
            transform: Transform::default(),
            metrics: &metrics,
            sprite,
            source: "mock",
            frame: 0,
        };
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, &view, state)).unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn full_frame_shows_pet_and_stats() {
        let sprite = Sprite::builtin();
        let state = AppState::new(Theme::default(), "simulated");
        let text = draw(100, 30, Some(&sprite), &state);
        assert!(text.contains("syspet"));
        assert!(text.contains("( ^.^ )"));
        assert!(text.contains("Energy"));
        assert!(text.contains("Hunger"));
        assert!(text.contains("happy"));
    }

    #[test]
    fn hatching_frame_has_no_sprite() {
        let state = AppState::new(Theme::default(), "simulated");
        let text = draw(100, 30, None, &state);
        assert!(text.contains("hatching"));
        assert!(!text.contains("( ^.^ )"));
    }

    #[test]
    fn narrow_terminal_still_renders() {
        let sprite = Sprite::builtin();
        let state = AppState::new(Theme::default(), "simulated");
        let text = draw(60, 30, Some(&sprite), &state);
        assert!(text.contains("( ^.^ )"));
        assert!(text.contains("Energy"));
    }

    #[test]
    fn help_overlay_lists_actions() {
        let sprite = Sprite::builtin();
        let mut state = AppState::new(Theme::default(), "simulated");
        state.show_help = true;
        let text = draw(100, 30, Some(&sprite), &state);
        assert!(text.contains("Feed"));
        assert!(text.contains("Play"));
        assert!(text.contains("Scold"));
    }

    #[test]
    fn neglected_pet_shows_alert_in_danger_color() {
        let sprite = Sprite::builtin();
        let state = AppState::new(Theme::default(), "simulated");
        let metrics = mock_metrics_at(0);
        let view = SceneView {
            pet: PetState {
                hunger: 95.0,
                ..PetState::default()
            },
            transform: Transform::default(),
            metrics: &metrics,
            sprite: Some(&sprite),
            source: "mock",
            frame: 0,
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &view, &state)).unwrap();

        assert!(screen_text(&terminal).contains("Starving"));
        let buf = terminal.backend().buffer();
        let cells: Vec<_> = buf.content().iter().collect();
        assert!(cells.iter().any(|c| c.symbol() == "!" && c.fg == state.theme.danger));
        assert!(cells.iter().any(|c| c.symbol() == "m" && c.fg == state.theme.accent_secondary));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let sprite = Sprite::builtin();
        let state = AppState::new(Theme::default(), "simulated");
        draw(10, 4, Some(&sprite), &state);
    }
}
