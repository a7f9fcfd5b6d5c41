use std::time::Instant;

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::models::{PetState, SystemMetrics, Transform};
use crate::sprite::Sprite;

use super::theme::Theme;

/// UI chrome owned by the app loop: theme, overlays, status line.
#[derive(Debug, Clone)]
pub struct AppState {
    pub theme: Theme,
    pub show_help: bool,
    pub paused: bool,
    /// Label of the motion time base ("simulated" / "wall").
    pub clock_label: &'static str,
    pub status_message: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(theme: Theme, clock_label: &'static str) -> Self {
        Self {
            theme,
            show_help: false,
            paused: false,
            clock_label,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// The status message, if it hasn't expired yet.
    pub fn active_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, when)| when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS)
            .map(|(msg, _)| msg.as_str())
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
        self.set_status(format!("Theme: {}", self.theme.name));
    }
}

/// Everything the renderer needs from the engine for one frame.
pub struct SceneView<'a> {
    pub pet: PetState,
    pub transform: Transform,
    pub metrics: &'a SystemMetrics,
    /// `None` while the sprite is still hatching.
    pub sprite: Option<&'a Sprite>,
    pub source: &'static str,
    pub frame: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn make_state() -> AppState {
        AppState::new(Theme::default(), "simulated")
    }

    #[test]
    fn new_state_is_quiet() {
        let state = make_state();
        assert!(!state.show_help);
        assert!(!state.paused);
        assert!(state.active_status().is_none());
    }

    #[test]
    fn status_message_is_visible_then_expires() {
        let mut state = make_state();
        state.set_status("Fed the pet".to_string());
        assert_eq!(state.active_status(), Some("Fed the pet"));

        let stale = Instant::now()
            .checked_sub(Duration::from_secs(STATUS_MESSAGE_TIMEOUT_SECS + 1))
            .unwrap();
        state.status_message = Some(("old".to_string(), stale));
        assert!(state.active_status().is_none());
    }

    #[test]
    fn cycle_theme_reports_new_name() {
        let mut state = make_state();
        state.cycle_theme();
        assert_eq!(state.theme.name, "nord");
        assert_eq!(state.active_status(), Some("Theme: nord"));
    }
}
