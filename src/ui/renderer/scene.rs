//! Playground: the pet on its background.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::helpers::centered_rect;
use crate::ui::state::{AppState, SceneView};
use crate::ui::widgets::PetSprite;
use crate::utils::{loading_dots, spinner_char};

pub fn render_scene(frame: &mut Frame, area: Rect, view: &SceneView, state: &AppState) {
    let t = &state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title(Span::styled(" Playground ", t.header_style()))
        .style(Style::default().bg(t.scene_bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view.sprite {
        Some(sprite) => {
            frame.render_widget(
                PetSprite {
                    sprite,
                    mood: view.pet.mood,
                    transform: view.transform,
                    theme: t,
                },
                inner,
            );
        }
        None => {
            let msg = Paragraph::new(Line::from(Span::styled(
                format!(
                    "{} hatching{}",
                    spinner_char(view.frame / 4),
                    loading_dots(view.frame / 8)
                ),
                Style::default().fg(t.text_primary),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(msg, centered_rect(inner.width, 1, inner));
        }
    }
}
