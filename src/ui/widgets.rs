use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::constants::{SCENE_HEIGHT, SCENE_WIDTH};
use crate::models::{Mood, Transform};
use crate::sprite::Sprite;

/// Opacity below which the sprite is drawn dimmed.
const DIM_ALPHA: f64 = 0.95;
/// Scale above which the sprite is drawn bold.
const BOLD_SCALE: f64 = 1.05;

/// A sparkline-style bar gauge with gradient coloring.
pub struct GradientGauge<'a> {
    pub percent: f32,
    pub label: String,
    /// Text shown after the bar; defaults to the percentage.
    pub value: Option<String>,
    /// Color as if the value were `100 - percent` (for "more is better").
    pub inverted: bool,
    /// Fixed bar color instead of the usage gradient.
    pub color: Option<Color>,
    pub theme: &'a Theme,
}

impl<'a> GradientGauge<'a> {
    pub fn new(percent: f32, label: &str, theme: &'a Theme) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            label: label.to_string(),
            value: None,
            inverted: false,
            color: None,
            theme,
        }
    }

    pub fn value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Widget for GradientGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 1 {
            return;
        }

        let value_str = self
            .value
            .unwrap_or_else(|| format!("{:>5.1}%", self.percent));
        let label_width = self.label.width() as u16 + 1;
        let value_width = value_str.width() as u16 + 1;
        let bar_width = area.width.saturating_sub(label_width + value_width);

        if bar_width < 2 {
            return;
        }

        buf.set_string(
            area.x,
            area.y,
            &self.label,
            Style::default().fg(self.theme.text_dim),
        );

        let bar_x = area.x + label_width;
        let filled = ((self.percent / 100.0) * bar_width as f32) as u16;
        let color = if let Some(c) = self.color {
            c
        } else if self.inverted {
            self.theme.usage_color(100.0 - self.percent)
        } else {
            self.theme.usage_color(self.percent)
        };

        for i in 0..bar_width {
            let (ch, style) = if i < filled {
                ('█', Style::default().fg(color))
            } else if i == filled {
                let frac = (self.percent / 100.0) * bar_width as f32 - filled as f32;
                let partial = if frac > 0.66 {
                    '▓'
                } else if frac > 0.33 {
                    '▒'
                } else {
                    '░'
                };
                (partial, Style::default().fg(color))
            } else {
                ('░', Style::default().fg(self.theme.gauge_bg))
            };
            buf.set_string(bar_x + i, area.y, ch.to_string(), style);
        }

        buf.set_string(
            bar_x + bar_width + 1,
            area.y,
            &value_str,
            Style::default().fg(color),
        );
    }
}

/// The pet's art placed in the playground according to its transform.
///
/// World coordinates (800x600) map onto the area; the transform's
/// position is the sprite's center. Opacity below 1 draws dimmed and a
/// pulse above base scale draws bold.
pub struct PetSprite<'a> {
    pub sprite: &'a Sprite,
    pub mood: Mood,
    pub transform: Transform,
    pub theme: &'a Theme,
}

impl PetSprite<'_> {
    /// Top-left cell for the sprite inside `area`, clamped so the art stays
    /// visible.
    pub fn origin(&self, area: Rect) -> (u16, u16) {
        let (w, h) = self.sprite.size(self.mood);
        let cx = (self.transform.x / SCENE_WIDTH).clamp(0.0, 1.0) * area.width as f64;
        let cy = (self.transform.y / SCENE_HEIGHT).clamp(0.0, 1.0) * area.height as f64;

        let max_x = area.width.saturating_sub(w) as f64;
        let max_y = area.height.saturating_sub(h) as f64;
        let x = (cx - w as f64 / 2.0).clamp(0.0, max_x) as u16;
        let y = (cy - h as f64 / 2.0).clamp(0.0, max_y) as u16;
        (area.x + x, area.y + y)
    }

    fn style(&self) -> Style {
        let mut style = Style::default().fg(self.theme.mood_color(self.mood));
        if self.transform.alpha < DIM_ALPHA {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.transform.scale > BOLD_SCALE {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

impl Widget for PetSprite<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (x, y) = self.origin(area);
        let style = self.style();
        let right = area.x + area.width;
        let bottom = area.y + area.height;

        for (row, line) in self.sprite.frame(self.mood).iter().enumerate() {
            let line_y = y + row as u16;
            if line_y >= bottom {
                break;
            }
            buf.set_stringn(x, line_y, line, (right - x) as usize, style);
        }
    }
}
