use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::constants::*;
use crate::models::Mood;

/// All available built-in theme names. The first is the default.
pub const BUILTIN_THEME_NAMES: &[&str] = &["lagoon", "nord", "dracula", "midnight"];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub accent_secondary: Color,
    pub bg_dark: Color,
    /// Playground background behind the pet.
    pub scene_bg: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // ── Gauges ───────────────────────────────────────────────
    pub gauge_low: Color,
    pub gauge_mid: Color,
    pub gauge_high: Color,
    pub gauge_critical: Color,
    pub gauge_bg: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,

    // ── Pet moods ────────────────────────────────────────────
    pub mood_happy: Color,
    pub mood_sad: Color,
    pub mood_excited: Color,
    pub mood_sleepy: Color,
    pub mood_busy: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default theme: dark chrome around a bright lagoon-blue playground.
    pub fn lagoon() -> Self {
        Self {
            name: "lagoon".to_string(),
            accent: Color::Rgb(99, 179, 237),
            accent_secondary: Color::Rgb(129, 230, 217),
            bg_dark: Color::Rgb(22, 22, 30),
            scene_bg: Color::Rgb(16, 144, 187),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            info: Color::Rgb(99, 179, 237),
            gauge_low: Color::Rgb(72, 199, 142),
            gauge_mid: Color::Rgb(255, 193, 69),
            gauge_high: Color::Rgb(255, 136, 0),
            gauge_critical: Color::Rgb(255, 85, 85),
            gauge_bg: Color::Rgb(45, 45, 58),
            border: Color::Rgb(55, 55, 75),
            mood_happy: Color::Rgb(255, 236, 140),
            mood_sad: Color::Rgb(170, 180, 215),
            mood_excited: Color::Rgb(255, 120, 200),
            mood_sleepy: Color::Rgb(200, 200, 220),
            mood_busy: Color::Rgb(255, 160, 60),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),           // nord8 frost
            accent_secondary: Color::Rgb(143, 188, 187), // nord7
            bg_dark: Color::Rgb(46, 52, 64),             // nord0
            scene_bg: Color::Rgb(59, 66, 82),            // nord1
            text_primary: Color::Rgb(229, 233, 240),     // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14
            warning: Color::Rgb(235, 203, 139), // nord13
            danger: Color::Rgb(191, 97, 106),   // nord11
            info: Color::Rgb(129, 161, 193),    // nord9
            gauge_low: Color::Rgb(163, 190, 140),
            gauge_mid: Color::Rgb(235, 203, 139),
            gauge_high: Color::Rgb(208, 135, 112),
            gauge_critical: Color::Rgb(191, 97, 106),
            gauge_bg: Color::Rgb(67, 76, 94),
            border: Color::Rgb(76, 86, 106),
            mood_happy: Color::Rgb(235, 203, 139),
            mood_sad: Color::Rgb(129, 161, 193),
            mood_excited: Color::Rgb(180, 142, 173), // nord15
            mood_sleepy: Color::Rgb(216, 222, 233),
            mood_busy: Color::Rgb(208, 135, 112),
        }
    }

    /// Dracula palette.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),          // cyan
            accent_secondary: Color::Rgb(80, 250, 123), // green
            bg_dark: Color::Rgb(40, 42, 54),
            scene_bg: Color::Rgb(68, 71, 90),
            text_primary: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(188, 188, 172),
            text_muted: Color::Rgb(98, 114, 164),
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(241, 250, 140),
            danger: Color::Rgb(255, 85, 85),
            info: Color::Rgb(139, 233, 253),
            gauge_low: Color::Rgb(80, 250, 123),
            gauge_mid: Color::Rgb(241, 250, 140),
            gauge_high: Color::Rgb(255, 184, 108),
            gauge_critical: Color::Rgb(255, 85, 85),
            gauge_bg: Color::Rgb(68, 71, 90),
            border: Color::Rgb(98, 114, 164),
            mood_happy: Color::Rgb(241, 250, 140),
            mood_sad: Color::Rgb(98, 114, 164),
            mood_excited: Color::Rgb(255, 121, 198), // pink
            mood_sleepy: Color::Rgb(189, 147, 249),  // purple
            mood_busy: Color::Rgb(255, 184, 108),
        }
    }

    /// Plain palette that reads well on low-color terminals.
    pub fn midnight() -> Self {
        Self {
            name: "midnight".to_string(),
            accent: Color::Cyan,
            accent_secondary: Color::LightCyan,
            bg_dark: Color::Black,
            scene_bg: Color::Black,
            text_primary: Color::White,
            text_dim: Color::Gray,
            text_muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            info: Color::Blue,
            gauge_low: Color::Green,
            gauge_mid: Color::Yellow,
            gauge_high: Color::LightRed,
            gauge_critical: Color::Red,
            gauge_bg: Color::DarkGray,
            border: Color::DarkGray,
            mood_happy: Color::Yellow,
            mood_sad: Color::Blue,
            mood_excited: Color::Magenta,
            mood_sleepy: Color::Gray,
            mood_busy: Color::LightRed,
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    /// "default" is an alias for the first built-in.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "lagoon" => Some(Self::lagoon()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            "midnight" => Some(Self::midnight()),
            _ => None,
        }
    }

    /// Cycle to the next built-in theme. Custom themes cycle to the first.
    pub fn next_builtin(&self) -> Self {
        let next_idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .map_or(0, |idx| (idx + 1) % BUILTIN_THEME_NAMES.len());
        Self::by_name(BUILTIN_THEME_NAMES[next_idx]).unwrap_or_default()
    }

    /// Resolve a configured name: built-in first, then a custom file.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name)
            .or_else(|| Self::from_toml_file(&custom_theme_path(name)))
            .unwrap_or_default()
    }

    /// Load a custom theme from a TOML file, falling back to default for missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let file: ThemeFile = toml::from_str(&content).ok()?;
        Some(
            file.into_theme(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom"),
            ),
        )
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Needs warnings in the vitals panel.
    pub fn alert_style(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn mood_color(&self, mood: Mood) -> Color {
        match mood {
            Mood::Happy => self.mood_happy,
            Mood::Sad => self.mood_sad,
            Mood::Excited => self.mood_excited,
            Mood::Sleepy => self.mood_sleepy,
            Mood::Busy => self.mood_busy,
        }
    }

    pub fn mood_badge_style(&self, mood: Mood) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.mood_color(mood))
            .add_modifier(Modifier::BOLD)
    }

    /// Returns a color for a usage percentage gauge.
    pub fn usage_color(&self, percent: f32) -> Color {
        if percent >= USAGE_CRITICAL_PCT {
            self.gauge_critical
        } else if percent >= USAGE_HIGH_PCT {
            self.gauge_high
        } else if percent >= USAGE_MID_PCT {
            self.gauge_mid
        } else {
            self.gauge_low
        }
    }

    /// Returns a color for temperature in Celsius.
    pub fn temp_color(&self, celsius: f32) -> Color {
        if celsius >= TEMP_CRITICAL_C {
            self.gauge_critical
        } else if celsius >= TEMP_HIGH_C {
            self.gauge_high
        } else if celsius >= TEMP_MID_C {
            self.gauge_mid
        } else {
            self.gauge_low
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::lagoon()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional; missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    accent_secondary: Option<String>,
    bg_dark: Option<String>,
    scene_bg: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    info: Option<String>,
    gauge_low: Option<String>,
    gauge_mid: Option<String>,
    gauge_high: Option<String>,
    gauge_critical: Option<String>,
    gauge_bg: Option<String>,
    border: Option<String>,
    mood_happy: Option<String>,
    mood_sad: Option<String>,
    mood_excited: Option<String>,
    mood_sleepy: Option<String>,
    mood_busy: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default();
        let pick = |v: &Option<String>, fallback: Color| parse_color(v).unwrap_or(fallback);
        Theme {
            name: name.to_string(),
            accent: pick(&self.accent, base.accent),
            accent_secondary: pick(&self.accent_secondary, base.accent_secondary),
            bg_dark: pick(&self.bg_dark, base.bg_dark),
            scene_bg: pick(&self.scene_bg, base.scene_bg),
            text_primary: pick(&self.text_primary, base.text_primary),
            text_dim: pick(&self.text_dim, base.text_dim),
            text_muted: pick(&self.text_muted, base.text_muted),
            success: pick(&self.success, base.success),
            warning: pick(&self.warning, base.warning),
            danger: pick(&self.danger, base.danger),
            info: pick(&self.info, base.info),
            gauge_low: pick(&self.gauge_low, base.gauge_low),
            gauge_mid: pick(&self.gauge_mid, base.gauge_mid),
            gauge_high: pick(&self.gauge_high, base.gauge_high),
            gauge_critical: pick(&self.gauge_critical, base.gauge_critical),
            gauge_bg: pick(&self.gauge_bg, base.gauge_bg),
            border: pick(&self.border, base.border),
            mood_happy: pick(&self.mood_happy, base.mood_happy),
            mood_sad: pick(&self.mood_sad, base.mood_sad),
            mood_excited: pick(&self.mood_excited, base.mood_excited),
            mood_sleepy: pick(&self.mood_sleepy, base.mood_sleepy),
            mood_busy: pick(&self.mood_busy, base.mood_busy),
        }
    }
}

/// Parse a hex color string like "#FF8800" or "FF8800" into a ratatui Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
