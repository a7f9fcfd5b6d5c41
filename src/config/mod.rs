use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;
use crate::models::{PetState, Position};
use crate::monitor::SourceKind;

/// Time base for the pet's motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Driven by accumulated frame deltas; pauses with the pet.
    Simulated,
    /// Driven by the wall clock; keeps drifting while paused.
    Wall,
}

impl ClockMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "simulated" | "sim" => Some(ClockMode::Simulated),
            "wall" => Some(ClockMode::Wall),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClockMode::Simulated => "simulated",
            ClockMode::Wall => "wall",
        }
    }
}

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/syspet/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Frame interval in milliseconds
    pub refresh_interval_ms: u64,
    /// Theme name (built-in or custom)
    pub theme: String,
    /// Where metrics come from
    pub metrics_source: SourceKind,
    /// Time base for motion
    pub motion_clock: ClockMode,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    /// Custom sprite art; `None` uses ~/.config/syspet/sprite.toml if present
    pub sprite_file: Option<PathBuf>,
    /// Starting pose of the pet
    pub pet: PetConfig,
}

/// Where the pet starts and how big it is.
#[derive(Debug, Clone, PartialEq)]
pub struct PetConfig {
    pub start_x: f64,
    pub start_y: f64,
    pub scale: f64,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            start_x: PET_START_X,
            start_y: PET_START_Y,
            scale: PET_BASE_SCALE,
        }
    }
}

impl PetConfig {
    /// Initial pet state for this pose.
    pub fn initial_state(&self) -> PetState {
        PetState {
            position: Position {
                x: self.start_x,
                y: self.start_y,
            },
            scale: self.scale,
            ..PetState::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_MS,
            theme: "default".to_string(),
            metrics_source: SourceKind::Mock,
            motion_clock: ClockMode::Simulated,
            log_level: "info".to_string(),
            sprite_file: None,
            pet: PetConfig::default(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional. Missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    refresh_interval_ms: Option<u64>,
    theme: Option<String>,
    metrics_source: Option<String>,
    motion_clock: Option<String>,
    log_level: Option<String>,
    sprite_file: Option<PathBuf>,
    pet: Option<FilePetConfig>,
}

/// TOML-deserializable `[pet]` section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FilePetConfig {
    start_x: Option<f64>,
    start_y: Option<f64>,
    scale: Option<f64>,
}

impl Config {
    /// Load config from ~/.config/syspet/config.toml, falling back to defaults
    /// for any missing fields. If the file doesn't exist, returns pure defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path with the same fallback rules.
    pub fn load_from(config_path: &Path) -> Self {
        let config = Config::default();

        let content = match std::fs::read_to_string(config_path) {
            Ok(c) => c,
            Err(_) => return config, // No config file, use defaults
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(file_config) => config.merge(file_config),
            Err(e) => {
                warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                config
            }
        }
    }

    /// Merge file values over defaults
    fn merge(mut self, file_config: FileConfig) -> Self {
        if let Some(v) = file_config.refresh_interval_ms {
            self.refresh_interval_ms = v.max(MIN_REFRESH_MS);
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                self.theme = v;
            }
        }
        if let Some(v) = file_config.metrics_source {
            match SourceKind::parse(&v) {
                Some(kind) => self.metrics_source = kind,
                None => warn!(value = %v, "unknown metrics_source, keeping mock"),
            }
        }
        if let Some(v) = file_config.motion_clock {
            match ClockMode::parse(&v) {
                Some(mode) => self.motion_clock = mode,
                None => warn!(value = %v, "unknown motion_clock, keeping simulated"),
            }
        }
        if let Some(v) = file_config.log_level {
            if !v.is_empty() {
                self.log_level = v;
            }
        }
        if let Some(v) = file_config.sprite_file {
            if !v.as_os_str().is_empty() {
                self.sprite_file = Some(v);
            }
        }

        // Merge pet section
        if let Some(p) = file_config.pet {
            if let Some(v) = p.start_x.filter(|v| v.is_finite()) {
                self.pet.start_x = v.clamp(0.0, SCENE_WIDTH);
            }
            if let Some(v) = p.start_y.filter(|v| v.is_finite()) {
                self.pet.start_y = v.clamp(0.0, SCENE_HEIGHT);
            }
            if let Some(v) = p.scale.filter(|v| v.is_finite()) {
                self.pet.scale = v.clamp(0.25, 4.0);
            }
        }

        self
    }

    /// Sprite file to load: the configured one, else the default path if a
    /// file exists there.
    pub fn resolved_sprite_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.sprite_file {
            return Some(path.clone());
        }
        let default = default_sprite_path();
        default.exists().then_some(default)
    }
}
