//! Application-wide constants.
//!
//! Centralizes the pet's tuning numbers, timing, layout and paths.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Minimum allowed frame interval (ms).
pub const MIN_REFRESH_MS: u64 = 16;
/// Default frame interval (ms), roughly 30 fps.
pub const DEFAULT_REFRESH_MS: u64 = 33;
/// Length of one delta unit: a single frame at 60 Hz (ms).
pub const FRAME_MS: f64 = 1000.0 / 60.0;
/// Largest delta accepted from the frame driver in one step (frames).
/// Suspending the terminal would otherwise dump minutes of decay at once.
pub const MAX_FRAME_DELTA: f64 = 60.0;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
/// Frames between JSON state reports in headless mode.
pub const HEADLESS_REPORT_TICKS: u64 = 30;

// ── Pet: initial state ────────────────────────────────────────────
pub const PET_START_ENERGY: f64 = 100.0;
pub const PET_START_HUNGER: f64 = 0.0;
pub const PET_START_X: f64 = 400.0;
pub const PET_START_Y: f64 = 300.0;
pub const PET_BASE_SCALE: f64 = 1.0;

// ── Pet: needs ────────────────────────────────────────────────────
pub const NEED_MIN: f64 = 0.0;
pub const NEED_MAX: f64 = 100.0;
/// Energy lost per delta unit.
pub const ENERGY_DECAY_PER_FRAME: f64 = 0.01;
/// Hunger gained per delta unit.
pub const HUNGER_GROWTH_PER_FRAME: f64 = 0.005;
/// Hunger removed by one feeding.
pub const FEED_AMOUNT: f64 = 20.0;
/// Energy restored by one play session.
pub const PLAY_AMOUNT: f64 = 15.0;

// ── Pet: mood rules ───────────────────────────────────────────────
/// CPU usage above which the pet is busy (percent).
pub const BUSY_CPU_PCT: f64 = 80.0;
/// CPU temperature above which the pet is sleepy (Celsius).
pub const SLEEPY_TEMP_C: f64 = 70.0;
/// Memory usage above which the pet is excited (percent).
pub const EXCITED_MEM_PCT: f64 = 85.0;

// ── Pet: animation ────────────────────────────────────────────────
/// Opacity while sleepy.
pub const SLEEPY_ALPHA: f64 = 0.7;
/// Pulse frequency while excited (per ms).
pub const PULSE_FREQ: f64 = 0.01;
/// Pulse amplitude while excited (fraction of base scale).
pub const PULSE_AMPLITUDE: f64 = 0.1;

// ── Scene ─────────────────────────────────────────────────────────
/// Logical playground width in world units.
pub const SCENE_WIDTH: f64 = 800.0;
/// Logical playground height in world units.
pub const SCENE_HEIGHT: f64 = 600.0;

// ── Mock metrics ──────────────────────────────────────────────────
/// Multiplier from epoch milliseconds to the mock phase.
pub const MOCK_TIME_FACTOR: f64 = 0.0001;
pub const MOCK_CPU_CORES: u32 = 4;
pub const MOCK_MEMORY_TOTAL_MB: f64 = 8192.0;

// ── Live metrics ──────────────────────────────────────────────────
/// Minimum time between real sysinfo refreshes (ms). Frames in between
/// reuse the cached snapshot. Never below sysinfo's CPU update interval.
pub const LIVE_SAMPLE_INTERVAL_MS: u64 = 500;

// ── Needs alerts ──────────────────────────────────────────────────
/// Hunger at or above which the vitals panel warns.
pub const HUNGER_ALERT: f64 = 80.0;
/// Energy at or below which the vitals panel warns.
pub const ENERGY_ALERT: f64 = 20.0;

// ── Usage Color Thresholds ────────────────────────────────────────
/// Usage percentage above which color is "critical".
pub const USAGE_CRITICAL_PCT: f32 = 90.0;
/// Usage percentage above which color is "high".
pub const USAGE_HIGH_PCT: f32 = 70.0;
/// Usage percentage above which color is "mid".
pub const USAGE_MID_PCT: f32 = 40.0;
/// Temperature above which color is "critical" (Celsius).
pub const TEMP_CRITICAL_C: f32 = 90.0;
/// Temperature above which color is "high" (Celsius).
pub const TEMP_HIGH_C: f32 = 75.0;
/// Temperature above which color is "mid" (Celsius).
pub const TEMP_MID_C: f32 = 60.0;

// ── Popup Dimensions ──────────────────────────────────────────────
/// Help overlay width.
pub const HELP_POPUP_WIDTH: u16 = 44;
/// Help overlay height.
pub const HELP_POPUP_HEIGHT: u16 = 14;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/syspet/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("syspet")
}

/// Returns `~/.config/syspet/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/syspet/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    config_dir().join("themes").join(format!("{}.toml", name))
}

/// Returns `~/.config/syspet/sprite.toml`.
pub fn default_sprite_path() -> PathBuf {
    config_dir().join("sprite.toml")
}

/// Returns `~/.local/share/syspet/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("syspet")
}

/// Returns `~/.local/share/syspet/syspet.log`.
pub fn log_file_path() -> PathBuf {
    data_dir().join("syspet.log")
}
