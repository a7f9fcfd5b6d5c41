//! Shared utility functions used across modules.

use crate::constants::SPINNER_CHARS;

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    SPINNER_CHARS[(tick % SPINNER_CHARS.len() as u64) as usize]
}

/// Get animated loading dots for the current tick.
pub fn loading_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

/// Convert a real elapsed interval into frame-delta units (60 Hz frames).
pub fn frames_from_millis(elapsed_ms: f64) -> f64 {
    (elapsed_ms.max(0.0) / crate::constants::FRAME_MS).min(crate::constants::MAX_FRAME_DELTA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_char_cycles() {
        assert_eq!(spinner_char(0), "◐");
        assert_eq!(spinner_char(1), "◓");
        assert_eq!(spinner_char(2), "◑");
        assert_eq!(spinner_char(3), "◒");
        assert_eq!(spinner_char(4), "◐");
        assert_eq!(spinner_char(100), "◐");
    }

    #[test]
    fn loading_dots_cycles() {
        assert_eq!(loading_dots(0), "");
        assert_eq!(loading_dots(1), ".");
        assert_eq!(loading_dots(2), "..");
        assert_eq!(loading_dots(3), "...");
        assert_eq!(loading_dots(4), "");
    }

    #[test]
    fn frames_from_millis_scales_to_60hz() {
        assert!((frames_from_millis(1000.0) - 60.0).abs() < 1e-9);
        assert!((frames_from_millis(1000.0 / 60.0) - 1.0).abs() < 1e-9);
        assert_eq!(frames_from_millis(0.0), 0.0);
    }

    #[test]
    fn frames_from_millis_clamps() {
        assert_eq!(frames_from_millis(-50.0), 0.0);
        assert_eq!(frames_from_millis(3_600_000.0), crate::constants::MAX_FRAME_DELTA);
    }
}
