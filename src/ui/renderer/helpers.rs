//! Shared rendering helpers: rate formatting, centered rect.

use ratatui::layout::Rect;

/// Format a KiB/s figure with a sensible unit (no "/s" suffix).
pub fn format_rate(kib_per_sec: f64) -> String {
    let kib = kib_per_sec.max(0.0);
    if kib >= 1024.0 * 1024.0 {
        format!("{:.1} GiB", kib / (1024.0 * 1024.0))
    } else if kib >= 1024.0 {
        format!("{:.1} MiB", kib / 1024.0)
    } else {
        format!("{:.1} KiB", kib)
    }
}

/// Return a `Rect` centered within `area` with the given dimensions.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
