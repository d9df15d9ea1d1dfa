//! core/projection.rs
//! Read model for the GUI: formatted strings and slider values derived from
//! a controller snapshot. Pure; rebuilt on every render.

use super::sync::SyncController;
use super::types::PlaylistEntry;

/// Shown instead of a duration we don't know yet.
pub const UNKNOWN_DURATION: &str = "--:--";

/// `M:SS` under an hour, `HH:MM:SS` from there. Fractional seconds are dropped.
pub fn format_ms(ms: u64) -> String {
    let s = ms / 1000;
    let h = s / 3600;
    let m = (s % 3600) / 60;
    let s = s % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

pub fn time_label(position_ms: u64, duration_ms: u64) -> String {
    format!("{} / {}", format_ms(position_ms), format_ms(duration_ms))
}

/// `round(position / duration * 100)`, or 0 while the duration is unknown.
pub fn slider_percent(position_ms: u64, duration_ms: u64) -> u8 {
    if duration_ms == 0 {
        return 0;
    }
    let pct = (position_ms as f64 / duration_ms as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Whole kilobytes, or empty when unknown.
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        String::new()
    } else {
        format!("{} KB", size_bytes / 1024)
    }
}

pub fn format_duration(duration_ms: u64) -> String {
    if duration_ms == 0 {
        UNKNOWN_DURATION.to_string()
    } else {
        format_ms(duration_ms)
    }
}

/// Cut `name` to `max_chars` characters, ending in an ellipsis.
pub fn elide(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let keep = max_chars - 1;
    let mut out: String = name.chars().take(keep).collect();
    out.push('…');
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    pub display_name: String,
    pub formatted_duration: String,
    pub formatted_size: String,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub time_label: String,
    pub slider_value: u8,
    pub volume_value: u8,
    pub is_playing: bool,
    pub now_playing: Option<String>,
    pub rows: Vec<PlaylistRow>,
}

impl Projection {
    pub fn build(ctl: &SyncController, name_width: usize) -> Self {
        let t = ctl.transport();
        let entries = ctl.playlist().entries();

        Self {
            time_label: time_label(t.position_ms, t.duration_ms),
            slider_value: slider_percent(t.position_ms, t.duration_ms),
            volume_value: ctl.displayed_volume(),
            is_playing: t.is_playing,
            now_playing: ctl.current_entry().map(|e| e.display_name.clone()),
            rows: rows(entries, t.current_index, name_width),
        }
    }
}

fn rows(entries: &[PlaylistEntry], current: Option<usize>, name_width: usize) -> Vec<PlaylistRow> {
    let last = entries.len().saturating_sub(1);

    entries
        .iter()
        .enumerate()
        .map(|(i, e)| PlaylistRow {
            display_name: elide(&e.display_name, name_width),
            formatted_duration: format_duration(e.duration_ms),
            formatted_size: format_size(e.size_bytes),
            can_move_up: i > 0,
            can_move_down: i < last,
            is_current: current == Some(i),
        })
        .collect()
}
