//! core/sync/transport.rs
//! Last-known engine state plus the scrub flag.

/// Position / length / volume as last reported by the engine.
///
/// While `user_is_scrubbing` is set, `position_ms` is a preview driven by the
/// drag gesture and engine reports are not merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportState {
    pub position_ms: u64,
    /// 0 = unknown.
    pub duration_ms: u64,
    pub volume_percent: u8,
    pub user_is_scrubbing: bool,

    pub is_playing: bool,
    /// Playlist index last handed to the engine.
    pub current_index: Option<usize>,
}

impl TransportState {
    pub fn new(volume_percent: u8) -> Self {
        Self {
            position_ms: 0,
            duration_ms: 0,
            volume_percent: volume_percent.min(100),
            user_is_scrubbing: false,
            is_playing: false,
            current_index: None,
        }
    }

    /// Overwrite with an engine report, keeping `position <= duration`.
    pub(crate) fn apply_status(&mut self, position_ms: u64, length_ms: u64, volume_percent: u8) {
        self.duration_ms = length_ms;
        self.position_ms = if length_ms > 0 {
            position_ms.min(length_ms)
        } else {
            position_ms
        };
        self.volume_percent = volume_percent.min(100);
    }

    /// `round(percent/100 * duration)`, or 0 while the duration is unknown.
    pub fn position_at_percent(&self, percent: f32) -> u64 {
        if self.duration_ms == 0 {
            return 0;
        }
        let ratio = f64::from(percent.clamp(0.0, 100.0)) / 100.0;
        ((ratio * self.duration_ms as f64).round() as u64).min(self.duration_ms)
    }

    pub(crate) fn reset_position(&mut self) {
        self.position_ms = 0;
        self.duration_ms = 0;
    }
}
