//! config.rs
//! Embedded defaults (`config.toml`) merged with an optional user file.
//!
//! User file lives at `<config_dir>/projector/config.toml`. Any key it sets wins;
//! anything it leaves out falls back to the embedded default.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default, Clone)]
struct ConfigFile {
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    notifications: NotificationConfig,
    #[serde(default)]
    library: LibraryConfig,
    #[serde(default)]
    view: ViewConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Deserialize, Default, Clone)]
struct PlaybackConfig {
    status_interval_ms: Option<u64>,
    seek_step_ms: Option<u64>,
    volume_step: Option<u8>,
    initial_volume: Option<u8>,
}

#[derive(Deserialize, Default, Clone)]
struct NotificationConfig {
    toast_ms: Option<u64>,
    thumbnail_ms: Option<u64>,
    thumbnail_at_percent: Option<f32>,
}

#[derive(Deserialize, Default, Clone)]
struct LibraryConfig {
    extensions: Option<Vec<String>>,
}

#[derive(Deserialize, Default, Clone)]
struct ViewConfig {
    name_width: Option<usize>,
}

#[derive(Deserialize, Default, Clone)]
struct LoggingConfig {
    level: Option<String>,
}

#[derive(Default, Clone)]
pub struct Config {
    playback: PlaybackConfig,
    notifications: NotificationConfig,
    library: LibraryConfig,
    view: ViewConfig,
    logging: LoggingConfig,
}

impl Config {
    pub fn load() -> Self {
        let mut base = match toml::from_str::<ConfigFile>(DEFAULT_CONFIG) {
            Ok(base) => base,
            Err(e) => {
                log::error!(target: "config", "embedded config.toml is invalid: {e}");
                ConfigFile::default()
            }
        };

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Self::from_file(base)
    }

    /// Parse a config from TOML text on top of the embedded defaults.
    #[cfg(test)]
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG)?;
        merge(&mut base, toml::from_str(contents)?);
        Ok(Self::from_file(base))
    }

    fn from_file(file: ConfigFile) -> Self {
        Self {
            playback: file.playback,
            notifications: file.notifications,
            library: file.library,
            view: file.view,
            logging: file.logging,
        }
    }

    /// How often engine status is drained into the controller.
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(
            self.playback
                .status_interval_ms
                .unwrap_or(500)
                .clamp(50, 5_000),
        )
    }

    pub fn seek_step_ms(&self) -> u64 {
        self.playback.seek_step_ms.unwrap_or(5_000)
    }

    pub fn volume_step(&self) -> u8 {
        self.playback.volume_step.unwrap_or(10).min(100)
    }

    pub fn initial_volume(&self) -> u8 {
        self.playback.initial_volume.unwrap_or(100).min(100)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.toast_ms.unwrap_or(1_800))
    }

    pub fn thumbnail_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.thumbnail_ms.unwrap_or(1_500))
    }

    /// Where in the file (0..=100) previews grab their frame.
    pub fn thumbnail_at_percent(&self) -> f32 {
        self.notifications
            .thumbnail_at_percent
            .unwrap_or(10.0)
            .clamp(0.0, 100.0)
    }

    /// Lowercase extensions (no dot) that folder scans pick up.
    pub fn extensions(&self) -> Vec<String> {
        match &self.library.extensions {
            Some(exts) if !exts.is_empty() => exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            _ => crate::core::library::VIDEO_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Playlist row names longer than this are elided.
    pub fn name_width(&self) -> usize {
        self.view.name_width.unwrap_or(32).max(4)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .level
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("projector").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    let (b, u) = (&mut base.playback, user.playback);
    if u.status_interval_ms.is_some() {
        b.status_interval_ms = u.status_interval_ms;
    }
    if u.seek_step_ms.is_some() {
        b.seek_step_ms = u.seek_step_ms;
    }
    if u.volume_step.is_some() {
        b.volume_step = u.volume_step;
    }
    if u.initial_volume.is_some() {
        b.initial_volume = u.initial_volume;
    }

    let (b, u) = (&mut base.notifications, user.notifications);
    if u.toast_ms.is_some() {
        b.toast_ms = u.toast_ms;
    }
    if u.thumbnail_ms.is_some() {
        b.thumbnail_ms = u.thumbnail_ms;
    }
    if u.thumbnail_at_percent.is_some() {
        b.thumbnail_at_percent = u.thumbnail_at_percent;
    }

    if user.library.extensions.is_some() {
        base.library.extensions = user.library.extensions;
    }
    if user.view.name_width.is_some() {
        base.view.name_width = user.view.name_width;
    }
    if user.logging.level.is_some() {
        base.logging.level = user.logging.level;
    }
}
