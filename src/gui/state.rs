//! GUI state + messages.
//! Pure data definitions used by update/ + view/, plus startup.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Instant;

use iced::Task;

use crate::config::Config;
use crate::core::notify::{NotificationChannel, NotificationKind, TimerToken};
use crate::core::playback::{CommandSink, PlayerEvent, start_playback};
use crate::core::sync::SyncController;
use crate::core::types::MediaInfo;

use super::update::{library, notify};

/// Default for the playlist file box.
pub(crate) const DEFAULT_PLAYLIST_FILE: &str = "playlist.json";

/// App state
pub(crate) struct Projector {
    pub config: Config,

    // Playlist + transport; the only writer of either.
    pub controller: SyncController,
    // None once the engine is gone (or never started).
    pub events: Option<Receiver<PlayerEvent>>,

    pub notifications: NotificationChannel,

    // Inputs
    pub path_input: String,
    pub playlist_file_input: String,
    pub adding: bool,

    // Live slider gestures. Set on the first drag callback, taken on release.
    pub scrub_percent: Option<f32>,
    pub volume_drag: Option<u8>,
}

impl Projector {
    fn new(config: Config) -> (Self, Option<String>) {
        let (engine, events, failure) =
            match start_playback(config.status_interval(), config.initial_volume()) {
                Ok((controller, events)) => {
                    let sink: Box<dyn CommandSink> = Box::new(controller);
                    (Some(sink), Some(events), None)
                }
                Err(e) => {
                    log::error!("{e}");
                    (None, None, Some(e.to_string()))
                }
            };

        let state = Self {
            controller: SyncController::new(engine, config.initial_volume()),
            events,
            notifications: NotificationChannel::new(
                config.toast_duration(),
                config.thumbnail_duration(),
            ),
            path_input: String::new(),
            playlist_file_input: DEFAULT_PLAYLIST_FILE.to_string(),
            adding: false,
            scrub_percent: None,
            volume_drag: None,
            config,
        };

        (state, failure)
    }
}

/// `iced::application` boot: start the engine, then queue the CLI path if any.
pub(crate) fn boot(config: Config, startup: Option<PathBuf>) -> (Projector, Task<Message>) {
    let (mut state, failure) = Projector::new(config);

    let mut tasks = Vec::new();
    if let Some(msg) = failure {
        let expiry = state.notifications.show_toast(msg, Instant::now());
        tasks.push(notify::schedule(expiry));
    }
    if let Some(path) = startup {
        tasks.push(library::add_path(&mut state, path));
    }

    (state, Task::batch(tasks))
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    /// Status tick: drain engine events.
    Tick,

    // Adding media
    PathInputChanged(String),
    AddPressed,
    AddFinished(Result<Vec<PathBuf>, String>),
    MetadataResolved(Vec<(usize, PathBuf, MediaInfo)>),

    // Transport
    PlayAt(usize),
    TogglePlay,
    SeekDragged(f32),
    SeekReleased,
    VolumeDragged(u8),
    VolumeReleased,
    SeekBy(i64),
    StepVolume(i16),

    // Playlist edits
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
    Clear,

    // Playlist file
    PlaylistFileInputChanged(String),
    SavePlaylist,
    PlaylistSaved(Result<PathBuf, String>),
    LoadPlaylist,
    PlaylistLoaded(Result<Vec<PathBuf>, String>),

    // Notifications
    RequestThumbnail(usize),
    ThumbnailReady(Result<PathBuf, String>),
    HideThumbnail,
    NotificationExpired(NotificationKind, TimerToken),
}
