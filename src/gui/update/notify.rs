//! gui/update/notify.rs
//! Toasts, thumbnail previews, and the timers that hide them.
//!
//! Every show returns an `Expiry`; `schedule` waits it out on the runtime's
//! timer and comes back as `NotificationExpired`. The channel ignores stale ones.

use std::path::PathBuf;
use std::time::Instant;

use iced::Task;

use super::super::state::{Message, Projector};
use super::util::spawn_blocking;
use crate::core::notify::{Expiry, NotificationKind, TimerToken};
use crate::core::sync::Notice;
use crate::core::thumbnail::{self, FFMPEG_TIMEOUT};

pub(crate) fn schedule(expiry: Expiry) -> Task<Message> {
    let Expiry { kind, token, after } = expiry;
    Task::perform(tokio::time::sleep(after), move |()| {
        Message::NotificationExpired(kind, token)
    })
}

pub(crate) fn toast(state: &mut Projector, message: impl Into<String>) -> Task<Message> {
    let expiry = state.notifications.show_toast(message, Instant::now());
    schedule(expiry)
}

/// Turn a controller notice into a toast.
pub(crate) fn notice(state: &mut Projector, notice: Option<Notice>) -> Task<Message> {
    match notice {
        None => Task::none(),
        Some(Notice::Playing(name)) => toast(state, format!("Playing: {name}")),
        Some(Notice::EngineError(e)) => toast(state, format!("Playback error: {e}")),
        Some(Notice::CommandDropped(e)) => toast(state, format!("Command dropped: {e}")),
    }
}

pub(crate) fn expired(
    state: &mut Projector,
    kind: NotificationKind,
    token: TimerToken,
) -> Task<Message> {
    if !state.notifications.expire(kind, token) {
        log::trace!("stale {kind:?} expiry ignored");
    }
    Task::none()
}

/// Grab a frame `thumbnail_at_percent` into the entry.
pub(crate) fn request_thumbnail(state: &mut Projector, index: usize) -> Task<Message> {
    let Some(entry) = state.controller.playlist().get(index) else {
        return Task::none();
    };

    let path = entry.source_path.clone();
    let at_percent = f64::from(state.config.thumbnail_at_percent());
    let at_ms = (entry.duration_ms as f64 * at_percent / 100.0).round() as u64;

    Task::perform(
        spawn_blocking(move || {
            thumbnail::generate(&path, at_ms, FFMPEG_TIMEOUT).map_err(|e| e.to_string())
        }),
        |r| Message::ThumbnailReady(super::util::joined(r)),
    )
}

pub(crate) fn thumbnail_ready(
    state: &mut Projector,
    result: Result<PathBuf, String>,
) -> Task<Message> {
    match result {
        Ok(path) => show_thumbnail(state, Some(path)),
        Err(e) => {
            log::info!("thumbnail: {e}");
            toast(state, e)
        }
    }
}

pub(crate) fn hide_thumbnail(state: &mut Projector) -> Task<Message> {
    show_thumbnail(state, None)
}

fn show_thumbnail(state: &mut Projector, path: Option<PathBuf>) -> Task<Message> {
    match state.notifications.show_thumbnail(path, Instant::now()) {
        Some(expiry) => schedule(expiry),
        None => Task::none(),
    }
}
