//! gui/update/library.rs
//! Adding files/folders + the background metadata probe.
//!
//! - Folder scans and probes run off-thread (`spawn_blocking`).
//! - Probe results come back in batches keyed by (index, path); the controller
//!   re-resolves stale indices by path.

use std::path::PathBuf;

use iced::Task;

use super::super::state::{Message, Projector};
use super::notify;
use super::util::{joined, spawn_blocking};
use crate::core;
use crate::core::probe::probe_media;
use crate::core::sync::{ControlEvent, Notice};
use crate::core::types::MediaInfo;

// Files per probe task.
const PROBE_CHUNK: usize = 8;

pub(crate) fn path_input_changed(state: &mut Projector, s: String) -> Task<Message> {
    state.path_input = s;
    Task::none()
}

pub(crate) fn add_pressed(state: &mut Projector) -> Task<Message> {
    if state.adding {
        return Task::none();
    }

    let raw = state.path_input.trim();
    if raw.is_empty() {
        return notify::toast(state, "Enter a file or folder path");
    }

    let path = PathBuf::from(raw);
    add_path(state, path)
}

/// Expand a file or folder off-thread; the result arrives as `AddFinished`.
pub(crate) fn add_path(state: &mut Projector, path: PathBuf) -> Task<Message> {
    state.adding = true;
    let extensions = state.config.extensions();

    Task::perform(
        spawn_blocking(move || {
            core::expand_input(&path, &extensions).map_err(|e| e.to_string())
        }),
        |r| Message::AddFinished(joined(r)),
    )
}

pub(crate) fn add_finished(
    state: &mut Projector,
    result: Result<Vec<PathBuf>, String>,
) -> Task<Message> {
    state.adding = false;

    let paths = match result {
        Ok(paths) => paths,
        Err(e) => {
            log::warn!("add failed: {e}");
            return notify::toast(state, e);
        }
    };

    let added = state.controller.add_files(paths);
    let Some(&(first, _)) = added.first() else {
        return notify::toast(state, "Nothing new to add");
    };
    state.path_input.clear();

    let message = match state.controller.playlist().get(first) {
        Some(entry) if added.len() == 1 => format!("Added: {}", entry.display_name),
        _ => format!("Added {} files", added.len()),
    };
    log::info!("{message}");

    let probes = probe_metadata(&added);
    let n = state.controller.dispatch(ControlEvent::PlayAt(first));
    let announce = announce(state, message, n);

    Task::batch([probes, announce])
}

/// Toast `message`, unless starting playback failed; that wins.
pub(crate) fn announce(state: &mut Projector, message: String, play: Option<Notice>) -> Task<Message> {
    match play {
        Some(n @ (Notice::CommandDropped(_) | Notice::EngineError(_))) => {
            notify::notice(state, Some(n))
        }
        _ => notify::toast(state, message),
    }
}

pub(crate) fn probe_metadata(added: &[(usize, PathBuf)]) -> Task<Message> {
    Task::batch(added.chunks(PROBE_CHUNK).map(|chunk| {
        let chunk = chunk.to_vec();
        Task::perform(
            spawn_blocking(move || {
                chunk
                    .into_iter()
                    .map(|(i, path)| {
                        let info = probe_media(&path);
                        (i, path, info)
                    })
                    .collect::<Vec<_>>()
            }),
            |r| {
                Message::MetadataResolved(r.unwrap_or_else(|e| {
                    log::warn!("metadata probe: {e}");
                    Vec::new()
                }))
            },
        )
    }))
}

pub(crate) fn metadata_resolved(
    state: &mut Projector,
    batch: Vec<(usize, PathBuf, MediaInfo)>,
) -> Task<Message> {
    for (index, path, info) in batch {
        if !state.controller.on_metadata_resolved(index, &path, info) {
            log::debug!("metadata for {} arrived after removal", path.display());
        }
    }
    Task::none()
}
