//! gui/update/playlist.rs
//! Row edits and playlist save/load.

use std::path::PathBuf;

use iced::Task;

use super::super::state::{Message, Projector};
use super::util::{joined, spawn_blocking};
use super::{library, notify};
use crate::core::playlist_file;
use crate::core::sync::ControlEvent;

pub(crate) fn remove(state: &mut Projector, index: usize) -> Task<Message> {
    state.controller.dispatch(ControlEvent::RemoveAt(index));
    Task::none()
}

pub(crate) fn move_up(state: &mut Projector, index: usize) -> Task<Message> {
    state.controller.dispatch(ControlEvent::MoveUp(index));
    Task::none()
}

pub(crate) fn move_down(state: &mut Projector, index: usize) -> Task<Message> {
    state.controller.dispatch(ControlEvent::MoveDown(index));
    Task::none()
}

pub(crate) fn clear(state: &mut Projector) -> Task<Message> {
    let n = state.controller.dispatch(ControlEvent::ClearPlaylist);
    let dropped = notify::notice(state, n);
    Task::batch([dropped, notify::toast(state, "Playlist cleared")])
}

pub(crate) fn file_input_changed(state: &mut Projector, s: String) -> Task<Message> {
    state.playlist_file_input = s;
    Task::none()
}

fn playlist_file(state: &Projector) -> Option<PathBuf> {
    let trimmed = state.playlist_file_input.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

pub(crate) fn save(state: &mut Projector) -> Task<Message> {
    let Some(file) = playlist_file(state) else {
        return notify::toast(state, "Enter a playlist file name");
    };
    if state.controller.playlist().is_empty() {
        return notify::toast(state, "Playlist is empty");
    }

    let paths = state.controller.playlist().paths();
    Task::perform(
        spawn_blocking(move || {
            playlist_file::save(&file, &paths)
                .map(|()| file)
                .map_err(|e| e.to_string())
        }),
        |r| Message::PlaylistSaved(joined(r)),
    )
}

pub(crate) fn saved(state: &mut Projector, result: Result<PathBuf, String>) -> Task<Message> {
    match result {
        Ok(file) => {
            log::info!("playlist saved to {}", file.display());
            notify::toast(state, format!("Saved: {}", file.display()))
        }
        Err(e) => {
            log::warn!("playlist save failed: {e}");
            notify::toast(state, format!("Save failed: {e}"))
        }
    }
}

pub(crate) fn load(state: &mut Projector) -> Task<Message> {
    let Some(file) = playlist_file(state) else {
        return notify::toast(state, "Enter a playlist file name");
    };

    Task::perform(
        spawn_blocking(move || playlist_file::load(&file).map_err(|e| e.to_string())),
        |r| Message::PlaylistLoaded(joined(r)),
    )
}

/// Loaded entries are appended, then playback starts from the top.
pub(crate) fn loaded(state: &mut Projector, result: Result<Vec<PathBuf>, String>) -> Task<Message> {
    let paths = match result {
        Ok(paths) => paths,
        Err(e) => {
            log::warn!("playlist load failed: {e}");
            return notify::toast(state, format!("Load failed: {e}"));
        }
    };

    let added = state.controller.add_files(paths);
    let probes = library::probe_metadata(&added);

    let n = state.controller.dispatch(ControlEvent::PlayAt(0));
    let announce = library::announce(state, format!("Loaded {} files", added.len()), n);

    Task::batch([probes, announce])
}
