//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Projector};

pub(crate) mod library;
pub(crate) mod notify;
mod playback;
mod playlist;
mod util;

pub(crate) fn update(state: &mut Projector, message: Message) -> Task<Message> {
    match message {
        Message::Tick => playback::drain_events(state),

        // Adding media
        Message::PathInputChanged(s) => library::path_input_changed(state, s),
        Message::AddPressed => library::add_pressed(state),
        Message::AddFinished(result) => library::add_finished(state, result),
        Message::MetadataResolved(batch) => library::metadata_resolved(state, batch),

        // Transport
        Message::PlayAt(i) => playback::play_at(state, i),
        Message::TogglePlay => playback::toggle_play(state),
        Message::SeekBy(delta) => playback::seek_by(state, delta),
        Message::StepVolume(delta) => playback::step_volume(state, delta),

        // Sliders: preview vs commit
        Message::SeekDragged(percent) => playback::seek_dragged(state, percent),
        Message::SeekReleased => playback::seek_released(state),
        Message::VolumeDragged(v) => playback::volume_dragged(state, v),
        Message::VolumeReleased => playback::volume_released(state),

        // Playlist edits
        Message::Remove(i) => playlist::remove(state, i),
        Message::MoveUp(i) => playlist::move_up(state, i),
        Message::MoveDown(i) => playlist::move_down(state, i),
        Message::Clear => playlist::clear(state),

        // Playlist file
        Message::PlaylistFileInputChanged(s) => playlist::file_input_changed(state, s),
        Message::SavePlaylist => playlist::save(state),
        Message::PlaylistSaved(result) => playlist::saved(state, result),
        Message::LoadPlaylist => playlist::load(state),
        Message::PlaylistLoaded(result) => playlist::loaded(state, result),

        // Notifications
        Message::RequestThumbnail(i) => notify::request_thumbnail(state, i),
        Message::ThumbnailReady(result) => notify::thumbnail_ready(state, result),
        Message::HideThumbnail => notify::hide_thumbnail(state),
        Message::NotificationExpired(kind, token) => notify::expired(state, kind, token),
    }
}
