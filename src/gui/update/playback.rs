//! gui/update/playback.rs
//! GUI-side transport: engine event drain + slider gestures.
//!
//! - GUI never touches rodio/symphonia directly.
//! - Every gesture goes through `SyncController::dispatch`; nothing here
//!   edits transport state itself.

use std::sync::mpsc::TryRecvError;

use iced::Task;

use super::super::state::{Message, Projector};
use super::notify;
use crate::core::sync::ControlEvent;

pub(crate) fn drain_events(state: &mut Projector) -> Task<Message> {
    let Some(rx) = state.events.as_ref() else {
        return Task::none();
    };

    let mut drained = Vec::new();
    let mut disconnected = false;
    loop {
        match rx.try_recv() {
            Ok(ev) => drained.push(ev),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                disconnected = true;
                break;
            }
        }
    }

    let mut tasks = Vec::new();
    for ev in drained {
        let n = state.controller.dispatch(ControlEvent::Engine(ev));
        tasks.push(notify::notice(state, n));
    }

    if disconnected {
        log::error!("playback engine disconnected");
        state.events = None;
        tasks.push(notify::toast(state, "Playback engine stopped"));
    }

    Task::batch(tasks)
}

fn dispatch(state: &mut Projector, event: ControlEvent) -> Task<Message> {
    let n = state.controller.dispatch(event);
    notify::notice(state, n)
}

pub(crate) fn play_at(state: &mut Projector, index: usize) -> Task<Message> {
    dispatch(state, ControlEvent::PlayAt(index))
}

pub(crate) fn toggle_play(state: &mut Projector) -> Task<Message> {
    dispatch(state, ControlEvent::TogglePlay)
}

pub(crate) fn seek_by(state: &mut Projector, delta_ms: i64) -> Task<Message> {
    dispatch(state, ControlEvent::SeekBy(delta_ms))
}

pub(crate) fn step_volume(state: &mut Projector, delta: i16) -> Task<Message> {
    dispatch(state, ControlEvent::StepVolume(delta))
}

/// Seek slider moved: the first callback of a drag opens the scrub.
pub(crate) fn seek_dragged(state: &mut Projector, percent: f32) -> Task<Message> {
    if !state.controller.is_scrubbing() {
        state.controller.dispatch(ControlEvent::ScrubStart);
    }
    state.scrub_percent = Some(percent);
    dispatch(state, ControlEvent::ScrubMove(percent))
}

/// Seek slider released: commit the last preview.
pub(crate) fn seek_released(state: &mut Projector) -> Task<Message> {
    let Some(percent) = state.scrub_percent.take() else {
        return Task::none();
    };
    dispatch(state, ControlEvent::ScrubEnd(percent))
}

pub(crate) fn volume_dragged(state: &mut Projector, volume: u8) -> Task<Message> {
    state.volume_drag = Some(volume);
    dispatch(state, ControlEvent::VolumeDrag(volume))
}

pub(crate) fn volume_released(state: &mut Projector) -> Task<Message> {
    let Some(volume) = state.volume_drag.take() else {
        return Task::none();
    };
    dispatch(state, ControlEvent::VolumeRelease(volume))
}
