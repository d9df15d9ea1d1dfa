//! Transport bar + input row.

use iced::widget::{Container, Row, button, column, container, row, slider, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Projector};
use super::constants::{TIME_W, VOLUME_W};
use crate::core::projection::Projection;

/// Top playback bar.
///
/// Emits only Messages (no rodio, no decoding). Slider values come from the
/// live gesture while one is in progress, otherwise from the projection.
pub(crate) fn transport_bar<'a>(
    state: &'a Projector,
    p: &Projection,
) -> Container<'a, Message> {
    let play_label = if p.is_playing { "Pause" } else { "Play" };
    let step_ms = state.config.seek_step_ms() as i64;
    let vol_step = i16::from(state.config.volume_step());

    let controls = row![
        button(text(format!("« {}s", step_ms / 1000))).on_press(Message::SeekBy(-step_ms)),
        button(play_label).on_press(Message::TogglePlay),
        button(text(format!("{}s »", step_ms / 1000))).on_press(Message::SeekBy(step_ms)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    // --- seek slider (percent) ---
    let seek_value = state
        .scrub_percent
        .unwrap_or_else(|| f32::from(p.slider_value));
    let seek = slider(0.0..=100.0, seek_value, Message::SeekDragged)
        .step(0.1_f32)
        .on_release(Message::SeekReleased)
        .width(Length::Fill);

    // --- volume slider ---
    let volume = slider(0..=100, p.volume_value, Message::VolumeDragged)
        .on_release(Message::VolumeReleased)
        .width(Length::Fixed(VOLUME_W));

    let now_playing = match (&p.now_playing, state.controller.has_engine()) {
        (_, false) => "No audio output".to_string(),
        (Some(name), true) => name.clone(),
        (None, true) => "Nothing playing".to_string(),
    };

    let bar = row![
        controls,
        column![
            text(now_playing).size(14),
            row![
                seek,
                text(p.time_label.clone())
                    .size(12)
                    .width(Length::Fixed(TIME_W)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        ]
        .spacing(6)
        .width(Length::Fill),
        row![
            button("−").on_press(Message::StepVolume(-vol_step)),
            volume,
            button("+").on_press(Message::StepVolume(vol_step)),
            text(format!("{}%", p.volume_value)).size(12),
        ]
        .spacing(6)
        .align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar).padding(12)
}

/// Add path + playlist file controls.
pub(crate) fn input_bar(state: &Projector) -> Row<'_, Message> {
    let path_input = text_input("File or folder path", &state.path_input)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::AddPressed)
        .width(Length::FillPortion(3));

    let add_btn = if state.adding {
        button("Adding...")
    } else {
        button("Add").on_press(Message::AddPressed)
    };

    let file_input = text_input("playlist.json", &state.playlist_file_input)
        .on_input(Message::PlaylistFileInputChanged)
        .width(Length::FillPortion(2));

    row![
        path_input,
        add_btn,
        file_input,
        button("Save").on_press(Message::SavePlaylist),
        button("Load").on_press(Message::LoadPlaylist),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}
