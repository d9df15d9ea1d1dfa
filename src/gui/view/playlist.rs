//! Playlist table.

use iced::widget::{Column, button, column, container, mouse_area, row, scrollable, text};
use iced::{Alignment, Length};

use super::super::state::Message;
use super::constants::{
    DURATION_W, HEADER_TEXT, LIST_SPACING, MARKER_W, NAME_W, ROW_H, ROW_HPAD, ROW_TEXT,
    ROW_VPAD, SIZE_W,
};
use crate::core::projection::{PlaylistRow, Projection};

pub(crate) fn build_playlist(p: &Projection) -> Column<'static, Message> {
    let title = row![
        text(format!("Playlist ({})", p.rows.len())).size(18),
        button("Clear").on_press_maybe((!p.rows.is_empty()).then_some(Message::Clear)),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    column![title, build_table(&p.rows).height(Length::Fill)].spacing(12)
}

fn build_table(rows: &[PlaylistRow]) -> iced::widget::Scrollable<'static, Message> {
    let header = row![
        text("").size(HEADER_TEXT).width(Length::Fixed(MARKER_W)),
        text("Name").size(HEADER_TEXT).width(Length::Fixed(NAME_W)),
        text("Length").size(HEADER_TEXT).width(Length::Fixed(DURATION_W)),
        text("Size").size(HEADER_TEXT).width(Length::Fixed(SIZE_W)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut col = column![header].spacing(LIST_SPACING);

    if rows.is_empty() {
        col = col.push(text("Add a file or folder to start.").size(ROW_TEXT));
    }

    for (i, r) in rows.iter().enumerate() {
        let marker = if r.is_current { "▶" } else { "" };

        let cells = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(MARKER_W)),
            text(r.display_name.clone())
                .size(ROW_TEXT)
                .width(Length::Fixed(NAME_W)),
            text(r.formatted_duration.clone())
                .size(ROW_TEXT)
                .width(Length::Fixed(DURATION_W)),
            text(r.formatted_size.clone())
                .size(ROW_TEXT)
                .width(Length::Fixed(SIZE_W)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        // Clicking the row plays it; the buttons don't bubble up to it.
        let activate = mouse_area(
            container(cells)
                .padding([ROW_VPAD, ROW_HPAD])
                .height(Length::Fixed(ROW_H)),
        )
        .on_press(Message::PlayAt(i));

        let actions = row![
            button("↑").on_press_maybe(r.can_move_up.then_some(Message::MoveUp(i))),
            button("↓").on_press_maybe(r.can_move_down.then_some(Message::MoveDown(i))),
            button("Preview").on_press(Message::RequestThumbnail(i)),
            button("×").on_press(Message::Remove(i)),
        ]
        .spacing(4)
        .align_y(Alignment::Center);

        col = col.push(row![activate, actions].spacing(8).align_y(Alignment::Center));
    }

    scrollable(col).height(Length::Fill)
}
