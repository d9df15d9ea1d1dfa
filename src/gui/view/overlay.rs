//! Toast + thumbnail preview.
//! Both are shown only while the notification channel says so.

use iced::widget::image::Handle;
use iced::widget::{Container, button, column, container, image, text};
use iced::{Alignment, Length};

use super::super::state::{Message, Projector};

pub(crate) fn toast(state: &Projector) -> Option<Container<'_, Message>> {
    let message = state.notifications.toast()?;
    Some(
        container(text(message).size(14))
            .padding([8, 14])
            .width(Length::Fill)
            .style(container::rounded_box),
    )
}

pub(crate) fn thumbnail(state: &Projector) -> Option<Container<'_, Message>> {
    let path = state.notifications.thumbnail()?;
    let preview = column![
        image(Handle::from_path(path)).width(Length::Fill),
        button("Hide").on_press(Message::HideThumbnail),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    Some(container(preview).padding(8).style(container::rounded_box))
}
