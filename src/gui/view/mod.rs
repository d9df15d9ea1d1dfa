//! GUI renderer (reads state, produces widgets; no mutation).
//!
//! Everything shown comes from one `Projection` built per frame, plus the
//! notification channel and the live slider gestures.

mod constants;
mod overlay;
mod playlist;
mod widgets;

use iced::widget::{column, row};
use iced::{Element, Length};

use super::state::{Message, Projector};
use crate::core::projection::Projection;
use constants::{PREVIEW_W, TRANSPORT_H};

pub(crate) fn view(state: &Projector) -> Element<'_, Message> {
    let projection = Projection::build(&state.controller, state.config.name_width());

    let transport = widgets::transport_bar(state, &projection).height(Length::Fixed(TRANSPORT_H));
    let inputs = widgets::input_bar(state);
    let list = playlist::build_playlist(&projection).width(Length::Fill);

    let body = match overlay::thumbnail(state) {
        Some(preview) => row![list, preview.width(Length::Fixed(PREVIEW_W))],
        None => row![list],
    }
    .spacing(12)
    .height(Length::Fill);

    let mut page = column![transport, inputs, body].spacing(12).padding(12);
    if let Some(toast) = overlay::toast(state) {
        page = page.push(toast);
    }
    page.into()
}
