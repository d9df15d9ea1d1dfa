//! gui/subscription.rs
//! Drain engine events by emitting a periodic Tick message.

use iced::{Subscription, time};

use super::state::{Message, Projector};

pub(crate) fn subscription(state: &Projector) -> Subscription<Message> {
    if state.events.is_none() {
        return Subscription::none();
    }

    time::every(state.config.status_interval()).map(|_| Message::Tick)
}
