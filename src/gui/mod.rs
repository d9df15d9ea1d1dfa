//! gui/mod.rs
//!
//! The iced shell around `core`:
//! - `state`: `Projector` + `Message`, and `boot`
//! - `update`: routes each message to a handler, mostly `SyncController::dispatch`
//! - `view`: draws a `Projection` plus toast/preview
//! - `subscription`: the status tick that drains engine events
//!
//! No playlist or transport rules live here.

pub(crate) mod state;
pub(crate) mod subscription;
pub(crate) mod update;
pub(crate) mod view;

pub(crate) use state::boot;
pub(crate) use subscription::subscription;
pub(crate) use update::update;
pub(crate) use view::view;
