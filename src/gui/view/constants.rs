//! View constants (layout/sizing).

pub(crate) const TRANSPORT_H: f32 = 96.0;
pub(crate) const PREVIEW_W: f32 = 320.0;

pub(crate) const VOLUME_W: f32 = 140.0;
pub(crate) const TIME_W: f32 = 130.0;

// list sizing
pub(crate) const HEADER_TEXT: f32 = 14.0;
pub(crate) const ROW_TEXT: f32 = 14.0;

pub(crate) const ROW_H: f32 = 30.0;
pub(crate) const ROW_VPAD: f32 = 2.0;
pub(crate) const ROW_HPAD: f32 = 8.0;
pub(crate) const LIST_SPACING: f32 = 1.0;

pub(crate) const MARKER_W: f32 = 24.0;
pub(crate) const NAME_W: f32 = 320.0;
pub(crate) const DURATION_W: f32 = 80.0;
pub(crate) const SIZE_W: f32 = 100.0;
