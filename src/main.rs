//! Projector
//!
//! # What this program is
//! A small desktop media player (built with `iced`) around a playlist:
//! add files or folders, reorder them, play/pause/seek, adjust volume.
//!
//! # How it fits together
//! - `core::sync::SyncController` owns the playlist and transport state. It is
//!   the only thing that talks to the playback engine.
//! - The engine (`core::playback`) runs on its own thread and pushes status
//!   reports back over a channel.
//! - The GUI drains that channel on a timer, feeds user gestures in as typed
//!   events, and renders `core::projection::Projection`.
//!
//! # Concurrency model
//! - Folder scans, metadata probes, playlist files, and thumbnails run on
//!   worker threads and come back as `Message`s.
//! - All state changes happen on the GUI thread inside `update()`.

mod config;
mod core;
mod gui;

use std::path::PathBuf;

use config::Config;

fn main() -> iced::Result {
    let config = Config::load();
    init_logging(&config);

    // First CLI argument: a file or folder to add and play at startup.
    let startup = std::env::args_os().nth(1).map(PathBuf::from);
    if let Some(path) = &startup {
        log::info!("startup media: {}", path.display());
    }

    iced::application(
        move || gui::boot(config.clone(), startup.clone()),
        gui::update,
        gui::view,
    )
    .title("Projector")
    .subscription(gui::subscription)
    .run()
}

/// `RUST_LOG` wins; otherwise the configured level.
fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_env("RUST_LOG")
        .init();
}
