//! core/playback/mod.rs
//! The media engine: command vocabulary, status events, and the thread that
//! runs them.
//!
//! The controller only ever sees [`CommandSink`]. [`PlaybackController`] is the
//! real implementation, backed by a channel into the engine thread.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

mod decoder;
mod engine;

pub use engine::PlaybackEngine;

use super::error::{Error, Result};

/// Fire-and-forget command channel into a media engine.
///
/// `Err` means the command was not delivered. Callers drop it; there is no retry.
pub trait CommandSink {
    fn send(&self, cmd: PlayerCommand) -> Result<()>;
}

#[derive(Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl CommandSink for PlaybackController {
    fn send(&self, cmd: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|_| Error::EngineDisconnected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    PlayAt { index: usize, path: PathBuf },
    Pause,
    Resume,
    SetPositionPercent(f32), // 0.0..=100.0
    SetVolumePercent(u8),    // 0..=100
    ClearPlaylist,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started {
        index: usize,
        path: PathBuf,
        duration_ms: Option<u64>,
    },
    Paused,
    Resumed,
    Stopped,
    /// Periodic push while something is loaded.
    Status {
        position_ms: u64,
        length_ms: u64,
        volume_percent: u8,
    },
    Ended,
    Error(String),
}

/// Spawns the playback thread and waits until it has an audio output.
///
/// Returns:
/// - PlaybackController (the command sink handed to the sync controller)
/// - Receiver<PlayerEvent> (drained by the GUI on each status tick)
pub fn start_playback(
    tick: Duration,
    initial_volume: u8,
) -> Result<(PlaybackController, Receiver<PlayerEvent>)> {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

    thread::Builder::new()
        .name("playback".into())
        .spawn(move || {
            // OutputStream isn't Send, so the engine is built on its own thread.
            let mut engine = match PlaybackEngine::new(event_tx, tick, initial_volume) {
                Ok(e) => e,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));

            engine.run(command_rx);
            log::info!("playback thread exiting");
        })
        .map_err(|e| Error::EngineInit(e.to_string()))?;

    ready_rx
        .recv()
        .map_err(|_| Error::EngineInit("playback thread died during startup".into()))??;

    Ok((PlaybackController { command_tx }, event_rx))
}
