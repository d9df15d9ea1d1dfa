//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per loaded file)
//! - command loop + periodic status ticks
//!
//! Emits PlayerEvent back via a channel.
//! No iced imports.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::decoder::MediaSource;
use super::{PlayerCommand, PlayerEvent};
use crate::core::error::{Error, Result};

/// What the engine has loaded right now.
struct Loaded {
    index: usize,
    path: PathBuf,
    duration_ms: Option<u64>,
    // Position the current source was opened at; sink.get_pos() counts from here.
    base_ms: u64,
}

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    sink: Option<Sink>,
    loaded: Option<Loaded>,
    volume: f32, // 0.0..=1.0, survives track changes

    tick: Duration,
    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>, tick: Duration, initial_volume: u8) -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::EngineInit(e.to_string()))?;

        log::info!("audio output ready (status every {} ms)", tick.as_millis());

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            volume: percent_to_gain(initial_volume),
            tick,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        loop {
            match command_rx.recv_timeout(self.tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Returns true when the loop should exit.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        log::debug!("engine <- {cmd:?}");

        match cmd {
            PlayerCommand::PlayAt { index, path } => {
                if let Err(e) = self.play(index, path) {
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.emit(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::SetPositionPercent(percent) => {
                if let Err(e) = self.seek_percent(percent) {
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::SetVolumePercent(v) => {
                self.volume = percent_to_gain(v);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::ClearPlaylist => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let (Some(sink), Some(loaded)) = (&self.sink, &self.loaded) else {
            return;
        };

        let length_ms = loaded.duration_ms.unwrap_or(0);
        let mut position_ms = loaded.base_ms + sink.get_pos().as_millis() as u64;
        if length_ms > 0 {
            position_ms = position_ms.min(length_ms);
        }

        self.emit(PlayerEvent::Status {
            position_ms,
            length_ms,
            volume_percent: gain_to_percent(self.volume),
        });

        if sink.empty() {
            self.emit(PlayerEvent::Ended);
            self.stop_internal();
        }
    }

    fn play(&mut self, index: usize, path: PathBuf) -> Result<()> {
        self.stop_internal();

        let source = MediaSource::open_at_ms(&path, 0)?;
        let duration_ms = source.duration_ms();

        self.start_sink(source, false);
        self.loaded = Some(Loaded {
            index,
            path: path.clone(),
            duration_ms,
            base_ms: 0,
        });

        log::info!("playing #{index}: {}", path.display());
        self.emit(PlayerEvent::Started {
            index,
            path,
            duration_ms,
        });

        Ok(())
    }

    /// Reopen the loaded file at `percent` of its length, keeping pause state.
    fn seek_percent(&mut self, percent: f32) -> Result<()> {
        let Some(loaded) = &self.loaded else {
            return Ok(());
        };
        let Some(duration_ms) = loaded.duration_ms.filter(|d| *d > 0) else {
            return Err(Error::Decode("cannot seek: length unknown".into()));
        };

        let ratio = (percent.clamp(0.0, 100.0) as f64) / 100.0;
        let mut target_ms = (ratio * duration_ms as f64).round() as u64;
        // Seeking to *exactly* the end tends to produce EOF weirdness; clamp slightly.
        if target_ms >= duration_ms {
            target_ms = duration_ms.saturating_sub(1);
        }

        let source = MediaSource::open_at_ms(&loaded.path, target_ms)?;
        let paused = self.sink.as_ref().map(Sink::is_paused).unwrap_or(false);

        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.start_sink(source, paused);
        if let Some(loaded) = &mut self.loaded {
            loaded.base_ms = target_ms;
            log::debug!("seek #{} -> {target_ms} ms", loaded.index);
        }

        Ok(())
    }

    fn start_sink(&mut self, source: MediaSource, paused: bool) {
        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        if paused {
            sink.pause();
        }
        sink.append(source);
        self.sink = Some(sink);
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.loaded = None;
    }
}

fn percent_to_gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

fn gain_to_percent(gain: f32) -> u8 {
    (gain.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_percent_gain_conversions_round_trip() {
        for p in [0u8, 1, 33, 50, 99, 100] {
            assert_eq!(gain_to_percent(percent_to_gain(p)), p);
        }
        assert_eq!(percent_to_gain(250), 1.0);
        assert_eq!(gain_to_percent(1.7), 100);
    }
}
