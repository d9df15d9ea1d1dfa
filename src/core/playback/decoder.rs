//! core/playback/decoder.rs
//! Symphonia demux + decode of a media file's audio track, as a rodio::Source.
//!
//! Seeking is done by reopening at an offset (`open_at_ms`); the source
//! itself only ever plays forward.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use rodio::Source;

use symphonia::core::audio::{SampleBuffer, SignalSpec};
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::Time;

use crate::core::error::{Error, Result};
use crate::core::probe::{audio_track, duration_from_params};

pub struct MediaSource {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    duration_ms: Option<u64>,

    sample_rate: u32,
    channels: u16,

    // Interleaved samples of the last decoded packet.
    out: Vec<f32>,
    out_pos: usize,

    ended: bool,
}

impl MediaSource {
    /// Open `path` and position the stream at `start_ms`.
    pub fn open_at_ms(path: &Path, start_ms: u64) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::Probe(e.to_string()))?;

        let mut format = probed.format;
        let track = audio_track(format.as_ref()).ok_or(Error::NoAudioTrack)?;
        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let duration_ms = duration_from_params(codec_params.time_base, codec_params.n_frames);

        if start_ms > 0 {
            let seek_to = SeekTo::Time {
                time: Time::from(Duration::from_millis(start_ms)),
                track_id: Some(track_id),
            };
            format
                .seek(SeekMode::Accurate, seek_to)
                .map_err(|e| Error::Decode(format!("seek to {start_ms} ms: {e}")))?;
        }

        // Built after the seek so it starts from a clean state.
        let decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| Error::Decode(e.to_string()))?;

        let mut source = Self {
            format,
            decoder,
            track_id,
            duration_ms,
            sample_rate: codec_params.sample_rate.unwrap_or(44_100),
            channels: codec_params
                .channels
                .map(|c| c.count() as u16)
                .unwrap_or(2),
            out: Vec::new(),
            out_pos: 0,
            ended: false,
        };

        // Prime once so sample_rate/channels are right before rodio asks.
        if let Err(e) = source.decode_next() {
            log::warn!("{}: {e}", path.display());
            source.ended = true;
        }

        Ok(source)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    fn decode_next(&mut self) -> Result<()> {
        self.out.clear();
        self.out_pos = 0;

        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return Ok(());
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(Error::Decode(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                // Corrupt packet; skip it.
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return Ok(());
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(Error::Decode(e.to_string())),
            };

            let spec = SignalSpec::new(decoded.spec().rate, decoded.spec().channels);
            self.sample_rate = spec.rate;
            self.channels = spec.channels.count() as u16;

            let mut samples = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            samples.copy_interleaved_ref(decoded);
            self.out.extend_from_slice(samples.samples());

            if !self.out.is_empty() {
                return Ok(());
            }
        }
    }
}

impl Iterator for MediaSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.out_pos >= self.out.len() {
            if self.ended {
                return None;
            }
            if self.decode_next().is_err() {
                self.ended = true;
                return None;
            }
        }

        let s = self.out[self.out_pos];
        self.out_pos += 1;
        Some(s)
    }
}

impl Source for MediaSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
