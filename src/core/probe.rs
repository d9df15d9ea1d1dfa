//! core/probe.rs
//! Duration/size probing for freshly added playlist entries.
//!
//! Runs off the UI thread. Never fails hard: whatever can't be determined
//! comes back as 0, which the projection renders as "unknown".

use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::{FormatOptions, FormatReader, Track};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use super::error::{Error, Result};
use super::types::MediaInfo;

pub fn probe_media(path: &Path) -> MediaInfo {
    let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let duration_ms = match probe_duration_ms(path) {
        Ok(ms) => ms.unwrap_or(0),
        Err(e) => {
            log::debug!("probe {}: {e}", path.display());
            0
        }
    };

    MediaInfo {
        duration_ms,
        size_bytes,
    }
}

/// Duration of the default track, if the container says.
pub fn probe_duration_ms(path: &Path) -> Result<Option<u64>> {
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

    let track = audio_track(probed.format.as_ref()).ok_or(Error::NoAudioTrack)?;
    let params = &track.codec_params;

    Ok(duration_from_params(params.time_base, params.n_frames))
}

/// First track that carries decodable audio. Video tracks have no sample rate.
pub(crate) fn audio_track(format: &dyn FormatReader) -> Option<&Track> {
    format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
}

pub(crate) fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_needs_both_time_base_and_frames() {
        let tb = TimeBase::new(1, 44_100);
        assert_eq!(duration_from_params(Some(tb), Some(44_100 * 3)), Some(3000));
        assert_eq!(duration_from_params(Some(tb), None), None);
        assert_eq!(duration_from_params(None, Some(10)), None);
    }

    #[test]
    fn unreadable_media_probes_as_unknown_duration_but_real_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mp4");
        std::fs::write(&path, vec![0u8; 3000]).unwrap();

        let info = probe_media(&path);
        assert_eq!(info.duration_ms, 0);
        assert_eq!(info.size_bytes, 3000);
    }

    #[test]
    fn missing_file_probes_as_all_unknown() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(probe_media(&dir.path().join("gone.mkv")), MediaInfo::default());
    }
}
