//! core/thumbnail.rs
//! One preview frame per request.
//!
//! `ffmpeg` on PATH grabs a frame at the requested time. Without it (or when
//! it fails) the file's embedded ID3 picture is used instead. Either way the
//! image lands in the temp dir and the path is returned.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use id3::Tag;
use id3::frame::Content;

use super::error::{Error, Result};

pub const FFMPEG_TIMEOUT: Duration = Duration::from_secs(8);

const POLL: Duration = Duration::from_millis(50);

/// `<temp>/thumb_<hash of path>_<ms>.jpg`
pub fn output_path(source: &Path, at_ms: u64) -> PathBuf {
    let mut h = DefaultHasher::new();
    source.hash(&mut h);
    std::env::temp_dir().join(format!("thumb_{:016x}_{at_ms}.jpg", h.finish()))
}

pub fn generate(source: &Path, at_ms: u64, timeout: Duration) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(Error::NotFound(source.to_path_buf()));
    }

    let out = output_path(source, at_ms);

    match extract_frame(source, at_ms, &out, timeout) {
        Ok(()) => return Ok(out),
        Err(e) => log::debug!("ffmpeg thumbnail for {}: {e}", source.display()),
    }

    let Some(picture) = embedded_picture(source) else {
        return Err(Error::Thumbnail(format!(
            "no frame or cover art for {}",
            source.display()
        )));
    };
    std::fs::write(&out, picture).map_err(|e| Error::io(&out, e))?;
    Ok(out)
}

fn extract_frame(source: &Path, at_ms: u64, out: &Path, timeout: Duration) -> Result<()> {
    let seconds = format!("{:.3}", at_ms as f64 / 1000.0);

    let mut child = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-ss", &seconds, "-i"])
        .arg(source)
        .args(["-frames:v", "1", "-q:v", "3"])
        .arg(out)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::Thumbnail("ffmpeg not found".into()),
            _ => Error::io("ffmpeg", e),
        })?;

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() && out.is_file() => return Ok(()),
            Ok(Some(status)) => {
                return Err(Error::Thumbnail(format!("ffmpeg exited with {status}")));
            }
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Thumbnail("ffmpeg timed out".into()));
            }
            Ok(None) => thread::sleep(POLL),
            Err(e) => return Err(Error::io("ffmpeg", e)),
        }
    }
}

/// First APIC/PIC frame, if the file carries an ID3 tag with one.
fn embedded_picture(path: &Path) -> Option<Vec<u8>> {
    let tag = Tag::read_from_path(path).ok()?;

    tag.frames()
        .filter(|f| f.id() == "APIC" || f.id() == "PIC")
        .find_map(|f| match f.content() {
            Content::Picture(p) => Some(p.data.clone()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_carries_path_hash_and_time() {
        let a = output_path(Path::new("/media/a.mp4"), 1500);
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("thumb_"));
        assert!(name.ends_with("_1500.jpg"));
        assert_eq!(a.parent(), Some(std::env::temp_dir().as_path()));

        assert_eq!(a, output_path(Path::new("/media/a.mp4"), 1500));
        assert_ne!(a, output_path(Path::new("/media/b.mp4"), 1500));
        assert_ne!(a, output_path(Path::new("/media/a.mp4"), 1501));
    }

    #[test]
    fn missing_source_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone.mp4");
        assert!(matches!(
            generate(&gone, 0, FFMPEG_TIMEOUT),
            Err(Error::NotFound(p)) if p == gone
        ));
    }

    #[test]
    fn untagged_file_has_no_embedded_picture() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.mp3");
        std::fs::write(&file, b"not really audio").unwrap();
        assert_eq!(embedded_picture(&file), None);
    }

    #[test]
    fn embedded_cover_art_is_found() {
        use id3::TagLike;
        use id3::frame::{Picture, PictureType};

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tagged.mp3");
        std::fs::write(&file, b"").unwrap();

        let mut tag = Tag::new();
        let _ = tag.add_frame(Picture {
            mime_type: "image/jpeg".into(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        });
        tag.write_to_path(&file, id3::Version::Id3v24).unwrap();

        assert_eq!(embedded_picture(&file), Some(vec![0xFF, 0xD8, 0xFF, 0xD9]));
    }
}
