//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs are plain bags of data
//! - No GUI code, no filesystem code
//!
//! 'PlaylistEntry' is ONE media file queued for playback.

use std::path::{Path, PathBuf};

/// One row of the playlist.
///
/// Identity is positional: an entry is addressed by its index in the
/// playlist, and that index is only valid until the next mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// File name shown in the list (basename of `source_path`).
    pub display_name: String,

    /// Full path on disk, handed to the engine.
    pub source_path: PathBuf,

    /// 0 = not known yet.
    pub duration_ms: u64,

    /// 0 = not known yet.
    pub size_bytes: u64,
}

impl PlaylistEntry {
    /// New entry with unknown duration/size.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let source_path = path.into();
        Self {
            display_name: display_name_of(&source_path),
            source_path,
            duration_ms: 0,
            size_bytes: 0,
        }
    }
}

/// Result of probing a media file. Zeros mean "couldn't tell".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaInfo {
    pub duration_ms: u64,
    pub size_bytes: u64,
}

/// Basename of a path, falling back to the full path for odd inputs.
pub fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_from_path_uses_basename_and_unknown_metadata() {
        let e = PlaylistEntry::from_path("/videos/holiday/beach.mp4");
        assert_eq!(e.display_name, "beach.mp4");
        assert_eq!(e.source_path, PathBuf::from("/videos/holiday/beach.mp4"));
        assert_eq!(e.duration_ms, 0);
        assert_eq!(e.size_bytes, 0);
    }

    #[test]
    fn display_name_falls_back_to_whole_path() {
        assert_eq!(display_name_of(Path::new("/")), "/");
    }
}
