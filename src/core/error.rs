//! core/error.rs
//! Error type shared by the core modules.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Format probe failed: {0}")]
    Probe(String),

    #[error("No supported audio track found")]
    NoAudioTrack,

    #[error("Decode failed: {0}")]
    Decode(String),

    #[error("Playlist file: {0}")]
    PlaylistFile(#[from] serde_json::Error),

    #[error("Playback engine failed to start: {0}")]
    EngineInit(String),

    #[error("No playback engine")]
    EngineUnavailable,

    #[error("Playback engine is gone")]
    EngineDisconnected,

    #[error("Thumbnail: {0}")]
    Thumbnail(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
