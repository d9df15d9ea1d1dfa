//! core/library.rs
//! Recursive media discovery.

use std::path::{Path, PathBuf};

use super::error::{Error, Result};

/// Extensions picked up by folder scans when config doesn't say otherwise.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];

pub fn scan_media(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_dir(root, extensions, &mut out)?;
    Ok(out)
}

fn walk_dir(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        // Symlinks are not followed, so link cycles can't recurse forever.
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

        if file_type.is_dir() {
            walk_dir(&path, extensions, out)?;
        } else if has_media_extension(&path, extensions) {
            out.push(path);
        }
    }

    Ok(())
}

pub fn has_media_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
