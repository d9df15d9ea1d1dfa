//! core/mod.rs
//!
//! Everything that isn't widgets:
//! - playlist + transport state and the controller that keeps them in sync
//! - the projection the GUI renders from
//! - toast / thumbnail lifecycles
//! - the playback engine thread and the IO helpers around it
//!
//! Nothing in here imports iced. The GUI feeds events in and reads
//! projections out.

pub mod error;
pub mod library;
pub mod notify;
pub mod playback;
pub mod playlist;
pub mod playlist_file;
pub mod probe;
pub mod projection;
pub mod sync;
pub mod thumbnail;
pub mod types;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use error::{Error, Result};

/// Discover media files under multiple roots.
///
/// - De-dupes across overlapping roots by full path
/// - Sorts paths once (core owns ordering, GUI shouldn't)
pub fn scan_paths(roots: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(256);
    let mut out: Vec<PathBuf> = Vec::new();

    for root in roots {
        for path in library::scan_media(root, extensions)? {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    out.sort();
    Ok(out)
}

/// Turn a user-supplied path into playable files.
///
/// - a file is taken as-is (any extension, like "Open File(s)")
/// - a folder is scanned recursively, filtered by `extensions`
pub fn expand_input(path: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        scan_paths(&[path.to_path_buf()], extensions)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(Error::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn exts() -> Vec<String> {
        vec!["mp4".into(), "mkv".into()]
    }

    #[test]
    fn scan_paths_dedupes_overlapping_roots_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("z.mp4"), b"").unwrap();
        fs::write(sub.join("a.mkv"), b"").unwrap();

        let found = scan_paths(&[dir.path().to_path_buf(), sub.clone()], &exts()).unwrap();
        assert_eq!(found, vec![sub.join("a.mkv"), dir.path().join("z.mp4")]);
    }

    #[test]
    fn expand_input_takes_single_files_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.ts");
        fs::write(&file, b"").unwrap();

        assert_eq!(expand_input(&file, &exts()).unwrap(), vec![file]);
    }

    #[test]
    fn expand_input_reports_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.mp4");
        assert!(matches!(
            expand_input(&missing, &exts()),
            Err(Error::NotFound(p)) if p == missing
        ));
    }
}
