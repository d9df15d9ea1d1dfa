//! core/playlist_file.rs
//! Save/load a playlist as a pretty-printed JSON array of path strings.

use std::path::{Path, PathBuf};

use super::error::{Error, Result};

pub fn save(path: &Path, entries: &[PathBuf]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json).map_err(|e| Error::io(path, e))
}

/// Paths in file order. Existence is checked later, when they're added.
pub fn load(path: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_file_is_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("list.json");
        let entries = vec![PathBuf::from("/m/a.mp4"), PathBuf::from("/m/b c.mkv")];

        save(&file, &entries).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!(["/m/a.mp4", "/m/b c.mkv"]));
        assert_eq!(load(&file).unwrap(), entries);
    }

    #[test]
    fn non_array_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("list.json");
        std::fs::write(&file, r#"{"not": "a list"}"#).unwrap();

        assert!(matches!(load(&file), Err(Error::PlaylistFile(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("nope.json")),
            Err(Error::Io { .. })
        ));
    }
}
