//! core/playlist.rs
//! Ordered playlist. Insertion order is playback order.
//!
//! Every index-taking operation treats an out-of-range index as a no-op:
//! indices go stale naturally while the UI and engine run concurrently.

use std::path::{Path, PathBuf};

use super::types::PlaylistEntry;

#[derive(Debug, Default, Clone)]
pub struct PlaylistStore {
    entries: Vec<PlaylistEntry>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the new entry (the old length).
    pub fn append(&mut self, entry: PlaylistEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn remove_at(&mut self, index: usize) -> Option<PlaylistEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Swap `index` with its predecessor. Returns whether anything moved.
    ///
    /// The whole entry travels, duration/size included.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap `index` with its successor. Returns whether anything moved.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fill in duration/size once probing finishes. Returns whether `index` existed.
    pub fn update_metadata(&mut self, index: usize, duration_ms: u64, size_bytes: u64) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        entry.duration_ms = duration_ms;
        entry.size_bytes = size_bytes;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    /// Current index of the first entry with this path.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.source_path == path)
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.position_of(path).is_some()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.source_path.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(names: &[&str]) -> PlaylistStore {
        let mut store = PlaylistStore::new();
        for name in names {
            store.append(PlaylistEntry::from_path(format!("/media/{name}")));
        }
        store
    }

    fn names(store: &PlaylistStore) -> Vec<&str> {
        store
            .entries()
            .iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }

    #[test]
    fn append_returns_old_length_and_allows_duplicates() {
        let mut store = PlaylistStore::new();
        assert_eq!(store.append(PlaylistEntry::from_path("/a.mp4")), 0);
        assert_eq!(store.append(PlaylistEntry::from_path("/a.mp4")), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_at_shifts_later_entries_down() {
        let mut store = store_of(&["a", "b", "c", "d"]);
        for i in 0..4 {
            let mut s = store.clone();
            let before = names(&store);
            let removed = s.remove_at(i).unwrap();

            assert_eq!(removed.display_name, before[i]);
            assert_eq!(s.len(), 3);
            for j in i..3 {
                assert_eq!(s.get(j).unwrap().display_name, before[j + 1]);
            }
        }

        assert!(store.remove_at(4).is_none());
        assert!(store.remove_at(usize::MAX).is_none());
        assert_eq!(names(&store), ["a", "b", "c", "d"]);
    }

    #[test]
    fn moves_at_boundaries_are_noops() {
        let mut store = store_of(&["a", "b", "c"]);
        assert!(!store.move_up(0));
        assert!(!store.move_down(2));
        assert!(!store.move_up(3));
        assert!(!store.move_down(17));
        assert_eq!(names(&store), ["a", "b", "c"]);

        let mut empty = PlaylistStore::new();
        assert!(!empty.move_down(0));
        assert!(!empty.move_up(0));
    }

    #[test]
    fn move_up_then_down_restores_order() {
        let mut store = store_of(&["a", "b", "c", "d"]);
        let original = store.paths();

        for i in 1..3 {
            assert!(store.move_up(i));
            assert!(store.move_down(i - 1));
            assert_eq!(store.paths(), original);
        }
    }

    #[test]
    fn moves_keep_metadata_with_the_entry() {
        let mut store = store_of(&["a", "b"]);
        store.update_metadata(0, 90_000, 4096);

        assert!(store.move_down(0));

        let moved = store.get(1).unwrap();
        assert_eq!(moved.display_name, "a");
        assert_eq!(moved.duration_ms, 90_000);
        assert_eq!(moved.size_bytes, 4096);
        assert_eq!(store.get(0).unwrap().duration_ms, 0);
    }

    #[test]
    fn abc_scenario() {
        let mut store = store_of(&["A", "B", "C"]);

        store.move_down(0);
        assert_eq!(names(&store), ["B", "A", "C"]);

        store.remove_at(2);
        assert_eq!(names(&store), ["B", "A"]);

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn update_metadata_ignores_stale_index() {
        let mut store = store_of(&["a"]);
        assert!(!store.update_metadata(1, 5, 5));
        assert!(store.update_metadata(0, 1000, 2048));
        assert_eq!(store.get(0).unwrap().duration_ms, 1000);
        assert_eq!(store.get(0).unwrap().size_bytes, 2048);
    }

    #[test]
    fn position_of_finds_current_index() {
        let mut store = store_of(&["a", "b", "c"]);
        store.move_up(2);
        assert_eq!(store.position_of(Path::new("/media/c")), Some(1));
        assert!(store.contains_path(Path::new("/media/a")));
        assert!(!store.contains_path(Path::new("/media/zzz")));
    }
}
