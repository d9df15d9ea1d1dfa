//! core/sync/mod.rs
//! Playback/playlist synchronization controller.
//!
//! Single writer for the playlist and transport state. Two kinds of input
//! arrive here, both on the GUI thread:
//! - user gestures (typed [`ControlEvent`]s)
//! - engine events, drained from the engine channel on each status tick
//!
//! Scrub state machine:
//!
//! ```text
//! Idle --ScrubStart--> Scrubbing --ScrubMove(v)--> Scrubbing --ScrubEnd(v)--> Idle
//!                          |                                     |
//!                   status reports dropped          one SetPositionPercent(v)
//! ```
//!
//! Engine-bound commands are never applied optimistically. Only gesture
//! previews are local.

mod transport;

use std::path::{Path, PathBuf};

pub use transport::TransportState;

use super::error::Error;
use super::playback::{CommandSink, PlayerCommand, PlayerEvent};
use super::playlist::PlaylistStore;
use super::types::{MediaInfo, PlaylistEntry};

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    ScrubStart,
    ScrubMove(f32),
    ScrubEnd(f32),
    VolumeDrag(u8),
    VolumeRelease(u8),

    PlayAt(usize),
    TogglePlay,
    SeekBy(i64),
    StepVolume(i16),

    RemoveAt(usize),
    MoveUp(usize),
    MoveDown(usize),
    ClearPlaylist,

    Engine(PlayerEvent),
}

/// Something the shell may want to tell the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Playing(String),
    EngineError(String),
    CommandDropped(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeGesture {
    Idle,
    Dragging(u8),
    /// Released and sent; shown until the engine reports it back.
    Pending { value: u8, reports: u8 },
}

// A release stays on screen for at most this many reports, matched or not.
const PENDING_VOLUME_REPORTS: u8 = 2;

pub struct SyncController {
    playlist: PlaylistStore,
    transport: TransportState,
    engine: Option<Box<dyn CommandSink>>,

    // Committed position at scrub start, restored if the seek can't be sent.
    scrub_origin_ms: Option<u64>,
    volume: VolumeGesture,
    // Engine has media loaded (started and not yet stopped/ended).
    engine_loaded: bool,
}

impl SyncController {
    pub fn new(engine: Option<Box<dyn CommandSink>>, initial_volume: u8) -> Self {
        if engine.is_none() {
            log::warn!("no playback engine; player commands will be dropped");
        }

        Self {
            playlist: PlaylistStore::new(),
            transport: TransportState::new(initial_volume),
            engine,
            scrub_origin_ms: None,
            volume: VolumeGesture::Idle,
            engine_loaded: false,
        }
    }

    pub fn playlist(&self) -> &PlaylistStore {
        &self.playlist
    }

    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.transport.user_is_scrubbing
    }

    pub fn is_dragging_volume(&self) -> bool {
        matches!(self.volume, VolumeGesture::Dragging(_))
    }

    /// Volume the UI should show: gesture value if one is live, else the engine's.
    pub fn displayed_volume(&self) -> u8 {
        match self.volume {
            VolumeGesture::Dragging(v) | VolumeGesture::Pending { value: v, .. } => v,
            VolumeGesture::Idle => self.transport.volume_percent,
        }
    }

    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.transport
            .current_index
            .and_then(|i| self.playlist.get(i))
    }

    pub fn dispatch(&mut self, event: ControlEvent) -> Option<Notice> {
        log::debug!("sync <- {event:?}");

        match event {
            ControlEvent::ScrubStart => self.scrub_start(),
            ControlEvent::ScrubMove(v) => self.scrub_move(v),
            ControlEvent::ScrubEnd(v) => return self.scrub_end(v),
            ControlEvent::VolumeDrag(v) => self.volume_drag(v),
            ControlEvent::VolumeRelease(v) => return self.volume_release(v),

            ControlEvent::PlayAt(i) => return self.play_at(i),
            ControlEvent::TogglePlay => return self.toggle_play(),
            ControlEvent::SeekBy(delta) => return self.seek_by(delta),
            ControlEvent::StepVolume(delta) => return self.step_volume(delta),

            ControlEvent::RemoveAt(i) => self.remove_at(i),
            ControlEvent::MoveUp(i) => self.move_up(i),
            ControlEvent::MoveDown(i) => self.move_down(i),
            ControlEvent::ClearPlaylist => return self.clear_playlist(),

            ControlEvent::Engine(ev) => return self.on_engine_event(ev),
        }

        None
    }

    /// Deliver a command, or log and drop it.
    fn send(&self, cmd: PlayerCommand) -> Result<(), Notice> {
        let Some(engine) = &self.engine else {
            log::warn!("dropped {cmd:?}: no playback engine");
            return Err(Notice::CommandDropped(Error::EngineUnavailable.to_string()));
        };

        engine.send(cmd.clone()).map_err(|e| {
            log::warn!("dropped {cmd:?}: {e}");
            Notice::CommandDropped(e.to_string())
        })
    }

    // Scrub

    pub fn scrub_start(&mut self) {
        if self.transport.user_is_scrubbing {
            return;
        }
        self.transport.user_is_scrubbing = true;
        self.scrub_origin_ms = Some(self.transport.position_ms);
    }

    /// Local preview only; nothing is sent.
    pub fn scrub_move(&mut self, percent: f32) {
        if !self.transport.user_is_scrubbing {
            log::debug!("scrub move without scrub start ignored");
            return;
        }
        self.transport.position_ms = self.transport.position_at_percent(percent);
    }

    /// Ends the gesture and sends the one seek it produces.
    pub fn scrub_end(&mut self, percent: f32) -> Option<Notice> {
        if !self.transport.user_is_scrubbing {
            return None;
        }

        let percent = percent.clamp(0.0, 100.0);
        self.transport.user_is_scrubbing = false;
        self.transport.position_ms = self.transport.position_at_percent(percent);
        let origin = self.scrub_origin_ms.take();

        match self.send(PlayerCommand::SetPositionPercent(percent)) {
            Ok(()) => None,
            Err(notice) => {
                if let Some(origin) = origin {
                    self.transport.position_ms = origin;
                }
                Some(notice)
            }
        }
    }

    // Volume

    pub fn volume_drag(&mut self, percent: u8) {
        self.volume = VolumeGesture::Dragging(percent.min(100));
    }

    pub fn volume_release(&mut self, percent: u8) -> Option<Notice> {
        let value = percent.min(100);
        self.volume = VolumeGesture::Idle;
        self.request_volume(value)
    }

    pub fn step_volume(&mut self, delta: i16) -> Option<Notice> {
        if self.is_dragging_volume() {
            return None;
        }
        let value = (i16::from(self.displayed_volume()) + delta).clamp(0, 100) as u8;
        self.request_volume(value)
    }

    fn request_volume(&mut self, value: u8) -> Option<Notice> {
        match self.send(PlayerCommand::SetVolumePercent(value)) {
            Ok(()) => {
                self.volume = VolumeGesture::Pending { value, reports: 0 };
                None
            }
            Err(notice) => Some(notice),
        }
    }

    // Transport

    pub fn play_at(&mut self, index: usize) -> Option<Notice> {
        let entry = self.playlist.get(index)?;
        let (name, path) = (entry.display_name.clone(), entry.source_path.clone());

        match self.send(PlayerCommand::PlayAt { index, path }) {
            Ok(()) => {
                self.transport.current_index = Some(index);
                if !self.transport.user_is_scrubbing {
                    self.transport.position_ms = 0;
                }
                Some(Notice::Playing(name))
            }
            Err(notice) => Some(notice),
        }
    }

    /// Pause/resume what the engine has loaded, or (re)start the current entry.
    ///
    /// Loaded media is paused even if its entry has since left the playlist.
    pub fn toggle_play(&mut self) -> Option<Notice> {
        if !self.engine_loaded {
            let index = match self.transport.current_index {
                Some(i) if i < self.playlist.len() => i,
                _ => 0,
            };
            return self.play_at(index);
        }

        let cmd = if self.transport.is_playing {
            PlayerCommand::Pause
        } else {
            PlayerCommand::Resume
        };
        self.send(cmd).err()
    }

    /// Relative seek, clamped to `[0, length - 100ms]`.
    pub fn seek_by(&mut self, delta_ms: i64) -> Option<Notice> {
        let duration = self.transport.duration_ms;
        if self.transport.user_is_scrubbing || duration == 0 || self.current_entry().is_none() {
            return None;
        }

        let max = duration.saturating_sub(100) as i64;
        let target = (self.transport.position_ms as i64 + delta_ms).clamp(0, max);
        let percent = (target as f64 * 100.0 / duration as f64) as f32;

        self.send(PlayerCommand::SetPositionPercent(percent)).err()
    }

    // Playlist

    /// Add files that exist and aren't queued yet. Returns what still needs probing.
    pub fn add_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Vec<(usize, PathBuf)> {
        let mut added = Vec::new();

        for path in paths {
            if !path.exists() {
                log::debug!("skipping missing {}", path.display());
                continue;
            }
            if self.playlist.contains_path(&path) {
                continue;
            }
            let index = self.playlist.append(PlaylistEntry::from_path(path.clone()));
            added.push((index, path));
        }

        added
    }

    /// Probe result for an entry added earlier.
    ///
    /// `index` may be stale by now; the entry is re-resolved by path.
    pub fn on_metadata_resolved(&mut self, index: usize, path: &Path, info: MediaInfo) -> bool {
        let resolved = match self.playlist.get(index) {
            Some(e) if e.source_path == path => Some(index),
            _ => self.playlist.position_of(path),
        };

        match resolved {
            Some(i) => self.playlist.update_metadata(i, info.duration_ms, info.size_bytes),
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) {
        if self.playlist.remove_at(index).is_none() {
            return;
        }
        self.transport.current_index = match self.transport.current_index {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
    }

    pub fn move_up(&mut self, index: usize) {
        if self.playlist.move_up(index) {
            self.follow_swap(index - 1, index);
        }
    }

    pub fn move_down(&mut self, index: usize) {
        if self.playlist.move_down(index) {
            self.follow_swap(index, index + 1);
        }
    }

    fn follow_swap(&mut self, a: usize, b: usize) {
        self.transport.current_index = match self.transport.current_index {
            Some(c) if c == a => Some(b),
            Some(c) if c == b => Some(a),
            other => other,
        };
    }

    /// Empties the playlist and asks the engine to stop.
    pub fn clear_playlist(&mut self) -> Option<Notice> {
        self.playlist.clear();
        self.transport.current_index = None;
        self.send(PlayerCommand::ClearPlaylist).err()
    }

    // Engine events

    pub fn on_engine_event(&mut self, event: PlayerEvent) -> Option<Notice> {
        match event {
            PlayerEvent::Status {
                position_ms,
                length_ms,
                volume_percent,
            } => {
                self.on_status(position_ms, length_ms, volume_percent);
                None
            }
            PlayerEvent::Started {
                index,
                path,
                duration_ms,
            } => {
                log::info!("engine started #{index}: {}", path.display());
                self.on_engine_started(duration_ms);
                None
            }
            PlayerEvent::Paused => {
                self.transport.is_playing = false;
                None
            }
            PlayerEvent::Resumed => {
                self.transport.is_playing = true;
                None
            }
            PlayerEvent::Stopped => {
                self.on_engine_stopped();
                None
            }
            PlayerEvent::Ended => self.on_media_ended(),
            PlayerEvent::Error(msg) => {
                log::warn!("engine error: {msg}");
                Some(Notice::EngineError(msg))
            }
        }
    }

    /// The engine began playing. Unknown length falls back to the probed one.
    pub fn on_engine_started(&mut self, duration_ms: Option<u64>) {
        self.engine_loaded = true;
        self.transport.is_playing = true;

        let known = self.current_entry().map(|e| e.duration_ms).unwrap_or(0);
        if !self.transport.user_is_scrubbing {
            self.transport.position_ms = 0;
            self.transport.duration_ms = duration_ms.unwrap_or(known);
        }
    }

    pub fn on_engine_stopped(&mut self) {
        self.engine_loaded = false;
        self.transport.is_playing = false;
        if !self.transport.user_is_scrubbing {
            self.transport.reset_position();
        }
    }

    /// Periodic engine report. Dropped whole while a scrub is in progress.
    pub fn on_status(&mut self, position_ms: u64, length_ms: u64, volume_percent: u8) {
        if self.transport.user_is_scrubbing {
            return;
        }

        // Engines that can't tell the length report 0; keep the probed one.
        let length_ms = match length_ms {
            0 => self.current_entry().map(|e| e.duration_ms).unwrap_or(0),
            known => known,
        };
        self.transport
            .apply_status(position_ms, length_ms, volume_percent);

        if let VolumeGesture::Pending { value, reports } = self.volume {
            let reports = reports + 1;
            self.volume = if value == self.transport.volume_percent
                || reports >= PENDING_VOLUME_REPORTS
            {
                VolumeGesture::Idle
            } else {
                VolumeGesture::Pending { value, reports }
            };
        }
    }

    /// Advance to the next entry, if there is one.
    pub fn on_media_ended(&mut self) -> Option<Notice> {
        self.engine_loaded = false;
        self.transport.is_playing = false;
        if !self.transport.user_is_scrubbing {
            self.transport.position_ms = 0;
        }

        let next = self.transport.current_index.map(|i| i + 1)?;
        if next < self.playlist.len() {
            self.play_at(next)
        } else {
            None
        }
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        if let Some(engine) = &self.engine {
            let _ = engine.send(PlayerCommand::Shutdown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Records every command; can be told to reject them.
    #[derive(Clone, Default)]
    struct Recorder {
        sent: Rc<RefCell<Vec<PlayerCommand>>>,
        reject: Rc<Cell<bool>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<PlayerCommand> {
            std::mem::take(&mut *self.sent.borrow_mut())
        }
    }

    impl CommandSink for Recorder {
        fn send(&self, cmd: PlayerCommand) -> Result<()> {
            if self.reject.get() {
                return Err(Error::EngineDisconnected);
            }
            self.sent.borrow_mut().push(cmd);
            Ok(())
        }
    }

    fn controller() -> (SyncController, Recorder) {
        let rec = Recorder::default();
        (SyncController::new(Some(Box::new(rec.clone())), 100), rec)
    }

    fn with_files(ctl: &mut SyncController, names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = names
            .iter()
            .map(|n| {
                let p = dir.path().join(n);
                std::fs::write(&p, b"").unwrap();
                p
            })
            .collect();
        ctl.add_files(paths);
        dir
    }

    fn status(pos: u64, len: u64, vol: u8) -> ControlEvent {
        ControlEvent::Engine(PlayerEvent::Status {
            position_ms: pos,
            length_ms: len,
            volume_percent: vol,
        })
    }

    #[test]
    fn idle_status_overwrites_transport() {
        let (mut ctl, rec) = controller();
        ctl.dispatch(status(50_000, 200_000, 80));

        let t = ctl.transport();
        assert_eq!((t.position_ms, t.duration_ms, t.volume_percent), (50_000, 200_000, 80));
        assert!(rec.take().is_empty());
    }

    #[test]
    fn status_reports_never_clobber_a_scrub() {
        let (mut ctl, rec) = controller();
        ctl.dispatch(status(10_000, 100_000, 100));

        ctl.dispatch(ControlEvent::ScrubStart);
        ctl.dispatch(ControlEvent::ScrubMove(40.0));
        assert_eq!(ctl.transport().position_ms, 40_000);

        for pos in [11_000, 12_000, 13_000] {
            ctl.dispatch(status(pos, 100_000, 55));
            assert_eq!(ctl.transport().position_ms, 40_000);
        }
        // Dropped whole, volume included.
        assert_eq!(ctl.transport().volume_percent, 100);

        ctl.dispatch(ControlEvent::ScrubMove(60.0));
        assert_eq!(ctl.transport().position_ms, 60_000);
        assert!(rec.take().is_empty(), "no seeks while dragging");

        ctl.dispatch(ControlEvent::ScrubEnd(75.0));
        assert!(!ctl.is_scrubbing());
        assert_eq!(rec.take(), vec![PlayerCommand::SetPositionPercent(75.0)]);

        ctl.dispatch(status(75_500, 100_000, 100));
        assert_eq!(ctl.transport().position_ms, 75_500);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn scrub_end_without_start_sends_nothing() {
        let (mut ctl, rec) = controller();
        ctl.dispatch(ControlEvent::ScrubMove(50.0));
        ctl.dispatch(ControlEvent::ScrubEnd(50.0));
        assert!(rec.take().is_empty());
        assert_eq!(ctl.transport().position_ms, 0);
    }

    #[test]
    fn second_scrub_start_keeps_original_origin() {
        let (mut ctl, rec) = controller();
        ctl.dispatch(status(30_000, 100_000, 100));
        ctl.dispatch(ControlEvent::ScrubStart);
        ctl.dispatch(ControlEvent::ScrubMove(90.0));
        ctl.dispatch(ControlEvent::ScrubStart);

        rec.reject.set(true);
        ctl.dispatch(ControlEvent::ScrubEnd(90.0));
        assert_eq!(ctl.transport().position_ms, 30_000);
    }

    #[test]
    fn rejected_seek_restores_committed_position() {
        let (mut ctl, rec) = controller();
        ctl.dispatch(status(20_000, 100_000, 100));
        rec.reject.set(true);

        ctl.dispatch(ControlEvent::ScrubStart);
        ctl.dispatch(ControlEvent::ScrubMove(80.0));
        let notice = ctl.dispatch(ControlEvent::ScrubEnd(80.0));

        assert!(matches!(notice, Some(Notice::CommandDropped(_))));
        assert!(!ctl.is_scrubbing());
        assert_eq!(ctl.transport().position_ms, 20_000);
    }

    #[test]
    fn missing_engine_drops_commands_without_state_change() {
        let mut ctl = SyncController::new(None, 70);
        let _dir = with_files(&mut ctl, &["a.mp4"]);

        assert!(!ctl.has_engine());
        assert!(matches!(
            ctl.dispatch(ControlEvent::PlayAt(0)),
            Some(Notice::CommandDropped(_))
        ));
        assert_eq!(ctl.transport().current_index, None);

        ctl.dispatch(ControlEvent::VolumeRelease(20));
        assert_eq!(ctl.displayed_volume(), 70);
    }

    #[test]
    fn volume_drag_is_local_and_release_sends_once() {
        let (mut ctl, rec) = controller();
        for v in [90, 70, 50, 30] {
            ctl.dispatch(ControlEvent::VolumeDrag(v));
            assert_eq!(ctl.displayed_volume(), v);
        }
        assert!(rec.take().is_empty());

        // Engine still reports the old value mid-drag; the drag wins on screen.
        ctl.dispatch(status(0, 0, 100));
        assert_eq!(ctl.displayed_volume(), 30);

        ctl.dispatch(ControlEvent::VolumeRelease(30));
        assert_eq!(rec.take(), vec![PlayerCommand::SetVolumePercent(30)]);
        assert_eq!(ctl.displayed_volume(), 30);

        ctl.dispatch(status(0, 0, 30));
        assert!(!ctl.is_dragging_volume());
        assert_eq!(ctl.displayed_volume(), 30);
    }

    #[test]
    fn pending_volume_gives_way_to_engine_after_two_reports() {
        let (mut ctl, _rec) = controller();
        ctl.dispatch(ControlEvent::VolumeRelease(40));

        ctl.dispatch(status(0, 0, 100));
        assert_eq!(ctl.displayed_volume(), 40);
        ctl.dispatch(status(0, 0, 100));
        assert_eq!(ctl.displayed_volume(), 100);
    }

    #[test]
    fn step_volume_clamps() {
        let (mut ctl, rec) = controller();
        ctl.dispatch(ControlEvent::StepVolume(10));
        ctl.dispatch(status(0, 0, 100));
        ctl.dispatch(ControlEvent::StepVolume(-250));
        assert_eq!(
            rec.take(),
            vec![
                PlayerCommand::SetVolumePercent(100),
                PlayerCommand::SetVolumePercent(0)
            ]
        );
    }

    #[test]
    fn play_at_sends_path_and_tracks_current() {
        let (mut ctl, rec) = controller();
        let dir = with_files(&mut ctl, &["a.mp4", "b.mp4"]);

        let notice = ctl.dispatch(ControlEvent::PlayAt(1));
        assert_eq!(notice, Some(Notice::Playing("b.mp4".into())));
        assert_eq!(
            rec.take(),
            vec![PlayerCommand::PlayAt {
                index: 1,
                path: dir.path().join("b.mp4")
            }]
        );
        assert_eq!(ctl.transport().current_index, Some(1));

        assert_eq!(ctl.dispatch(ControlEvent::PlayAt(7)), None);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn toggle_play_starts_first_entry_then_pauses_and_resumes() {
        let (mut ctl, rec) = controller();
        let dir = with_files(&mut ctl, &["a.mp4"]);

        ctl.dispatch(ControlEvent::TogglePlay);
        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Started {
            index: 0,
            path: dir.path().join("a.mp4"),
            duration_ms: Some(60_000),
        }));
        assert!(ctl.transport().is_playing);
        assert_eq!(ctl.transport().duration_ms, 60_000);

        ctl.dispatch(ControlEvent::TogglePlay);
        // Not applied until the engine confirms.
        assert!(ctl.transport().is_playing);
        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Paused));
        ctl.dispatch(ControlEvent::TogglePlay);

        let sent = rec.take();
        assert!(matches!(sent[0], PlayerCommand::PlayAt { index: 0, .. }));
        assert_eq!(sent[1..], [PlayerCommand::Pause, PlayerCommand::Resume]);
    }

    #[test]
    fn toggle_pauses_media_whose_entry_was_removed() {
        let (mut ctl, rec) = controller();
        let dir = with_files(&mut ctl, &["a.mp4", "b.mp4"]);
        ctl.dispatch(ControlEvent::PlayAt(1));
        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Started {
            index: 1,
            path: dir.path().join("b.mp4"),
            duration_ms: Some(30_000),
        }));
        ctl.dispatch(ControlEvent::RemoveAt(1));
        assert_eq!(ctl.transport().current_index, None);
        rec.take();

        ctl.dispatch(ControlEvent::TogglePlay);
        assert_eq!(rec.take(), vec![PlayerCommand::Pause]);
    }

    #[test]
    fn toggle_after_the_last_entry_ended_restarts_it() {
        let (mut ctl, rec) = controller();
        let dir = with_files(&mut ctl, &["a.mp4", "b.mp4"]);
        ctl.dispatch(ControlEvent::PlayAt(1));
        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Started {
            index: 1,
            path: dir.path().join("b.mp4"),
            duration_ms: Some(1_000),
        }));
        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Ended));
        rec.take();

        ctl.dispatch(ControlEvent::TogglePlay);
        assert!(matches!(rec.take()[..], [PlayerCommand::PlayAt { index: 1, .. }]));
    }

    #[test]
    fn play_at_resets_the_shown_position() {
        let (mut ctl, _rec) = controller();
        let _dir = with_files(&mut ctl, &["a.mp4", "b.mp4"]);
        ctl.dispatch(status(40_000, 90_000, 100));

        ctl.dispatch(ControlEvent::PlayAt(1));
        assert_eq!(ctl.transport().position_ms, 0);
    }

    #[test]
    fn started_without_length_falls_back_to_probed_duration() {
        let (mut ctl, _rec) = controller();
        let dir = with_files(&mut ctl, &["a.mkv"]);
        let path = dir.path().join("a.mkv");
        ctl.on_metadata_resolved(0, &path, MediaInfo { duration_ms: 42_000, size_bytes: 9 });

        ctl.dispatch(ControlEvent::PlayAt(0));
        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Started {
            index: 0,
            path,
            duration_ms: None,
        }));
        assert_eq!(ctl.transport().duration_ms, 42_000);

        // Later reports without a length keep it too.
        ctl.dispatch(status(5_000, 0, 100));
        assert_eq!(ctl.transport().duration_ms, 42_000);
        assert_eq!(ctl.transport().position_ms, 5_000);
    }

    #[test]
    fn seek_by_clamps_inside_the_media() {
        let (mut ctl, rec) = controller();
        let _dir = with_files(&mut ctl, &["a.mp4"]);
        ctl.dispatch(ControlEvent::PlayAt(0));
        rec.take();

        ctl.dispatch(status(2_000, 10_000, 100));
        ctl.dispatch(ControlEvent::SeekBy(-5_000));
        ctl.dispatch(ControlEvent::SeekBy(50_000));
        assert_eq!(
            rec.take(),
            vec![
                PlayerCommand::SetPositionPercent(0.0),
                PlayerCommand::SetPositionPercent(99.0)
            ]
        );

        ctl.dispatch(ControlEvent::ScrubStart);
        ctl.dispatch(ControlEvent::SeekBy(1_000));
        assert!(rec.take().is_empty());
    }

    #[test]
    fn media_end_advances_until_the_last_entry() {
        let (mut ctl, rec) = controller();
        let _dir = with_files(&mut ctl, &["a.mp4", "b.mp4"]);
        ctl.dispatch(ControlEvent::PlayAt(0));
        rec.take();

        let notice = ctl.dispatch(ControlEvent::Engine(PlayerEvent::Ended));
        assert_eq!(notice, Some(Notice::Playing("b.mp4".into())));
        assert!(matches!(rec.take()[..], [PlayerCommand::PlayAt { index: 1, .. }]));

        assert_eq!(ctl.dispatch(ControlEvent::Engine(PlayerEvent::Ended)), None);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn add_files_skips_missing_and_duplicates() {
        let (mut ctl, _rec) = controller();
        let dir = with_files(&mut ctl, &["a.mp4"]);
        let b = dir.path().join("b.mp4");
        std::fs::write(&b, b"").unwrap();

        let added = ctl.add_files(vec![
            dir.path().join("a.mp4"),
            dir.path().join("missing.mp4"),
            b.clone(),
            b.clone(),
        ]);

        assert_eq!(added, vec![(1, b)]);
        assert_eq!(ctl.playlist().len(), 2);
    }

    #[test]
    fn metadata_for_a_moved_entry_is_re_resolved_by_path() {
        let (mut ctl, _rec) = controller();
        let dir = with_files(&mut ctl, &["a.mp4", "b.mp4", "c.mp4"]);
        let c = dir.path().join("c.mp4");

        ctl.dispatch(ControlEvent::RemoveAt(0));
        let info = MediaInfo { duration_ms: 5_000, size_bytes: 2048 };
        assert!(ctl.on_metadata_resolved(2, &c, info));
        assert_eq!(ctl.playlist().get(1).unwrap().duration_ms, 5_000);

        ctl.dispatch(ControlEvent::RemoveAt(1));
        assert!(!ctl.on_metadata_resolved(1, &c, info));
    }

    #[test]
    fn current_index_follows_its_entry_through_edits() {
        let (mut ctl, _rec) = controller();
        let _dir = with_files(&mut ctl, &["a.mp4", "b.mp4", "c.mp4", "d.mp4"]);
        ctl.dispatch(ControlEvent::PlayAt(2));

        ctl.dispatch(ControlEvent::MoveUp(2));
        assert_eq!(ctl.transport().current_index, Some(1));
        ctl.dispatch(ControlEvent::MoveDown(0));
        assert_eq!(ctl.transport().current_index, Some(0));
        ctl.dispatch(ControlEvent::RemoveAt(3));
        assert_eq!(ctl.transport().current_index, Some(0));
        assert_eq!(ctl.current_entry().unwrap().display_name, "c.mp4");

        ctl.dispatch(ControlEvent::RemoveAt(0));
        assert_eq!(ctl.transport().current_index, None);
    }

    #[test]
    fn clear_empties_playlist_and_tells_engine() {
        let (mut ctl, rec) = controller();
        let _dir = with_files(&mut ctl, &["a.mp4", "b.mp4"]);
        ctl.dispatch(ControlEvent::PlayAt(0));
        rec.take();

        ctl.dispatch(ControlEvent::ClearPlaylist);
        assert!(ctl.playlist().is_empty());
        assert_eq!(ctl.transport().current_index, None);
        assert_eq!(rec.take(), vec![PlayerCommand::ClearPlaylist]);

        ctl.dispatch(ControlEvent::Engine(PlayerEvent::Stopped));
        assert_eq!(ctl.transport().position_ms, 0);
        assert!(!ctl.transport().is_playing);
    }

    #[test]
    fn dropping_the_controller_shuts_the_engine_down() {
        let (ctl, rec) = controller();
        drop(ctl);
        assert_eq!(rec.take(), vec![PlayerCommand::Shutdown]);
    }

    #[test]
    fn engine_errors_surface_as_notices() {
        let (mut ctl, _rec) = controller();
        let notice = ctl.dispatch(ControlEvent::Engine(PlayerEvent::Error("boom".into())));
        assert_eq!(notice, Some(Notice::EngineError("boom".into())));
    }
}
