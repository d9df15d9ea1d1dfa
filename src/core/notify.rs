//! core/notify.rs
//! Toast + thumbnail preview lifecycles.
//!
//! At most one of each is live. Showing a new one replaces the old one and
//! restarts its countdown; nothing queues.
//!
//! Timers are [`ScopedTimer`]s. The channel hands out an [`Expiry`] each time
//! it arms one; the shell waits `after` and reports it back through
//! [`NotificationChannel::expire`]. Stale expiries are ignored, so a restarted
//! countdown can't be cut short by the previous one.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

// Tokens are unique process-wide, so one timer's token never matches another's.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Cancellable one-shot. Each `arm` invalidates every earlier token, and a
/// token fires at most once.
#[derive(Debug, Default)]
pub struct ScopedTimer {
    armed: Option<(TimerToken, Instant)>,
}

impl ScopedTimer {
    pub fn arm(&mut self, now: Instant, after: Duration) -> TimerToken {
        let token = TimerToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
        self.armed = Some((token, now + after));
        token
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// True exactly once, and only for the most recently armed token.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.armed {
            Some((current, _)) if current == token => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, deadline)| deadline)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Toast,
    Thumbnail,
}

/// "Call `expire(kind, token)` after `after`."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub kind: NotificationKind,
    pub token: TimerToken,
    pub after: Duration,
}

pub struct NotificationChannel {
    toast_text: String,
    toast_timer: ScopedTimer,
    toast_ttl: Duration,

    thumbnail: Option<PathBuf>,
    thumbnail_timer: ScopedTimer,
    thumbnail_ttl: Duration,
}

impl NotificationChannel {
    pub fn new(toast_ttl: Duration, thumbnail_ttl: Duration) -> Self {
        Self {
            toast_text: String::new(),
            toast_timer: ScopedTimer::default(),
            toast_ttl,
            thumbnail: None,
            thumbnail_timer: ScopedTimer::default(),
            thumbnail_ttl,
        }
    }

    /// Replace the toast text, show it, and restart its countdown.
    pub fn show_toast(&mut self, message: impl Into<String>, now: Instant) -> Expiry {
        self.toast_text = message.into();

        Expiry {
            kind: NotificationKind::Toast,
            token: self.toast_timer.arm(now, self.toast_ttl),
            after: self.toast_ttl,
        }
    }

    /// `None` hides right away. `Some(path)` shows it and (re)schedules the hide.
    pub fn show_thumbnail(&mut self, path: Option<PathBuf>, now: Instant) -> Option<Expiry> {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            self.thumbnail = None;
            self.thumbnail_timer.cancel();
            return None;
        };

        self.thumbnail = Some(path);
        Some(Expiry {
            kind: NotificationKind::Thumbnail,
            token: self.thumbnail_timer.arm(now, self.thumbnail_ttl),
            after: self.thumbnail_ttl,
        })
    }

    /// A countdown ran out. Returns whether anything was hidden.
    pub fn expire(&mut self, kind: NotificationKind, token: TimerToken) -> bool {
        match kind {
            NotificationKind::Toast => {
                if !self.toast_timer.fire(token) {
                    return false;
                }
            }
            NotificationKind::Thumbnail => {
                if !self.thumbnail_timer.fire(token) {
                    return false;
                }
                self.thumbnail = None;
            }
        }
        true
    }

    pub fn toast(&self) -> Option<&str> {
        // Visible exactly while its hide is pending.
        self.toast_timer
            .is_armed()
            .then_some(self.toast_text.as_str())
    }

    pub fn thumbnail(&self) -> Option<&Path> {
        self.thumbnail.as_deref()
    }

    #[cfg(test)]
    pub fn toast_deadline(&self) -> Option<Instant> {
        self.toast_timer.deadline()
    }
}
