use tokio::sync::watch;
use tracing::debug;

use crate::models::{PlayHistory, VideoItem};

/// Narrow state snapshot published to observers. The host UI subscribes to
/// this instead of wiring callbacks into the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStatus {
    pub position_secs: f64,
    pub duration_secs: Option<f64>,
    pub playing: bool,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: None,
            playing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Active,
}

/// Tracks the play position of the active item and reconciles it into the
/// resume-position map when the session ends.
///
/// `Idle -> Active` on `start`, `Active -> Active` on `tick`,
/// `Active -> Idle` on `end`. `start` on an already-active session begins a
/// new session; the caller is expected to have committed the previous one.
pub struct PlaybackSession {
    item: Option<VideoItem>,
    elapsed_secs: f64,
    duration_secs: Option<f64>,
    playing: bool,
    state: SessionState,
    status_tx: watch::Sender<PlaybackStatus>,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSession {
    pub fn new() -> Self {
        let (status_tx, _) = watch::channel(PlaybackStatus::default());
        Self {
            item: None,
            elapsed_secs: 0.0,
            duration_secs: None,
            playing: false,
            state: SessionState::Idle,
            status_tx,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn item(&self) -> Option<&VideoItem> {
        self.item.as_ref()
    }

    /// Observe position/duration/play-state changes. Receivers stay valid
    /// across sessions.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status_tx.subscribe()
    }

    /// Begins a session for `item` and returns the initial seek position:
    /// the recorded resume point, or 0. Read-only on the history map.
    pub fn start(&mut self, item: VideoItem, history: &PlayHistory) -> f64 {
        let resume = history.get(&item.url).copied().unwrap_or(0.0);
        debug!("starting playback of '{}' at {:.1}s", item.url, resume);

        self.item = Some(item);
        self.elapsed_secs = resume;
        self.duration_secs = None;
        self.playing = false;
        self.state = SessionState::Active;
        self.publish();

        resume
    }

    /// Updates the in-memory position. Called at a bounded rate (~1 Hz) by
    /// the host's time observer; persistence is batched to session end.
    pub fn tick(&mut self, elapsed_secs: f64) {
        if self.state != SessionState::Active {
            return;
        }
        self.elapsed_secs = elapsed_secs;
        self.publish();
    }

    pub fn set_duration(&mut self, duration_secs: f64) {
        if self.state != SessionState::Active {
            return;
        }
        self.duration_secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            Some(duration_secs)
        } else {
            None
        };
        self.publish();
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.state != SessionState::Active {
            return;
        }
        self.playing = playing;
        self.publish();
    }

    /// Fraction of the item played, 0 when the duration is unknown.
    pub fn progress(&self) -> f64 {
        match self.duration_secs {
            Some(duration) if duration > 0.0 => (self.elapsed_secs / duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Maps a slider fraction to a seek position in seconds; None while the
    /// duration is still unknown.
    pub fn seek_target(&self, fraction: f64) -> Option<f64> {
        let duration = self.duration_secs?;
        Some(duration * fraction.clamp(0.0, 1.0))
    }

    /// Ends the session, writing the elapsed position into the history map
    /// (only when non-negative). The caller persists the map. Idempotent: a
    /// second `end` with the same elapsed value leaves the map unchanged.
    pub fn end(&mut self, history: &mut PlayHistory) {
        if self.state != SessionState::Active {
            return;
        }

        if let Some(ref item) = self.item {
            if self.elapsed_secs >= 0.0 {
                debug!(
                    "ending playback of '{}' at {:.1}s",
                    item.url, self.elapsed_secs
                );
                history.insert(item.url.clone(), self.elapsed_secs);
            }
        }

        self.state = SessionState::Idle;
        self.playing = false;
        self.publish();
    }

    fn publish(&self) {
        // Nobody listening is fine; send_replace never fails.
        self.status_tx.send_replace(PlaybackStatus {
            position_secs: self.elapsed_secs,
            duration_secs: self.duration_secs,
            playing: self.playing,
        });
    }
}

/// "MM:SS" clock string; NaN or negative inputs render as "00:00". Minutes
/// are not capped at 59, matching the player's time labels.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let total = secs as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
