//! Wall-clock expiry for the dashboard's message banner.
//!
//! The engine only bumps `Notice::seq`. This timer watches the sequence and
//! starts a fresh window whenever it changes, so a new message always gets
//! its full display time and an old one disappears on schedule.

use crate::agency::state::Notice;

/// How long a message stays on screen.
pub const BANNER_MS: f64 = 3_000.0;

#[derive(Debug, Clone)]
pub struct NoticeTimer {
    window_ms: f64,
    /// Sequence number and timestamp of the message being timed.
    current: Option<(u64, f64)>,
}

impl NoticeTimer {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            current: None,
        }
    }

    /// Whether `notice` should still be shown at `now_ms`.
    ///
    /// Call once per frame with a monotonic timestamp (`Date.now()` or
    /// similar).
    pub fn is_visible(&mut self, notice: &Notice, now_ms: f64) -> bool {
        if notice.text.is_empty() {
            return false;
        }
        let shown_at = match self.current {
            Some((seq, at)) if seq == notice.seq => at,
            _ => {
                self.current = Some((notice.seq, now_ms));
                now_ms
            }
        };
        now_ms - shown_at < self.window_ms
    }

    /// Forget the timed message. Used when a new session starts and sequence
    /// numbers begin again.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

impl Default for NoticeTimer {
    fn default() -> Self {
        Self::new(BANNER_MS)
    }
}
