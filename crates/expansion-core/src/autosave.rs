//! Draft autosave debouncing.
//!
//! Pure decision logic: the tracker records when the draft was last edited,
//! and the caller ticks with its own clock. A flush is due once the debounce
//! window has passed with no further edits. Submitted days are excluded by
//! the tracker, not here.

use chrono::{DateTime, Duration, Utc};

/// Debounce policy for draft autosave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosavePolicy {
    /// Milliseconds of edit silence before a draft is flushed
    pub debounce_ms: i64,
}

impl Default for AutosavePolicy {
    fn default() -> Self {
        Self { debounce_ms: 1500 }
    }
}

impl AutosavePolicy {
    pub fn new(debounce_ms: i64) -> Self {
        Self { debounce_ms }
    }

    /// The debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::milliseconds(self.debounce_ms)
    }

    /// Whether enough edit silence has passed to flush.
    ///
    /// `last_edit` of `None` means nothing is pending.
    pub fn should_flush(&self, last_edit: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_edit {
            None => false,
            Some(edited_at) => now - edited_at >= self.debounce(),
        }
    }
}
