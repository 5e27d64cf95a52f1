use std::fmt;

/// Coarse status values shown in the user-facing panel, covering both the
/// track fetch outcome and the per-tick match outcome.
///
/// The rendered strings are an external contract with the existing panel
/// and must be preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Tracks were retrieved, or the current tick resolved an active cue.
    Success,
    /// Track retrieval is in progress.
    Fetching,
    /// No cue matched the sampled playback position.
    TimestampNotMatched,
    /// The loop was stopped and tracks were cleared.
    Stopped,
}

impl SyncStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncStatus::Success => "Success",
            SyncStatus::Fetching => "Fetching",
            SyncStatus::TimestampNotMatched => "Timestamp not matched",
            SyncStatus::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
