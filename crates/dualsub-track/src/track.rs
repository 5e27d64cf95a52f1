//! The cue/track model and active-cue matching.

/// One timed caption entry.
///
/// Invariants, enforced by the parser: `end_seconds > start_seconds` and
/// `text` is non-empty. The raw timestamp strings are kept alongside the
/// parsed values for diagnostics, since parsing is lossy on malformed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
    pub raw_start: String,
    pub raw_end: String,
}

/// The full ordered cue sequence for one caption source.
///
/// Cues appear in source order and are not required to be sorted; matching
/// is first-satisfying, so behavior is well defined either way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    cues: Vec<Cue>,
}

impl Track {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Returns the first cue (in source order) whose tolerance-expanded
    /// interval contains `time`, i.e.
    /// `start - tolerance <= time <= end + tolerance`.
    ///
    /// Overlapping cues are resolved by source order. This first-match
    /// tie-break is a documented contract, not an accident.
    pub fn find_active(&self, time: f64, tolerance: f64) -> Option<&Cue> {
        self.cues
            .iter()
            .find(|cue| cue.start_seconds - tolerance <= time && time <= cue.end_seconds + tolerance)
    }

    /// Combines several tracks into one, re-sorted by start time.
    pub fn merge(tracks: impl IntoIterator<Item = Track>) -> Track {
        let mut cues: Vec<Cue> = tracks.into_iter().flat_map(|track| track.cues).collect();
        cues.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));
        Track { cues }
    }
}
