//! Timed-text track primitives.
//!
//! This crate provides the cue and track model shared by the sync engine,
//! plus the pure algorithmic pieces that operate on it: timestamp
//! conversion, tolerant parsing of segmented WebVTT-style documents, and
//! active-cue matching against a playback position. It performs no I/O.

pub mod timecode;
pub mod track;
pub mod vtt;

pub use track::{Cue, Track};

/// Default symmetric tolerance window in seconds used when matching a cue
/// interval against a sampled playback position.
///
/// Playback position samples and cue boundaries come from different clocks;
/// the tolerance absorbs sampling jitter and sub-frame drift between them so
/// a caption is not dropped for the last few milliseconds of its interval.
pub const DEFAULT_TOLERANCE_SECONDS: f64 = 0.1;
