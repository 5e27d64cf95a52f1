use serde::{Deserialize, Serialize};

/// Settings for the synchronization loop's matching and sampling behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Symmetric tolerance window in seconds applied around each cue
    /// interval when matching the sampled playback position.
    pub tolerance_seconds: f64,
    /// Minimum interval between sampling ticks in milliseconds. Position
    /// notifications arriving faster than this are coalesced.
    pub sample_interval_milliseconds: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tolerance_seconds: 0.1,
            sample_interval_milliseconds: 100,
        }
    }
}

/// Settings for segmented track retrieval.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Hard timeout for one segment request, in seconds.
    pub request_timeout_seconds: u64,
    /// Maximum attempts per segment index before the sequence is ended.
    pub max_segment_retries: u32,
    /// Base delay for exponential retry backoff, in milliseconds. Attempt
    /// `n` waits `base * 2^(n-1)` before the next try.
    pub retry_base_delay_milliseconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 15,
            max_segment_retries: 3,
            retry_base_delay_milliseconds: 1000,
        }
    }
}

/// Persisted caption style offsets, accumulated from panel adjustments.
/// Interpretation of the units is up to the renderer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StyleConfig {
    /// Relative font size offset.
    pub size_offset: f32,
    /// Relative vertical position offset.
    pub position_offset: f32,
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Matching and sampling settings for the synchronization loop.
    pub sync: SyncConfig,
    /// Segmented retrieval settings.
    pub fetch: FetchConfig,
    /// Persisted caption style offsets.
    pub style: StyleConfig,
}
