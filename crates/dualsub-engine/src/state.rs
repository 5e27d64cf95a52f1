use dualsub_track::Track;
use tokio::task::JoinHandle;

/// The two current track slots plus the change-detection state of the
/// synchronization loop.
///
/// Owned exclusively by the loop: mutated from its own sampling task and
/// from the start/stop handlers, never reentrantly.
#[derive(Debug, Default)]
pub struct TrackStore {
    pub primary: Track,
    pub secondary: Track,
    /// Text pair sent to the renderer on the last emission. Updates are
    /// suppressed while the resolved pair equals this value.
    pub last_emitted: (String, String),
    /// Most recently sampled playback position, in seconds.
    pub last_position: f64,
}

impl TrackStore {
    pub fn clear(&mut self) {
        *self = TrackStore::default();
    }
}

/// Live engine state shared between the dispatch loop and spawned tasks.
pub struct State {
    /// The loaded application configuration.
    pub config: dualsub_bridge::config::Config,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// The loop's unit of mutable state.
    pub store: TrackStore,
    /// Fetch session generation. Bumped on every start and stop so a fetch
    /// resolving after the session changed is discarded on arrival instead
    /// of being applied to a stale store.
    pub session: u64,
    /// Whether the loop is Active (started and not yet stopped). Suspend
    /// keeps this set; only stop clears it.
    pub active: bool,
    /// Handle of the running sampler task, if attached.
    pub sampler: Option<JoinHandle<()>>,
}

/// Thread-safe, async-friendly shared reference to the engine [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
