//! Communication bridge between the caption panel and the sync engine.
//!
//! This crate defines the types and protocols used to connect a user-facing
//! panel (or any other host surface) with the asynchronous engine that
//! fetches caption tracks and keeps them synchronized with playback.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The panel sends commands (start/stop captions, adjust style, request
//!   config, suspend/resume sampling).
//! - The engine pushes events (caption text updates, status values,
//!   notifications, style changes).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod config;
pub mod notification;
pub mod status;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the engine to inform the panel of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromEngine {
    /// Generic message for all user-visible notifications.
    Notification(notification::Notification),
    /// Response to a configuration request from the panel.
    ConfigurationResponse(config::Config),
    /// The resolved caption text pair changed. An empty string means "hide
    /// this line"; updates are only sent when the pair actually differs
    /// from the previously emitted one.
    CaptionUpdate { primary: String, secondary: String },
    /// Accumulated caption style offsets changed, independently of text.
    StyleUpdate { size_offset: f32, position_offset: f32 },
    /// Coarse status value for the user-facing panel.
    SyncStatusUpdate(status::SyncStatus),
}

/// Commands issued by the panel to control or query the engine.
#[derive(Debug, Clone)]
pub enum MessageToEngine {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Fetch both caption tracks and begin synchronized sampling. At least
    /// one URL template must be present.
    StartCaptions {
        primary_url: Option<String>,
        secondary_url: Option<String>,
    },
    /// Stop sampling and clear both tracks. A no-op when already idle.
    StopCaptions,
    /// Apply relative adjustments to the persisted caption style offsets.
    AdjustStyle { size_delta: f32, position_delta: f32 },
    /// Host went to background: pause sampling, keep tracks cached.
    Suspend,
    /// Host became visible again: resume sampling without re-fetching.
    Resume,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// the panel and the engine.
pub struct BridgeChannels {
    /// Receiver used by the panel to get messages from the engine.
    pub ui_rx: Receiver<MessageFromEngine>,
    /// Sender used by the panel to send commands to the engine.
    pub ui_tx: Sender<MessageToEngine>,

    /// Receiver used by the engine to get commands from the panel.
    pub engine_rx: Receiver<MessageToEngine>,
    /// Sender used by the engine to send events back to the panel.
    pub engine_tx: Sender<MessageFromEngine>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_engine_tx, to_engine_rx) = mpsc::channel(buffer);
        let (to_ui_tx, to_ui_rx) = mpsc::channel(buffer);
        Self {
            ui_tx: to_engine_tx,
            ui_rx: to_ui_rx,
            engine_rx: to_engine_rx,
            engine_tx: to_ui_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
