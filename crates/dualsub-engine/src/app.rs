//! Engine context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! events and notifications back to the panel bridge.

use std::sync::Arc;

use dualsub_bridge::{MessageFromEngine, MessageToEngine, notification, status::SyncStatus};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::clock::PositionSource;
use crate::services;
use crate::state::SharedState;

/// Shared engine context passed to services and message handlers.
pub(crate) struct EngineContext {
    /// Mutable runtime engine state shared across services.
    pub state: SharedState,
    /// Outbound channel to the panel bridge.
    pub tx: Sender<MessageFromEngine>,
    /// Playback position collaborator sampled by the sync loop.
    pub clock: Arc<dyn PositionSource + Send + Sync>,
}

impl EngineContext {
    /// Read and dispatch commands from the panel bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToEngine>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a panel command: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches a received panel command down to the individual service
    /// handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToEngine) {
        match message {
            MessageToEngine::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToEngine::StartCaptions {
                primary_url,
                secondary_url,
            } => {
                services::sync_service::handle_start(self.clone(), primary_url, secondary_url)
                    .await;
            }
            MessageToEngine::StopCaptions => {
                services::sync_service::handle_stop(self.clone()).await;
            }
            MessageToEngine::AdjustStyle {
                size_delta,
                position_delta,
            } => {
                services::config_service::handle_style_adjust(
                    self.clone(),
                    size_delta,
                    position_delta,
                )
                .await;
            }
            MessageToEngine::Suspend => {
                services::sync_service::handle_suspend(self.clone()).await;
            }
            MessageToEngine::Resume => {
                services::sync_service::handle_resume(self.clone()).await;
            }
        }
    }

    /// Send a message to the panel bridge. A closed bridge is logged and
    /// otherwise ignored; it must never take the engine down.
    pub async fn send(&self, message: MessageFromEngine) {
        if self.tx.send(message).await.is_err() {
            log::warn!("Panel bridge is closed, discarding outbound message");
        }
    }

    /// Send a coarse status value to the panel bridge.
    pub async fn send_status(&self, status: SyncStatus) {
        self.send(MessageFromEngine::SyncStatusUpdate(status)).await;
    }

    /// Send a user-visible notification to the panel bridge.
    pub async fn send_notification(
        &self,
        severity: notification::Severity,
        text: impl Into<String>,
    ) {
        self.send(MessageFromEngine::Notification(notification::Notification {
            severity,
            text: text.into(),
        }))
        .await;
    }
}
