//! Minimal console stand-in for the renderer and status panel.
//!
//! Prints each emitted caption pair on its own lines and logs status and
//! notification traffic. Rendering proper is out of scope; this only
//! exercises the collaborator seams.

use anyhow::Context;
use dualsub_bridge::{MessageFromEngine, MessageToEngine};
use tokio::sync::mpsc::{Receiver, Sender};

pub fn run(
    mut rx: Receiver<MessageFromEngine>,
    tx: Sender<MessageToEngine>,
    primary_url: Option<String>,
    secondary_url: Option<String>,
) -> anyhow::Result<()> {
    tx.blocking_send(MessageToEngine::StartCaptions {
        primary_url,
        secondary_url,
    })
    .context("engine bridge is closed")?;

    while let Some(message) = rx.blocking_recv() {
        match message {
            MessageFromEngine::CaptionUpdate { primary, secondary } => {
                println!("{primary}");
                if !secondary.is_empty() {
                    println!("  {secondary}");
                }
            }
            MessageFromEngine::SyncStatusUpdate(status) => {
                log::info!("Status: {status}");
            }
            MessageFromEngine::Notification(notification) => {
                log::info!("[{:?}] {}", notification.severity, notification.text);
            }
            MessageFromEngine::StyleUpdate {
                size_offset,
                position_offset,
            } => {
                log::info!("Style offsets: size {size_offset:+}, position {position_offset:+}");
            }
            MessageFromEngine::ConfigurationResponse(config) => {
                log::debug!("Configuration: {config:?}");
            }
        }
    }

    Ok(())
}
