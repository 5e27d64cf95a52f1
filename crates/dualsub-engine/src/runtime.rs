//! Engine runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to panel bridge commands.

use std::{sync::Arc, thread, time::Duration};

use dualsub_bridge::{MessageFromEngine, MessageToEngine};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::EngineContext;
use crate::clock::PositionSource;
use crate::state::{State, TrackStore};

/// Initialize engine state and start processing panel commands.
async fn setup_engine(
    rx: Receiver<MessageToEngine>,
    tx: Sender<MessageFromEngine>,
    clock: Arc<dyn PositionSource + Send + Sync>,
) {
    let config = crate::config::load_config()
        .await
        .expect("failed to load config");

    let request_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch.request_timeout_seconds))
        .build()
        .expect("failed to build HTTP client");

    let state = Arc::new(RwLock::new(State {
        config,
        request_client,
        store: TrackStore::default(),
        session: 0,
        active: false,
        sampler: None,
    }));

    let context = Arc::new(EngineContext { state, tx, clock });
    context.consume_bridge_messages(rx).await;
}

/// Spawn the engine runtime and begin processing bridge commands.
///
/// The runtime is a dedicated thread driving a current-thread tokio
/// scheduler: all engine logic is cooperative and single-threaded, with
/// network calls and timers as the only suspension points.
pub fn run(
    rx: Receiver<MessageToEngine>,
    tx: Sender<MessageFromEngine>,
    clock: impl PositionSource + Send + Sync + 'static,
) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(setup_engine(rx, tx, Arc::new(clock)));
    });
}
