//! Configuration and caption-style handlers.

use dualsub_bridge::MessageFromEngine;

/// Handles an incoming configuration request (see
/// [`dualsub_bridge::MessageToEngine::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::EngineContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(MessageFromEngine::ConfigurationResponse(config))
        .await;
}

/// Handles a style adjustment (see
/// [`dualsub_bridge::MessageToEngine::AdjustStyle`]): accumulates the deltas
/// into the persisted offsets and forwards the new absolute offsets to the
/// renderer, independently of any caption text updates.
pub async fn handle_style_adjust(
    context: super::EngineContextHandle,
    size_delta: f32,
    position_delta: f32,
) {
    let config = {
        let mut state = context.state.write().await;
        state.config.style.size_offset += size_delta;
        state.config.style.position_offset += position_delta;
        state.config.clone()
    };

    if let Err(error) = crate::config::save_config(&config).await {
        log::error!("Failed to persist style offsets: {error}");
    }

    context
        .send(MessageFromEngine::StyleUpdate {
            size_offset: config.style.size_offset,
            position_offset: config.style.position_offset,
        })
        .await;
}
