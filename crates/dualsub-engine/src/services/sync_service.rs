//! The synchronization loop: start/stop lifecycle, concurrent track
//! retrieval, and the periodic sampler that resolves the active cue pair.
//!
//! The loop has two states. Idle: no sampler attached, empty store. Active:
//! tracks cached and a sampler task resolving "what text is active right
//! now" at a bounded rate, emitting to the renderer only when the resolved
//! pair actually changes.

use std::sync::Arc;
use std::time::Duration;

use dualsub_bridge::{MessageFromEngine, notification::Severity, status::SyncStatus};
use dualsub_track::Track;
use futures_util::future;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::PositionSource;
use crate::services::fetch_service::{self, FetchError, FetchSettings, HttpSegmentSource};
use crate::state::SharedState;

/// Handles a start command: fetch both tracks, then attach the sampler.
///
/// The fetch runs as its own task so stop commands arriving meanwhile are
/// still dispatched; a stop bumps the session generation and the stale
/// fetch result is discarded on arrival.
pub async fn handle_start(
    context: super::EngineContextHandle,
    primary_url: Option<String>,
    secondary_url: Option<String>,
) {
    if primary_url.is_none() && secondary_url.is_none() {
        context
            .send_notification(Severity::Error, "No caption track URLs were supplied.")
            .await;
        return;
    }

    let (session, client, fetch_settings) = {
        let mut state = context.state.write().await;
        // Restarting while active replaces the running session wholesale.
        if let Some(sampler) = state.sampler.take() {
            sampler.abort();
        }
        state.store.clear();
        state.session += 1;
        state.active = true;
        (
            state.session,
            state.request_client.clone(),
            FetchSettings::from(&state.config.fetch),
        )
    };

    context.send_status(SyncStatus::Fetching).await;

    let context = context.clone();
    tokio::spawn(async move {
        let source = HttpSegmentSource::new(client);
        // The two tracks are independent fetch sessions; neither failure
        // blocks the other.
        let (primary, secondary) = future::join(
            fetch_optional(&source, primary_url.as_deref(), &fetch_settings),
            fetch_optional(&source, secondary_url.as_deref(), &fetch_settings),
        )
        .await;

        let mut failed_tracks: Vec<&'static str> = Vec::new();
        let mut fetched_any = false;
        {
            let mut state = context.state.write().await;
            if state.session != session || !state.active {
                log::debug!("Discarding fetch results for a stale session");
                return;
            }

            match primary {
                Some(Ok(track)) => {
                    fetched_any |= !track.is_empty();
                    state.store.primary = track;
                }
                Some(Err(FetchError::Empty)) => failed_tracks.push("primary"),
                None => {}
            }
            match secondary {
                Some(Ok(track)) => {
                    fetched_any |= !track.is_empty();
                    state.store.secondary = track;
                }
                Some(Err(FetchError::Empty)) => failed_tracks.push("secondary"),
                None => {}
            }

            state.store.last_emitted = (String::new(), String::new());

            let interval = Duration::from_millis(state.config.sync.sample_interval_milliseconds);
            let tolerance = state.config.sync.tolerance_seconds;
            state.sampler = Some(spawn_sampler(
                context.state.clone(),
                context.tx.clone(),
                context.clock.clone(),
                interval,
                tolerance,
            ));
        }

        for label in failed_tracks {
            context
                .send_notification(
                    Severity::Error,
                    format!("Could not retrieve the {label} caption track."),
                )
                .await;
        }
        if fetched_any {
            context.send_status(SyncStatus::Success).await;
        }
    });
}

/// Handles a stop command: detach the sampler before any further tick can
/// fire, clear both tracks and the last-emitted text, invalidate in-flight
/// fetches. A no-op when already idle.
pub async fn handle_stop(context: super::EngineContextHandle) {
    {
        let mut state = context.state.write().await;
        if !state.active {
            return;
        }
        if let Some(sampler) = state.sampler.take() {
            sampler.abort();
        }
        state.store.clear();
        state.session += 1;
        state.active = false;
    }
    context.send_status(SyncStatus::Stopped).await;
}

/// Pauses sampling while the host is hidden or suspended. Tracks stay
/// cached; nothing is re-fetched on resume.
pub async fn handle_suspend(context: super::EngineContextHandle) {
    let mut state = context.state.write().await;
    if let Some(sampler) = state.sampler.take() {
        sampler.abort();
        log::info!("Sampling suspended; tracks stay cached");
    }
}

/// Reattaches the sampler after a suspend. Only meaningful while Active.
pub async fn handle_resume(context: super::EngineContextHandle) {
    let mut state = context.state.write().await;
    if !state.active || state.sampler.is_some() {
        return;
    }
    let interval = Duration::from_millis(state.config.sync.sample_interval_milliseconds);
    let tolerance = state.config.sync.tolerance_seconds;
    state.sampler = Some(spawn_sampler(
        context.state.clone(),
        context.tx.clone(),
        context.clock.clone(),
        interval,
        tolerance,
    ));
    log::info!("Sampling resumed");
}

async fn fetch_optional(
    source: &HttpSegmentSource,
    template: Option<&str>,
    settings: &FetchSettings,
) -> Option<Result<Track, FetchError>> {
    let template = template?;
    Some(fetch_service::fetch_track(source, template, settings).await)
}

/// Spawns the periodic sampler task.
///
/// Each tick reads the playback position, resolves the active cue per
/// track, and emits the text pair only when it differs from the last
/// emitted pair. Unreadable positions skip the tick. Missed ticks are
/// skipped rather than bursted, which bounds handling to one per interval
/// regardless of how often the host position source fires.
pub(crate) fn spawn_sampler(
    state: SharedState,
    tx: Sender<MessageFromEngine>,
    clock: Arc<dyn PositionSource + Send + Sync>,
    interval: Duration,
    tolerance: f64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let Some(position) = clock.current_time() else {
                continue;
            };
            if !position.is_finite() {
                continue;
            }

            let pair = {
                let mut state = state.write().await;
                state.store.last_position = position;
                let pair = (
                    resolve_text(&state.store.primary, position, tolerance),
                    resolve_text(&state.store.secondary, position, tolerance),
                );
                if pair == state.store.last_emitted {
                    continue;
                }
                state.store.last_emitted = pair.clone();
                pair
            };

            let matched = !pair.0.is_empty() || !pair.1.is_empty();
            let update = MessageFromEngine::CaptionUpdate {
                primary: pair.0,
                secondary: pair.1,
            };
            if tx.send(update).await.is_err() {
                // Bridge closed underneath us; nothing left to emit to.
                return;
            }
            let status = if matched {
                SyncStatus::Success
            } else {
                SyncStatus::TimestampNotMatched
            };
            let _ = tx.send(MessageFromEngine::SyncStatusUpdate(status)).await;
        }
    })
}

fn resolve_text(track: &Track, position: f64, tolerance: f64) -> String {
    track
        .find_active(position, tolerance)
        .map(|cue| cue.text.clone())
        .unwrap_or_default()
}
