//! Engine service handlers for panel-driven commands.
//!
//! This module groups async command handlers that operate on the shared
//! `EngineContext`, perform side effects (network, filesystem, timers), and
//! emit caption updates, status values, or notifications back to the panel.

pub mod config_service;
pub mod fetch_service;
pub mod sync_service;

/// Represents a type that is used in all handlers as the engine context.
pub(crate) type EngineContextHandle = std::sync::Arc<crate::app::EngineContext>;
