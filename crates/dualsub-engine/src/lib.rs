//! Engine runtime entry point and public API surface.
//!
//! This crate owns the engine lifecycle, routes bridge messages to services,
//! and manages the shared state mutated by the fetch and sampling tasks.

mod app;
mod clock;
mod config;
mod runtime;
mod services;
mod state;

pub use crate::clock::PositionSource;
pub use crate::runtime::run;
