/// Source of the current playback position.
///
/// Implemented by the host over whatever media surface is actually playing.
/// The engine samples it at a bounded rate; it never writes to it.
pub trait PositionSource {
    /// Returns the current playback position in seconds, or `None` when the
    /// position is momentarily unreadable. Unreadable ticks are skipped
    /// without emitting anything.
    fn current_time(&self) -> Option<f64>;
}
