//! Display port for a chat turn.
//!
//! The chat service reports progress here; the UI decides how to show it.
//! All methods default to no-ops so headless callers can pick what they need.

use super::service::TurnOutcome;

pub trait DisplaySink {
    /// The request is about to be sent (streamer entered `REQUESTING`).
    fn on_request_started(&mut self) {}

    /// A fragment arrived. Called once per fragment, in arrival order.
    fn on_fragment(&mut self, _fragment: &str) {}

    /// The turn is over, successfully or not.
    fn on_finished(&mut self, _outcome: &TurnOutcome) {}
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {}
