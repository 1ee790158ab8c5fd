//! Chat session state machine.
//!
//! - `session`: the Session Store (ordered committed turns, export)
//! - `streamer`: the Response Streamer (one inference request per invocation)
//! - `service`: the per-turn pipeline tying the two together
//! - `display`: the sink port the UI implements

pub mod display;
pub mod service;
pub mod session;
pub mod streamer;
