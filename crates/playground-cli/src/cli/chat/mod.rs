//! Interactive CLI chat experience.
//!
//! Streams replies token by token behind a thinking spinner, with slash
//! commands for clearing, exporting, and switching models. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod sink;
