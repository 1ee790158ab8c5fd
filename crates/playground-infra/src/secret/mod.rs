//! Secret provider implementations.
//!
//! - `env`: environment variable provider (read-only, highest priority)
//! - `file`: `secrets.toml` in the data directory (read-only, lowest priority)
//! - `chain`: secret chain builder wiring all providers together
//!
//! The OS keychain provider lives in [`crate::keychain`].

pub mod chain;
pub mod env;
pub mod file;
