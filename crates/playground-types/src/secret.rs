use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage backend a secret was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretSource {
    /// Environment variable.
    Environment,
    /// OS keychain (macOS Keychain / Linux Secret Service / Windows Credential Manager).
    Keychain,
    /// `secrets.toml` in the data directory.
    File,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Environment => write!(f, "environment"),
            SecretSource::Keychain => write!(f, "keychain"),
            SecretSource::File => write!(f, "file"),
        }
    }
}
