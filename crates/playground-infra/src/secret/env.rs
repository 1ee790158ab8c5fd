//! Environment variable secret provider.
//!
//! A read-only secret provider that checks environment variables.
//! This is the highest-priority provider in the resolution chain:
//! env vars override all other backends.

use playground_core::repository::secret::SecretProvider;
use playground_types::error::SecretError;
use playground_types::secret::SecretSource;

/// Environment variable secret provider.
///
/// Read-only: `set()` and `delete()` return `SecretError::ReadOnly`
/// because environment variables cannot be persistently modified.
#[derive(Debug, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SecretProvider for EnvSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Environment
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Ok(Some(val)),
            // Blank or non-Unicode values are treated as unset.
            Ok(_) | Err(_) => Ok(None),
        }
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), SecretError> {
        Err(SecretError::ReadOnly("environment".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), SecretError> {
        Err(SecretError::ReadOnly("environment".to_string()))
    }
}
