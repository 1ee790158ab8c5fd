//! OS keychain adapter for secret storage.
//!
//! Uses the `keyring` crate to store/retrieve secrets via:
//! - macOS Keychain
//! - Linux Secret Service (GNOME Keyring, KDE Wallet)
//! - Windows Credential Manager

use playground_core::repository::secret::SecretProvider;
use playground_types::error::SecretError;
use playground_types::secret::SecretSource;
use tracing::debug;

/// Keychain service name under which the token is stored.
pub const SERVICE_NAME: &str = "llm-playground";

/// OS keychain secret provider using the `keyring` crate.
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Create a KeychainProvider with a custom service name (useful for testing).
    pub fn with_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, SecretError> {
        keyring::Entry::new(&self.service_name, key)
            .map_err(|e| SecretError::Backend(format!("keychain entry error: {e}")))
    }
}

impl Default for KeychainProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for KeychainProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Keychain
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let entry = self.entry(key)?;

        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            // Headless hosts often have no secret service; fall through to the next backend.
            Err(e @ (keyring::Error::NoStorageAccess(_) | keyring::Error::PlatformFailure(_))) => {
                debug!(error = %e, "Keychain unavailable, skipping");
                Ok(None)
            }
            Err(e) => Err(SecretError::Backend(format!("keychain get error: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        let entry = self.entry(key)?;

        entry
            .set_password(value)
            .map_err(|e| SecretError::Backend(format!("keychain set error: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), SecretError> {
        let entry = self.entry(key)?;

        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound),
            Err(e) => Err(SecretError::Backend(format!("keychain delete error: {e}"))),
        }
    }
}
