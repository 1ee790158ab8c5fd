//! Secret management service.
//!
//! SecretService resolves secrets through a chain of providers in priority
//! order: environment, then OS keychain, then `secrets.toml`.
//!
//! This service lives in `playground-core` and depends only on the
//! `SecretProviderDyn` trait, never on concrete infra implementations.

use playground_types::error::SecretError;
use playground_types::secret::SecretSource;
use tracing::debug;

use crate::repository::secret::DynSecretProvider;

/// Service for managing secrets across multiple storage backends.
///
/// Providers are ordered by precedence (first match wins).
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a secret value along with the backend that supplied it.
    ///
    /// First provider with a non-blank value wins. The value is returned
    /// trimmed.
    pub async fn resolve(&self, key: &str) -> Result<Option<(String, SecretSource)>, SecretError> {
        for provider in &self.providers {
            match provider.get_boxed(key).await? {
                Some(value) if !value.trim().is_empty() => {
                    debug!(key, source = %provider.source(), "Resolved secret");
                    return Ok(Some((value.trim().to_string(), provider.source())));
                }
                Some(_) => {
                    debug!(key, source = %provider.source(), "Ignoring blank secret");
                }
                None => {}
            }
        }
        Ok(None)
    }

    /// Store a secret value in the first writable provider.
    ///
    /// Read-only providers are skipped. Returns the backend that accepted
    /// the write.
    pub async fn set_secret(&self, key: &str, value: &str) -> Result<SecretSource, SecretError> {
        let mut last_err = None;
        for provider in &self.providers {
            match provider.set_boxed(key, value).await {
                Ok(()) => return Ok(provider.source()),
                Err(SecretError::ReadOnly(_)) => continue,
                Err(e) => {
                    debug!(source = %provider.source(), error = %e, "Secret write failed, trying next");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            SecretError::ReadOnly("no writable secret provider available".to_string())
        }))
    }

    /// Delete a secret from every writable provider that has it.
    ///
    /// Returns the backends it was removed from. Read-only backends are
    /// skipped, so a value that only lives in the environment or in
    /// `secrets.toml` yields `NotFound`.
    pub async fn delete_secret(&self, key: &str) -> Result<Vec<SecretSource>, SecretError> {
        let mut removed = Vec::new();

        for provider in &self.providers {
            match provider.delete_boxed(key).await {
                Ok(()) => removed.push(provider.source()),
                Err(SecretError::ReadOnly(_) | SecretError::NotFound) => continue,
                Err(e) => return Err(e),
            }
        }

        if removed.is_empty() {
            return Err(SecretError::NotFound);
        }
        debug!(key, ?removed, "Deleted secret");
        Ok(removed)
    }

    /// Mask a secret value, showing only the last 4 characters.
    ///
    /// - "hf_abcdefghijklmnop" -> "****mnop"
    /// - "abc" -> "****"
    pub fn mask_secret(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 4 {
            "****".to_string()
        } else {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("****{tail}")
        }
    }
}
