//! Secret provider trait definition.
//!
//! Providers use native async fns in traits, which are not object-safe, so
//! `SecretProviderDyn` boxes the futures and is blanket-implemented for
//! every `SecretProvider`. The service holds `DynSecretProvider`s.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use playground_types::error::SecretError;
use playground_types::secret::SecretSource;

/// Trait for secret storage backends (environment, keychain, file).
pub trait SecretProvider: Send + Sync {
    /// Which backend this provider reads from.
    fn source(&self) -> SecretSource;

    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this provider.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, SecretError>> + Send;

    /// Store a secret value. Read-only backends return `SecretError::ReadOnly`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), SecretError>> + Send;

    /// Delete a secret.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), SecretError>> + Send;
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`SecretProvider`] with boxed futures.
pub trait SecretProviderDyn: Send + Sync {
    fn source(&self) -> SecretSource;

    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, SecretError>>;

    fn set_boxed<'a>(&'a self, key: &'a str, value: &'a str)
    -> BoxFuture<'a, Result<(), SecretError>>;

    fn delete_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), SecretError>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn source(&self) -> SecretSource {
        SecretProvider::source(self)
    }

    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, SecretError>> {
        Box::pin(self.get(key))
    }

    fn set_boxed<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> BoxFuture<'a, Result<(), SecretError>> {
        Box::pin(self.set(key, value))
    }

    fn delete_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), SecretError>> {
        Box::pin(self.delete(key))
    }
}

/// Shared handle to a type-erased secret provider.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;
