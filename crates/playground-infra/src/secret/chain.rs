//! Secret chain builder -- wires concrete providers in priority order.
//!
//! This module lives in `playground-infra` because it assembles concrete
//! provider implementations. The resulting chain is passed to `SecretService`
//! in `playground-core` via the `DynSecretProvider` abstraction.

use std::sync::Arc;

use playground_core::repository::secret::DynSecretProvider;

use crate::keychain::KeychainProvider;
use crate::secret::env::EnvSecretProvider;
use crate::secret::file::FileSecretProvider;

/// Build the default secret resolution chain.
///
/// The chain is ordered by precedence (first match wins):
/// 1. Environment variables
/// 2. OS keychain (if `keychain` is Some)
/// 3. `secrets.toml` (always included)
pub fn build_secret_chain(
    file: FileSecretProvider,
    keychain: Option<KeychainProvider>,
) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = vec![Arc::new(EnvSecretProvider::new())];

    if let Some(kc) = keychain {
        chain.push(Arc::new(kc));
    }

    chain.push(Arc::new(file));
    chain
}
