//! Application state wiring configuration and services together.

use std::path::PathBuf;
use std::sync::Arc;

use playground_core::service::secret::SecretService;
use playground_infra::config::load_config;
use playground_infra::filesystem::resolve_data_dir;
use playground_infra::keychain::KeychainProvider;
use playground_infra::secret::chain::build_secret_chain;
use playground_infra::secret::file::FileSecretProvider;
use playground_types::config::PlaygroundConfig;

/// Shared application state used by every command.
#[derive(Clone)]
pub struct AppState {
    pub config: PlaygroundConfig,
    pub secret_service: Arc<SecretService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, wire the secret chain.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let chain = build_secret_chain(
            FileSecretProvider::in_data_dir(&data_dir),
            Some(KeychainProvider::new()),
        );

        tracing::debug!(data_dir = %data_dir.display(), model = %config.default_model, "Application state initialized");

        Ok(Self {
            config,
            secret_service: Arc::new(SecretService::new(chain)),
            data_dir,
        })
    }
}
