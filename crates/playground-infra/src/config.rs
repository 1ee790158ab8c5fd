//! Configuration loader for LLM Playground.
//!
//! Reads `config.toml` from the data directory (`~/.llm-playground/` in
//! production) and deserializes it into [`PlaygroundConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::Path;

use playground_types::config::PlaygroundConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`PlaygroundConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> PlaygroundConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return PlaygroundConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return PlaygroundConfig::default();
        }
    };

    match toml::from_str::<PlaygroundConfig>(&content) {
        Ok(config) => normalize(config),
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PlaygroundConfig::default()
        }
    }
}

/// Keep the configured default model selectable and the token cap usable.
fn normalize(mut config: PlaygroundConfig) -> PlaygroundConfig {
    if config.max_tokens == 0 {
        tracing::warn!("max_tokens = 0 in config.toml, using {}", PlaygroundConfig::default().max_tokens);
        config.max_tokens = PlaygroundConfig::default().max_tokens;
    }
    if !config.models.contains(&config.default_model) {
        config.models.insert(0, config.default_model.clone());
    }
    config
}
