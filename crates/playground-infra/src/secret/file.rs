//! `secrets.toml` secret provider.
//!
//! Reads flat `KEY = "value"` pairs from `{data_dir}/secrets.toml`. The file
//! is the lowest-priority backend and is never written by the application.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use playground_core::repository::secret::SecretProvider;
use playground_types::error::SecretError;
use playground_types::secret::SecretSource;

/// Secret provider backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provider for `{data_dir}/secrets.toml`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("secrets.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, toml::Value>, SecretError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => {
                return Err(SecretError::Backend(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        toml::from_str(&content).map_err(|err| {
            SecretError::Backend(format!("failed to parse {}: {err}", self.path.display()))
        })
    }
}

impl SecretProvider for FileSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::File
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let table = self.load().await?;
        Ok(match table.get(key) {
            Some(toml::Value::String(value)) if !value.is_empty() => Some(value.clone()),
            _ => None,
        })
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), SecretError> {
        Err(SecretError::ReadOnly(self.path.display().to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), SecretError> {
        Err(SecretError::ReadOnly(self.path.display().to_string()))
    }
}
