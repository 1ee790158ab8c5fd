//! Global configuration types for LLM Playground.
//!
//! `PlaygroundConfig` represents the optional `config.toml` in the data
//! directory. The inference credential is deliberately not part of it; it
//! comes from the secret chain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default model, matching the first entry of the model selector.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// OpenAI-compatible base URL of the Hugging Face inference router.
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Secret key under which the inference token is resolved.
pub const CREDENTIAL_KEY: &str = "HF_TOKEN";

/// What to do with a partially streamed reply when the stream fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialCommitPolicy {
    /// Commit the partial text as an assistant turn if at least one fragment
    /// arrived before the failure.
    #[default]
    Commit,
    /// Drop the partial text; only the user turn remains.
    Discard,
}

impl fmt::Display for PartialCommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialCommitPolicy::Commit => write!(f, "commit"),
            PartialCommitPolicy::Discard => write!(f, "discard"),
        }
    }
}

impl FromStr for PartialCommitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "commit" => Ok(PartialCommitPolicy::Commit),
            "discard" => Ok(PartialCommitPolicy::Discard),
            other => Err(format!("invalid partial commit policy: '{other}'")),
        }
    }
}

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    /// Model used when `--model` is not given.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Models offered by `/models` and `llmp models`.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Token budget cap sent with every request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL of the OpenAI-compatible inference endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub partial_commit: PartialCommitPolicy,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
        "mistralai/Mistral-7B-Instruct-v0.1".to_string(),
    ]
}

fn default_max_tokens() -> u32 {
    500
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            models: default_models(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            partial_commit: PartialCommitPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.partial_commit, PartialCommitPolicy::Commit);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: PlaygroundConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.default_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_deserialize_with_values() {
        let toml_str = r#"
default_model = "HuggingFaceH4/zephyr-7b-beta"
models = ["HuggingFaceH4/zephyr-7b-beta"]
max_tokens = 1024
partial_commit = "discard"
"#;
        let config: PlaygroundConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_model, "HuggingFaceH4/zephyr-7b-beta");
        assert_eq!(config.models, vec!["HuggingFaceH4/zephyr-7b-beta"]);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.partial_commit, PartialCommitPolicy::Discard);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_commit_policy_roundtrip() {
        for policy in [PartialCommitPolicy::Commit, PartialCommitPolicy::Discard] {
            let parsed: PartialCommitPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
    }
}
