//! Secret management CLI commands: set, status, delete.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::{Confirm, Password};

use playground_core::service::secret::SecretService;
use playground_types::config::CREDENTIAL_KEY;
use playground_types::error::SecretError;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum SecretCommand {
    /// Store the inference token in the OS keychain.
    Set {
        /// Token value (prompted with hidden input when omitted).
        #[arg(long)]
        value: Option<String>,
    },

    /// Show where the inference token is resolved from.
    Status,

    /// Remove the stored inference token from the OS keychain.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn handle_secret_command(state: &AppState, action: SecretCommand, json: bool) -> Result<()> {
    match action {
        SecretCommand::Set { value } => set_secret(state, value.as_deref(), json).await,
        SecretCommand::Status => secret_status(state, json).await,
        SecretCommand::Delete { force } => delete_secret(state, force, json).await,
    }
}

/// Set the inference token with a hidden input prompt.
///
/// # Examples
///
/// ```bash
/// # Secure prompt (recommended)
/// llmp secret set
///
/// # Script/automation mode
/// llmp secret set --value hf_...
/// ```
pub async fn set_secret(state: &AppState, value: Option<&str>, json: bool) -> Result<()> {
    let secret_value = match value {
        Some(v) => v.to_string(),
        None => Password::new()
            .with_prompt(format!("Enter value for {}", style(CREDENTIAL_KEY).bold()))
            .interact()?,
    };

    if secret_value.trim().is_empty() {
        anyhow::bail!("{CREDENTIAL_KEY} must not be empty");
    }

    let source = state
        .secret_service
        .set_secret(CREDENTIAL_KEY, secret_value.trim())
        .await?;

    let masked = SecretService::mask_secret(secret_value.trim());
    if json {
        println!(
            "{}",
            serde_json::json!({"set": true, "key": CREDENTIAL_KEY, "source": source, "masked": masked})
        );
    } else {
        println!(
            "  {} Secret '{}' stored in {} ({})",
            style("✓").green().bold(),
            style(CREDENTIAL_KEY).bold(),
            source,
            masked
        );
    }

    Ok(())
}

/// Report which backend supplies the inference token, masked.
pub async fn secret_status(state: &AppState, json: bool) -> Result<()> {
    let resolved = state.secret_service.resolve(CREDENTIAL_KEY).await?;

    if json {
        let body = match &resolved {
            Some((value, source)) => serde_json::json!({
                "key": CREDENTIAL_KEY,
                "configured": true,
                "source": source,
                "masked": SecretService::mask_secret(value),
            }),
            None => serde_json::json!({"key": CREDENTIAL_KEY, "configured": false}),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!();
    match resolved {
        Some((value, source)) => println!(
            "  {} {} resolved from {} ({})",
            style("✓").green().bold(),
            style(CREDENTIAL_KEY).bold(),
            style(source).cyan(),
            SecretService::mask_secret(&value)
        ),
        None => println!(
            "  {} {} is not configured. Set it with: {}",
            style("✗").red().bold(),
            style(CREDENTIAL_KEY).bold(),
            style("llmp secret set").yellow()
        ),
    }
    println!();

    Ok(())
}

/// Remove the inference token from every writable backend.
///
/// Environment variables and `secrets.toml` are left alone; the token may
/// still resolve from them afterwards.
pub async fn delete_secret(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete stored {}?", style(CREDENTIAL_KEY).bold()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {}", style("Aborted.").dim());
            return Ok(());
        }
    }

    let removed = match state.secret_service.delete_secret(CREDENTIAL_KEY).await {
        Ok(removed) => removed,
        Err(SecretError::NotFound) => {
            anyhow::bail!("{CREDENTIAL_KEY} is not stored in any writable backend")
        }
        Err(e) => return Err(e.into()),
    };
    let still_resolves = state.secret_service.resolve(CREDENTIAL_KEY).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "deleted": true,
                "key": CREDENTIAL_KEY,
                "removed_from": removed,
                "still_resolves_from": still_resolves.as_ref().map(|(_, source)| source),
            })
        );
        return Ok(());
    }

    for source in &removed {
        println!(
            "  {} Deleted '{}' from {}",
            style("✓").green().bold(),
            style(CREDENTIAL_KEY).bold(),
            source
        );
    }
    if let Some((_, source)) = still_resolves {
        println!(
            "  {} {} still resolves from {}",
            style("!").yellow().bold(),
            style(CREDENTIAL_KEY).bold(),
            style(source).cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use playground_infra::secret::file::FileSecretProvider;
    use playground_types::config::PlaygroundConfig;

    #[tokio::test]
    async fn test_delete_with_only_read_only_backends_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secrets.toml"), "HF_TOKEN = \"hf_file\"\n").unwrap();
        let state = AppState {
            config: PlaygroundConfig::default(),
            secret_service: Arc::new(SecretService::new(vec![Arc::new(
                FileSecretProvider::in_data_dir(dir.path()),
            )])),
            data_dir: dir.path().to_path_buf(),
        };

        let err = delete_secret(&state, true, true).await.unwrap_err();
        assert!(err.to_string().contains("not stored in any writable backend"));
        // The file copy is untouched.
        assert!(state.secret_service.resolve(CREDENTIAL_KEY).await.unwrap().is_some());
    }
}
