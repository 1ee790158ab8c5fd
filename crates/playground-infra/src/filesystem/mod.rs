//! Filesystem helpers: data directory resolution and conversation export.

use std::path::{Path, PathBuf};

/// Default file name for `/export` when no path is given.
pub const DEFAULT_EXPORT_FILE: &str = "conversation.txt";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `LLM_PLAYGROUND_DATA_DIR` environment variable
/// 2. `~/.llm-playground`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LLM_PLAYGROUND_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".llm-playground");
    }

    // Last resort: current directory
    PathBuf::from(".llm-playground")
}

/// Write an exported conversation to `path`, creating parent directories.
///
/// Overwrites any existing file.
pub async fn write_export(path: &Path, content: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Conversation exported");
    Ok(())
}
