//! CLI command definitions and dispatch for the `llmp` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod models;
pub mod secret;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with hosted open-weight models from your terminal.
#[derive(Parser)]
#[command(name = "llmp", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Model identifier (defaults to `default_model` from config.toml).
        #[arg(long, short)]
        model: Option<String>,

        /// Maximum tokens per reply.
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// List the configured models.
    Models,

    /// Manage the inference token.
    Secret {
        #[command(subcommand)]
        action: secret::SecretCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
