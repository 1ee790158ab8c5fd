//! Main chat loop orchestration.
//!
//! Resolves the credential, builds the chat service, prints the banner,
//! and alternates between reading a line and running one streamed turn.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use crossterm::style::Color;
use secrecy::SecretString;
use tracing::{info, warn};

use playground_core::chat::service::ChatService;
use playground_core::chat::session::Session;
use playground_infra::filesystem::{DEFAULT_EXPORT_FILE, write_export};
use playground_infra::llm::huggingface::HuggingFaceProvider;
use playground_infra::llm::huggingface::config::HuggingFaceConfig;
use playground_types::config::CREDENTIAL_KEY;
use playground_types::error::ChatError;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;
use super::sink::TerminalSink;

/// Look up the inference token. Its absence ends startup.
async fn resolve_credential(state: &AppState) -> anyhow::Result<SecretString> {
    match state.secret_service.resolve(CREDENTIAL_KEY).await? {
        Some((value, source)) => {
            info!(%source, "Inference token resolved");
            Ok(SecretString::from(value))
        }
        None => Err(ChatError::Configuration(format!(
            "{CREDENTIAL_KEY} not found. Export {CREDENTIAL_KEY}, run `llmp secret set`, \
             or add it to {}",
            state.data_dir.join("secrets.toml").display()
        ))
        .into()),
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    model: Option<String>,
    max_tokens: Option<u32>,
) -> anyhow::Result<()> {
    let config = &state.config;
    let credential = resolve_credential(state).await?;

    let model = model.unwrap_or_else(|| config.default_model.clone());
    let max_tokens = max_tokens.filter(|t| *t > 0).unwrap_or(config.max_tokens);

    let provider = Arc::new(HuggingFaceProvider::new(HuggingFaceConfig::from(config)));
    let base_url = provider.base_url().to_string();
    let mut chat = ChatService::new(provider, credential, model, max_tokens)
        .with_partial_commit(config.partial_commit);
    let mut session = Session::new();
    info!(
        provider = chat.provider_name(),
        %base_url,
        model = %chat.model(),
        max_tokens = chat.max_tokens(),
        partial_commit = %chat.partial_commit(),
        "Chat session started"
    );

    print_welcome_banner(chat.model(), chat.max_tokens(), &session.id().to_string());

    let renderer = ChatRenderer::new(Some(Color::Cyan));
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => {
                    session.clear();
                    chat_input.clear();
                    println!("\n  {} {}\n", style("✓").green().bold(), style("Chat history cleared.").dim());
                }
                ChatCommand::Export(path) => export_session(&session, path).await,
                ChatCommand::Model(None) => {
                    println!("\n  {}  {}\n", style("Model:").bold(), style(chat.model()).cyan());
                }
                ChatCommand::Model(Some(choice)) => {
                    let next = resolve_model_choice(&config.models, &choice);
                    chat.set_model(next);
                    println!("\n  {} Now using {}\n", style("✓").green().bold(), style(chat.model()).cyan());
                }
                ChatCommand::Models => print_models(&config.models, chat.model()),
                ChatCommand::History => {
                    println!();
                    if session.is_empty() {
                        println!("  {}\n", style("No messages yet.").dim());
                    }
                    for turn in session.turns() {
                        renderer.print_turn(turn);
                    }
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let mut sink = TerminalSink::new(&renderer, writer.clone(), chat.model());
        let result = tokio::select! {
            result = chat.send(&mut session, &text, &mut sink) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
            event = chat_input.wait_for_interrupt() => {
                if matches!(event, InputEvent::Eof) {
                    info!("EOF while streaming, cancelling turn");
                }
                None
            }
        };

        match result {
            Some(Ok(_outcome)) => {}
            Some(Err(e)) => {
                println!("\n  {} {e}\n", style("!").yellow().bold());
            }
            None => {
                warn!(
                    turns = session.len(),
                    last_role = ?session.last().map(|t| t.role()),
                    "Turn cancelled, keeping committed turns only"
                );
                sink.cancel();
            }
        }
    }

    info!(
        session_id = %session.id(),
        started_at = %session.started_at(),
        turns = session.len(),
        "Chat session finished"
    );
    Ok(())
}

/// `/model 2` picks the second configured model; anything else is an id.
fn resolve_model_choice(models: &[String], choice: &str) -> String {
    choice
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| models.get(i))
        .cloned()
        .unwrap_or_else(|| choice.to_string())
}

fn print_models(models: &[String], current: &str) {
    println!();
    for (i, model) in models.iter().enumerate() {
        let marker = if model == current { "*" } else { " " };
        println!("  {} {:>2}. {}", style(marker).green().bold(), i + 1, style(model).cyan());
    }
    if !models.iter().any(|m| m == current) {
        println!("  {}     {} (custom)", style("*").green().bold(), style(current).cyan());
    }
    println!();
}

async fn export_session(session: &Session, path: Option<String>) {
    let path = PathBuf::from(path.unwrap_or_else(|| DEFAULT_EXPORT_FILE.to_string()));
    match write_export(&path, &session.export()).await {
        Ok(()) => println!(
            "\n  {} Exported {} message{} to {}\n",
            style("✓").green().bold(),
            session.len(),
            if session.len() == 1 { "" } else { "s" },
            style(path.display()).cyan()
        ),
        Err(e) => println!(
            "\n  {} Failed to export to {}: {e}\n",
            style("!").red().bold(),
            path.display()
        ),
    }
}
