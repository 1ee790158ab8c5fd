//! Slash command parsing and help for the chat loop.
//!
//! Commands start with `/` and cover the session controls: clearing and
//! exporting history, switching models, and leaving.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation history.
    Clear,
    /// Write the conversation to a file (default `conversation.txt`).
    Export(Option<String>),
    /// Show the current model, or switch to another.
    Model(Option<String>),
    /// List the configured models.
    Models,
    /// Show the conversation so far.
    History,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, Some(rest.trim()).filter(|a| !a.is_empty())),
        None => (trimmed, None),
    };
    let arg = arg.map(str::to_string);

    match cmd.to_lowercase().as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/reset" => Some(ChatCommand::Clear),
        "/export" | "/save" => Some(ChatCommand::Export(arg)),
        "/model" => Some(ChatCommand::Model(arg)),
        "/models" => Some(ChatCommand::Models),
        "/history" => Some(ChatCommand::History),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear chat history"),
        ("/export [path]", "Save the conversation (default conversation.txt)"),
        ("/model [id|#]", "Show or switch the model"),
        ("/models", "List configured models"),
        ("/history", "Show the conversation so far"),
        ("/exit", "End the chat session"),
    ];
    for (cmd, desc) in rows {
        println!("  {:<16} {}", style(cmd).cyan(), desc);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+C cancels a reply in progress, Ctrl+D exits").dim()
    );
    println!();
}
