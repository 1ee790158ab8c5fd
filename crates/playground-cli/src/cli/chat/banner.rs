//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(model: &str, max_tokens: u32, session_id: &str) {
    println!();
    println!("  * {}", style("LLM Playground").cyan().bold());
    println!("  {}", style("Chat with hosted open-weight models").dim());
    println!();
    println!("  {}   {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Tokens:").bold(), style(max_tokens).dim());
    println!(
        "  {} {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
