//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting. During streaming, tokens are printed raw; `/history`
//! re-renders committed turns as formatted markdown.

use std::io::Write;
use std::time::Duration;

use console::style;
use crossterm::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use playground_types::chat::{MessageRole, Turn};

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    /// Create a new renderer with an optional accent color.
    pub fn new(accent_color: Option<Color>) -> Self {
        let mut skin = MadSkin::default_dark();

        if let Some(color) = accent_color {
            let tc = Self::crossterm_to_termimad(color);
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
        }

        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a complete markdown reply with syntax-highlighted code blocks.
    ///
    /// Code fences are highlighted via syntect; everything else is rendered
    /// through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Write the header that precedes a streamed reply.
    pub fn write_reply_header<W: Write>(&self, out: &mut W) {
        let _ = write!(out, "\n  {} ", style("Bot").cyan().bold());
        let _ = out.flush();
    }

    /// Write a single streaming token (raw, no formatting).
    pub fn write_streaming_token<W: Write>(&self, out: &mut W, token: &str) {
        let _ = write!(out, "{token}");
        let _ = out.flush();
    }

    /// Write the stats footer after a reply.
    ///
    /// Format: "| {tokens} tokens . {time}s . {model}"
    pub fn write_stats_footer<W: Write>(
        &self,
        out: &mut W,
        tokens: Option<u32>,
        elapsed: Duration,
        model: &str,
    ) {
        let tokens = tokens.map_or_else(|| "?".to_string(), |t| t.to_string());
        let _ = writeln!(
            out,
            "\n  {} {} tokens {} {:.1}s {} {}",
            style("|").dim(),
            style(tokens).dim(),
            style("\u{00b7}").dim(),
            style(elapsed.as_secs_f64()).dim(),
            style("\u{00b7}").dim(),
            style(model).dim(),
        );
    }

    /// Print one committed turn with its timestamp, rendered as markdown.
    pub fn print_turn(&self, turn: &Turn) {
        let label = match turn.role() {
            MessageRole::User => style(turn.label()).green().bold(),
            MessageRole::Assistant => style(turn.label()).cyan().bold(),
        };
        println!(
            "  {} {}",
            style(format!("[{}]", turn.formatted_timestamp())).dim(),
            label
        );
        let rendered = self.render_final(turn.content());
        for line in rendered.trim_end().lines() {
            println!("    {line}");
        }
        println!();
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let Some(theme) = self.theme_set.themes.get("base16-ocean.dark") else {
            return code.to_string();
        };
        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }

    fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
        match color {
            Color::Cyan => termimad::crossterm::style::Color::Cyan,
            Color::Green => termimad::crossterm::style::Color::Green,
            Color::Yellow => termimad::crossterm::style::Color::Yellow,
            Color::Magenta => termimad::crossterm::style::Color::Magenta,
            Color::Blue => termimad::crossterm::style::Color::Blue,
            Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
            _ => termimad::crossterm::style::Color::Cyan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_final_highlights_code_fence() {
        let renderer = ChatRenderer::new(None);
        let out = renderer.render_final("Here:\n```rust\nfn main() {}\n```\n");
        assert!(out.contains("--- rust ---"));
        assert!(out.contains("main"));
    }

    #[test]
    fn test_render_final_unclosed_fence() {
        let renderer = ChatRenderer::new(Some(Color::Cyan));
        let out = renderer.render_final("```\nlet x = 1;");
        assert!(out.contains("let x = 1;"));
    }
}
