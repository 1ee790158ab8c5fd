//! Terminal implementation of the chat display port.
//!
//! Shows a "Thinking..." spinner while the request is outstanding, writes
//! fragments raw as they arrive, and closes each turn with a stats footer
//! or an inline error. Everything goes through the supplied writer, which
//! in the chat loop is the readline `SharedWriter` so the live prompt is
//! redrawn below the reply instead of inside it.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use playground_core::chat::display::DisplaySink;
use playground_core::chat::service::TurnOutcome;
use playground_types::error::ChatError;

use super::renderer::ChatRenderer;

pub struct TerminalSink<'a, W: Write> {
    renderer: &'a ChatRenderer,
    out: W,
    model: String,
    spinner: Option<ProgressBar>,
    replying: bool,
}

impl<'a, W: Write> TerminalSink<'a, W> {
    pub fn new(renderer: &'a ChatRenderer, out: W, model: impl Into<String>) -> Self {
        Self {
            renderer,
            out,
            model: model.into(),
            spinner: None,
            replying: false,
        }
    }

    /// Tear down after the turn future was dropped mid-flight.
    pub fn cancel(&mut self) {
        self.stop_spinner();
        if self.replying {
            let _ = writeln!(self.out);
        }
        let _ = writeln!(
            self.out,
            "\n  {} {}\n",
            style("!").yellow().bold(),
            style("Reply cancelled.").dim()
        );
        let _ = self.out.flush();
        self.replying = false;
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl<W: Write> DisplaySink for TerminalSink<'_, W> {
    fn on_request_started(&mut self) {
        self.replying = false;
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("Thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn on_fragment(&mut self, fragment: &str) {
        if !self.replying {
            self.stop_spinner();
            self.renderer.write_reply_header(&mut self.out);
            self.replying = true;
        }
        self.renderer.write_streaming_token(&mut self.out, fragment);
    }

    fn on_finished(&mut self, outcome: &TurnOutcome) {
        self.stop_spinner();
        if self.replying {
            let _ = writeln!(self.out);
        }

        match outcome {
            TurnOutcome::Completed { stats, .. } => {
                let tokens = stats.usage.map(|u| u.output_tokens);
                self.renderer
                    .write_stats_footer(&mut self.out, tokens, stats.elapsed, &self.model);
                let _ = writeln!(self.out);
            }
            TurnOutcome::Failed {
                error, committed, ..
            } => {
                let hint = match error {
                    ChatError::Authentication(_) => {
                        "Check your token with `llmp secret status`."
                    }
                    _ => "Type a message to try again, /exit to quit.",
                };
                let _ = writeln!(self.out, "\n  {} {error}", style("!").red().bold());
                if committed.is_some() {
                    let _ = writeln!(
                        self.out,
                        "  {}",
                        style("The partial reply above was kept in the history.").dim()
                    );
                }
                let _ = writeln!(self.out, "  {}\n", style(hint).dim());
            }
        }

        let _ = self.out.flush();
        self.replying = false;
    }
}
