//! # Console Renderer
//!
//! Line-oriented rendering for the headless driver.

use super::ViewRenderer;
use crate::widget::events::ViewEvent;
use crate::widget::models::MessageIcon;
use crate::widget::view_models::ModalViewModel;
use anyhow::Result;
use std::io::Write;

fn icon_glyph(icon: MessageIcon) -> &'static str {
    match icon {
        MessageIcon::Check => "✔",
        MessageIcon::Cross => "✖",
    }
}

/// Writes outcome lines (and, when verbose, lifecycle lines) to a writer
pub struct ConsoleRenderer<W: Write> {
    writer: W,
    verbose: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(writer: W, verbose: bool) -> Self {
        Self { writer, verbose }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn detail(&mut self, line: &str) -> Result<()> {
        if self.verbose {
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }
}

impl<W: Write> ViewRenderer for ConsoleRenderer<W> {
    fn render_full(&mut self, view_model: &ModalViewModel) -> Result<()> {
        self.detail(&format!("[{}]", view_model.phase().name()))
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ModalViewModel) -> Result<()> {
        match event {
            ViewEvent::ModalMountRequired => self.detail("Newsletter form opened")?,
            ViewEvent::FormStateChanged => {
                let form = view_model.form();
                let state = if form.email_valid { "valid" } else { "invalid" };
                self.detail(&format!("Email '{}' is {}", form.email, state))?;
            }
            ViewEvent::FormFadeOutRequired => self.detail("Fading out form")?,
            ViewEvent::FormFaded => {
                self.detail(&format!("Submitting {}...", view_model.form().email))?
            }
            ViewEvent::MessageSummaryAppended => {
                if let Some(summary) = view_model.message_box().summary {
                    writeln!(self.writer, "{} {}", icon_glyph(summary.icon()), summary.text())?;
                }
            }
            ViewEvent::MarkupUnavailable { reason } => {
                writeln!(self.writer, "Newsletter signup unavailable: {reason}")?;
            }
            ViewEvent::ModalRemovalRequired => self.detail("Newsletter form closed")?,
            ViewEvent::FocusEmailRequired
            | ViewEvent::MessageBoxSized { .. }
            | ViewEvent::ContainerFadeRequired { .. } => {}
        }
        self.writer.flush()?;
        Ok(())
    }

    /// The headless driver activates the trigger itself
    fn has_trigger(&self) -> bool {
        true
    }
}
