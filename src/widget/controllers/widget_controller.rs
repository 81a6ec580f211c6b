//! # Widget Controller
//!
//! Connects user input to the view model, runs the two remote calls and the
//! widget timers on spawned tasks, and forwards view events to the renderer.
//!
//! Spawned work reports back through an mpsc channel. Every message carries
//! the session it was started under; the controller drops messages whose
//! session is no longer mounted.

use crate::config::{WidgetConfig, FADE_DURATION, DISMISS_DELAY, SUMMARY_TICK};
use crate::widget::error::{SubmitError, WidgetError};
use crate::widget::events::{ModalPhase, Outcome, SessionId, WidgetInput};
use crate::widget::models::{FormFields, ModalMarkup};
use crate::widget::services::NewsletterBackend;
use crate::widget::view_models::ModalViewModel;
use crate::widget::views::ViewRenderer;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;

/// Results of spawned work, delivered back to the controller
#[derive(Debug)]
pub enum ControllerMessage {
    /// Markup fetch finished
    MarkupFetched(Result<String, WidgetError>),
    /// Form of `session` finished fading out; its fields can be posted
    FormFadeComplete {
        session: SessionId,
        fields: FormFields,
    },
    /// Endpoint replied to the attempt of `session`
    SubmissionReplied {
        session: SessionId,
        result: Result<(), SubmitError>,
    },
    /// Zero-delay tick after the message box was sized
    SummaryTick { session: SessionId },
    /// Time to start closing a resolved modal
    DismissDue { session: SessionId },
    /// Container fade finished
    FadeComplete { session: SessionId },
}

/// Timings the controller schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTimings {
    pub fade: Duration,
    pub dismiss: Duration,
    pub summary_tick: Duration,
}

impl WidgetTimings {
    /// Delay before the closing fade starts, so that removal lands exactly
    /// `dismiss` after the outcome is displayed
    pub fn fade_start(&self) -> Duration {
        self.dismiss.saturating_sub(self.fade)
    }
}

impl Default for WidgetTimings {
    fn default() -> Self {
        Self {
            fade: FADE_DURATION,
            dismiss: DISMISS_DELAY,
            summary_tick: SUMMARY_TICK,
        }
    }
}

impl From<&WidgetConfig> for WidgetTimings {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            fade: config.fade_duration(),
            dismiss: config.dismiss_delay(),
            summary_tick: SUMMARY_TICK,
        }
    }
}

/// Controller for one newsletter widget on one embedding surface
pub struct WidgetController<B: NewsletterBackend, R: ViewRenderer> {
    view_model: ModalViewModel,
    renderer: R,
    backend: B,
    timings: WidgetTimings,
    trigger_attached: bool,
    message_sender: mpsc::Sender<ControllerMessage>,
    message_receiver: mpsc::Receiver<ControllerMessage>,
}

impl<B: NewsletterBackend, R: ViewRenderer> WidgetController<B, R> {
    /// Create a controller with default timings
    pub fn new(backend: B, renderer: R) -> Self {
        Self::with_view_model(backend, renderer, ModalViewModel::new(), WidgetTimings::default())
    }

    /// Create a controller from resolved configuration
    pub fn from_config(config: &WidgetConfig, backend: B, renderer: R) -> Self {
        Self::with_view_model(
            backend,
            renderer,
            ModalViewModel::with_form_height(config.form_height_px()),
            WidgetTimings::from(config),
        )
    }

    /// Create a controller with an injected view model and timings
    pub fn with_view_model(
        backend: B,
        renderer: R,
        view_model: ModalViewModel,
        timings: WidgetTimings,
    ) -> Self {
        let (message_sender, message_receiver) = mpsc::channel(16);
        Self {
            view_model,
            renderer,
            backend,
            timings,
            trigger_attached: false,
            message_sender,
            message_receiver,
        }
    }

    pub fn view_model(&self) -> &ModalViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut ModalViewModel {
        &mut self.view_model
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn phase(&self) -> ModalPhase {
        self.view_model.phase()
    }

    pub fn is_trigger_attached(&self) -> bool {
        self.trigger_attached
    }

    // === Operations ===

    /// Bind trigger activation to `open_modal`. A second call is a no-op.
    ///
    /// Fails when the embedding surface has no trigger to bind to.
    pub fn attach_trigger(&mut self) -> Result<(), WidgetError> {
        if self.trigger_attached {
            tracing::debug!("Newsletter trigger already attached");
            return Ok(());
        }
        if !self.renderer.has_trigger() {
            tracing::warn!("No newsletter trigger on the embedding page");
            return Err(WidgetError::TriggerMissing);
        }
        self.trigger_attached = true;
        tracing::debug!("Newsletter trigger attached");
        Ok(())
    }

    /// Dispatch one user interaction
    pub fn handle_input(&mut self, input: WidgetInput) -> Result<()> {
        tracing::debug!("Received widget input: {:?}", input);
        let result = match input {
            WidgetInput::TriggerActivated => self.open_modal(),
            WidgetInput::EmailChanged(value) => self.validate(&value).map(|_| ()),
            WidgetInput::SubmitRequested => self.submit(),
            WidgetInput::CloseRequested => {
                self.close_form();
                Ok(())
            }
            WidgetInput::FormResized { height_px } => {
                self.view_model.set_form_height(height_px);
                Ok(())
            }
        };
        self.process_view_events()?;
        result.map_err(anyhow::Error::from)
    }

    /// Fetch the modal markup in the background.
    ///
    /// Ignored while a modal is open or loading.
    pub fn open_modal(&mut self) -> Result<(), WidgetError> {
        if !self.trigger_attached {
            return Err(WidgetError::TriggerNotAttached);
        }
        if !self.view_model.begin_loading() {
            return Ok(());
        }

        let backend = self.backend.clone();
        let sender = self.message_sender.clone();
        tokio::spawn(async move {
            let result = backend.fetch_markup().await;
            // Ignore send errors (controller might have been dropped)
            let _ = sender.send(ControllerMessage::MarkupFetched(result)).await;
        });
        Ok(())
    }

    /// Re-validate the email after a keystroke
    pub fn validate(&mut self, value: &str) -> Result<bool, WidgetError> {
        self.view_model.update_email(value)
    }

    /// Fade the form out; the signup is posted once the fade completes
    pub fn submit(&mut self) -> Result<(), WidgetError> {
        let fields = self.view_model.begin_submission()?;
        let session = self.view_model.session();
        self.schedule(
            self.timings.fade,
            ControllerMessage::FormFadeComplete { session, fields },
        );
        Ok(())
    }

    fn post(&self, session: SessionId, fields: FormFields) {
        let backend = self.backend.clone();
        let sender = self.message_sender.clone();
        tokio::spawn(async move {
            let result = backend.submit(fields).await;
            let _ = sender
                .send(ControllerMessage::SubmissionReplied { session, result })
                .await;
        });
    }

    /// Fade the container out; it is removed once the fade completes
    pub fn close_form(&mut self) {
        if !self.view_model.begin_close(self.timings.fade) {
            return;
        }
        let session = self.view_model.session();
        self.schedule(self.timings.fade, ControllerMessage::FadeComplete { session });
    }

    // === Spawned work ===

    fn schedule(&self, delay: Duration, message: ControllerMessage) {
        let sender = self.message_sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(message).await;
        });
    }

    /// Apply the result of spawned work
    pub fn handle_message(&mut self, message: ControllerMessage) -> Result<()> {
        match message {
            ControllerMessage::MarkupFetched(result) => self.apply_markup(result),
            ControllerMessage::FormFadeComplete { session, fields } => {
                if self.view_model.is_current(session) && self.view_model.complete_form_fade() {
                    self.post(session, fields);
                } else {
                    tracing::debug!("Abandoned signup of session {} not sent", session.value());
                }
            }
            ControllerMessage::SubmissionReplied { session, result } => {
                if self.view_model.is_current(session) {
                    if let Some(outcome) = self.view_model.resolve_submission(&result) {
                        self.schedule_dismissal(session, outcome);
                    }
                } else {
                    tracing::debug!("Dropping reply for closed session {}", session.value());
                }
            }
            ControllerMessage::SummaryTick { session } => {
                if self.view_model.is_current(session) {
                    self.view_model.append_summary();
                }
            }
            ControllerMessage::DismissDue { session } => {
                if self.view_model.is_current(session) {
                    self.close_form();
                }
            }
            ControllerMessage::FadeComplete { session } => {
                if self.view_model.is_current(session) {
                    self.view_model.unmount();
                }
            }
        }
        self.process_view_events()
    }

    fn apply_markup(&mut self, result: Result<String, WidgetError>) {
        if self.view_model.phase() != ModalPhase::Loading {
            tracing::debug!("Dropping markup that nobody is waiting for");
            return;
        }
        match result.and_then(|html| ModalMarkup::parse(&html).map_err(WidgetError::from)) {
            Ok(markup) => {
                self.view_model.mount(markup);
            }
            Err(e) => self.view_model.loading_failed(&e),
        }
    }

    fn schedule_dismissal(&self, session: SessionId, outcome: Outcome) {
        tracing::debug!(
            "Dismissing {:?} outcome in {}ms",
            outcome,
            self.timings.dismiss.as_millis()
        );
        self.schedule(
            self.timings.summary_tick,
            ControllerMessage::SummaryTick { session },
        );
        self.schedule(
            self.timings.fade_start(),
            ControllerMessage::DismissDue { session },
        );
    }

    /// Wait for and apply the next message from spawned work
    pub async fn process_next_message(&mut self) -> Result<()> {
        // The controller holds a sender, so the channel never closes
        if let Some(message) = self.message_receiver.recv().await {
            self.handle_message(message)?;
        }
        Ok(())
    }

    /// Apply messages until the widget waits on the user again: the modal is
    /// open for input, or closed
    pub async fn settle(&mut self) -> Result<ModalPhase> {
        while !matches!(self.phase(), ModalPhase::Open | ModalPhase::Closed) {
            self.process_next_message().await?;
        }
        Ok(self.phase())
    }

    /// Drive a whole signup the way a visitor would: open the modal, type
    /// the email one keystroke at a time, submit, and wait until the modal
    /// has been dismissed.
    pub async fn sign_up(&mut self, email: &str) -> Result<Outcome> {
        self.attach_trigger()?;
        self.handle_input(WidgetInput::TriggerActivated)?;
        if self.settle().await? != ModalPhase::Open {
            anyhow::bail!("Newsletter modal could not be opened");
        }

        let mut typed = String::with_capacity(email.len());
        for ch in email.chars() {
            typed.push(ch);
            self.handle_input(WidgetInput::EmailChanged(typed.clone()))?;
        }
        if let Err(e) = self.handle_input(WidgetInput::SubmitRequested) {
            self.handle_input(WidgetInput::CloseRequested)?;
            self.settle().await?;
            return Err(e);
        }

        let outcome = loop {
            if let ModalPhase::Resolved(outcome) = self.phase() {
                break outcome;
            }
            if self.phase() == ModalPhase::Closed {
                anyhow::bail!("Newsletter modal closed before the signup resolved");
            }
            self.process_next_message().await?;
        };
        self.settle().await?;
        Ok(outcome)
    }

    fn process_view_events(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        for event in &view_events {
            self.renderer.handle_view_event(event, &self.view_model)?;
        }
        Ok(())
    }
}
