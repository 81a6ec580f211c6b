//! # Modal ViewModel
//!
//! All state of one modal instance. The view model never touches the
//! document; it records what changed as `ViewEvent`s and lets the renderer
//! reconcile the document from its accessors.

use crate::config::{DEFAULT_FORM_HEIGHT_PX, MESSAGE_BOX_EXTRA_HEIGHT_PX};
use crate::widget::error::{SubmitError, WidgetError};
use crate::widget::events::{EventBus, ModalPhase, ModelEvent, Outcome, SessionId, ViewEvent};
use crate::widget::models::{
    is_valid_email, EmailAddress, FormFields, MessageSummary, ModalMarkup, SignupAttempt,
    SubmissionStatus,
};
use std::time::Duration;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

/// State of the signup form inside the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub email_valid: bool,
    /// Error styling on `#newsletterEmail`
    pub email_error: bool,
    pub email_focused: bool,
    pub submit_enabled: bool,
    pub visible: bool,
    pub fading_out: bool,
    /// Fade finished; the form is transparent until it is hidden
    pub faded: bool,
    pub height_px: u32,
}

impl FormState {
    fn new(height_px: u32) -> Self {
        Self {
            email: String::new(),
            email_valid: false,
            email_error: false,
            email_focused: false,
            // The fragment ships the button disabled until a valid keystroke
            submit_enabled: false,
            visible: true,
            fading_out: false,
            faded: false,
            height_px,
        }
    }
}

/// State of `.message-box`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBoxState {
    pub height_px: Option<u32>,
    /// Outcome class on the box itself
    pub class: Option<&'static str>,
    pub summary: Option<MessageSummary>,
    /// Summary built but waiting for the next tick
    pending: Option<MessageSummary>,
}

/// View model for the newsletter modal
pub struct ModalViewModel {
    phase: ModalPhase,
    session: SessionId,
    markup: Option<ModalMarkup>,
    form: FormState,
    message_box: MessageBoxState,
    attempt: Option<SignupAttempt>,
    container_fade: Option<Duration>,
    default_form_height_px: u32,
    pending_view_events: Vec<ViewEvent>,
    event_bus: EventBusOption,
}

impl ModalViewModel {
    pub fn new() -> Self {
        Self::with_form_height(DEFAULT_FORM_HEIGHT_PX)
    }

    pub fn with_form_height(form_height_px: u32) -> Self {
        Self {
            phase: ModalPhase::Closed,
            session: SessionId::initial(),
            markup: None,
            form: FormState::new(form_height_px),
            message_box: MessageBoxState::default(),
            attempt: None,
            container_fade: None,
            default_form_height_px: form_height_px,
            pending_view_events: Vec::new(),
            event_bus: None,
        }
    }

    /// Set event bus for publishing model and view events
    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
    }

    // === Accessors ===

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Whether a message for `session` still belongs to the mounted modal
    pub fn is_current(&self, session: SessionId) -> bool {
        self.session == session && self.phase.is_mounted()
    }

    pub fn markup(&self) -> Option<&ModalMarkup> {
        self.markup.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn message_box(&self) -> &MessageBoxState {
        &self.message_box
    }

    pub fn attempt(&self) -> Option<&SignupAttempt> {
        self.attempt.as_ref()
    }

    /// Fade in progress on the container, if any
    pub fn container_fade(&self) -> Option<Duration> {
        self.container_fade
    }

    /// Text currently shown in the message box
    pub fn message_text(&self) -> Option<&'static str> {
        self.message_box.summary.map(|summary| summary.text())
    }

    // === Lifecycle ===

    /// Start loading the markup. Returns false when a modal is already
    /// open or loading.
    pub fn begin_loading(&mut self) -> bool {
        if self.phase != ModalPhase::Closed {
            tracing::debug!("Trigger ignored while modal is {}", self.phase.name());
            return false;
        }
        self.set_phase(ModalPhase::Loading);
        true
    }

    /// Markup could not be fetched or did not honour the DOM contract
    pub fn loading_failed(&mut self, error: &WidgetError) {
        tracing::warn!("Newsletter modal not shown: {}", error);
        if self.phase == ModalPhase::Loading {
            self.set_phase(ModalPhase::Closed);
        }
        self.emit_view_event([ViewEvent::MarkupUnavailable {
            reason: error.to_string(),
        }]);
    }

    /// Insert the modal at the start of the body and focus the email input
    pub fn mount(&mut self, markup: ModalMarkup) -> SessionId {
        self.session = self.session.next();
        self.markup = Some(markup);
        self.form = FormState::new(self.default_form_height_px);
        self.form.email_focused = true;
        self.message_box = MessageBoxState::default();
        self.attempt = None;
        self.container_fade = None;

        self.set_phase(ModalPhase::Open);
        self.emit_model_event(ModelEvent::ModalMounted {
            session: self.session,
        });
        self.emit_view_event([ViewEvent::ModalMountRequired, ViewEvent::FocusEmailRequired]);
        tracing::debug!("Modal mounted as session {}", self.session.value());
        self.session
    }

    /// Host reported the rendered height of the form
    pub fn set_form_height(&mut self, height_px: u32) {
        self.form.height_px = height_px;
    }

    // === Validation ===

    /// Re-validate after a keystroke in the email field
    pub fn update_email(&mut self, value: &str) -> Result<bool, WidgetError> {
        if self.phase != ModalPhase::Open {
            return Err(WidgetError::NotOpen);
        }

        let valid = is_valid_email(value);
        self.form.email = value.to_string();
        self.form.email_valid = valid;
        self.form.submit_enabled = valid;
        self.form.email_error = !valid;

        self.emit_model_event(ModelEvent::EmailValidated { valid });
        self.emit_view_event([ViewEvent::FormStateChanged]);
        Ok(valid)
    }

    // === Submission ===

    /// Start an attempt with the current email and return the fields to post
    pub fn begin_submission(&mut self) -> Result<FormFields, WidgetError> {
        match self.phase {
            ModalPhase::Open => {}
            ModalPhase::Submitting => return Err(WidgetError::SubmissionInFlight),
            _ => return Err(WidgetError::NotOpen),
        }

        let email = EmailAddress::parse(&self.form.email)?;
        let fields = match &self.markup {
            Some(markup) => markup.form_fields(&email),
            None => return Err(WidgetError::NotOpen),
        };

        self.emit_model_event(ModelEvent::SubmissionStarted {
            email: email.to_string(),
        });
        self.attempt = Some(SignupAttempt::new(email));
        self.form.fading_out = true;
        self.form.submit_enabled = false;
        self.set_phase(ModalPhase::Submitting);
        self.emit_view_event([ViewEvent::FormFadeOutRequired]);
        Ok(fields)
    }

    /// The form finished fading out; the POST may go now.
    ///
    /// Returns false when the attempt was abandoned during the fade.
    pub fn complete_form_fade(&mut self) -> bool {
        if self.phase != ModalPhase::Submitting || !self.form.fading_out {
            tracing::debug!("Form fade finished while modal is {}", self.phase.name());
            return false;
        }
        self.form.fading_out = false;
        self.form.faded = true;
        self.emit_view_event([ViewEvent::FormFaded]);
        true
    }

    /// Record the endpoint reply and display the outcome.
    ///
    /// Returns `None` when no attempt is waiting for a reply.
    pub fn resolve_submission(&mut self, result: &Result<(), SubmitError>) -> Option<Outcome> {
        if self.phase != ModalPhase::Submitting {
            tracing::debug!("Dropping reply while modal is {}", self.phase.name());
            return None;
        }
        let attempt = self.attempt.as_mut()?;
        let outcome = attempt.resolve(result);
        let status = attempt.status();
        let error_code = attempt.error_code();

        self.emit_model_event(ModelEvent::SubmissionResolved {
            outcome,
            error_code,
        });
        self.display_message(self.form.height_px, status);
        Some(outcome)
    }

    /// Replace the form with the outcome summary.
    ///
    /// The message box grows to `box_height_px` plus a fixed margin right
    /// away; the summary itself is appended by `append_summary` on the next
    /// tick.
    pub fn display_message(&mut self, box_height_px: u32, status: SubmissionStatus) {
        let outcome = match status {
            SubmissionStatus::Success => Outcome::Success,
            SubmissionStatus::Failed { error_code } => Outcome::from_error_code(error_code),
            SubmissionStatus::Unsubmitted => {
                tracing::debug!("No outcome to display for an unsubmitted attempt");
                return;
            }
        };

        let summary = MessageSummary::for_outcome(outcome);
        let height_px = box_height_px + MESSAGE_BOX_EXTRA_HEIGHT_PX;

        self.form.visible = false;
        self.form.fading_out = false;
        self.form.email_focused = false;
        self.message_box.height_px = Some(height_px);
        self.message_box.class = summary.box_class();
        self.message_box.pending = Some(summary);
        self.set_phase(ModalPhase::Resolved(outcome));
        self.emit_view_event([ViewEvent::MessageBoxSized { height_px }]);
        tracing::info!("Signup outcome: {:?}", outcome);
    }

    /// Append the pending summary to the message box
    pub fn append_summary(&mut self) -> bool {
        if !matches!(self.phase, ModalPhase::Resolved(_)) {
            return false;
        }
        match self.message_box.pending.take() {
            Some(summary) => {
                self.message_box.summary = Some(summary);
                self.emit_view_event([ViewEvent::MessageSummaryAppended]);
                true
            }
            None => false,
        }
    }

    // === Closing ===

    /// Start fading the container. Returns false when there is nothing to
    /// close or a fade is already running.
    pub fn begin_close(&mut self, fade: Duration) -> bool {
        if !self.phase.is_mounted() || self.phase == ModalPhase::Closing {
            return false;
        }
        self.container_fade = Some(fade);
        self.form.email_focused = false;
        self.set_phase(ModalPhase::Closing);
        self.emit_view_event([ViewEvent::ContainerFadeRequired { duration: fade }]);
        true
    }

    /// Remove the container and discard the attempt
    pub fn unmount(&mut self) {
        if !self.phase.is_mounted() {
            return;
        }
        if let Some(attempt) = self.attempt.take() {
            if !attempt.is_resolved() {
                tracing::debug!("Discarding unresolved signup attempt on close");
            }
        }
        self.markup = None;
        self.container_fade = None;
        self.message_box = MessageBoxState::default();
        self.form = FormState::new(self.default_form_height_px);

        self.set_phase(ModalPhase::Closed);
        self.emit_model_event(ModelEvent::ModalUnmounted {
            session: self.session,
        });
        self.emit_view_event([ViewEvent::ModalRemovalRequired]);
    }

    // === Events ===

    fn set_phase(&mut self, new_phase: ModalPhase) {
        let old_phase = self.phase;
        if old_phase == new_phase {
            return;
        }
        self.phase = new_phase;
        tracing::debug!("Modal phase {} -> {}", old_phase.name(), new_phase.name());
        self.emit_model_event(ModelEvent::PhaseChanged {
            old_phase,
            new_phase,
        });
    }

    fn emit_model_event(&mut self, event: ModelEvent) {
        if let Some(event_bus) = &mut self.event_bus {
            event_bus.publish_model_event(&event);
        }
    }

    /// Queue view events for the renderer
    pub fn emit_view_event(&mut self, events: impl IntoIterator<Item = ViewEvent>) {
        for event in events {
            if let Some(event_bus) = &mut self.event_bus {
                event_bus.publish_view_event(&event);
            }
            self.pending_view_events.push(event);
        }
    }

    /// Take all queued view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}

impl Default for ModalViewModel {
    fn default() -> Self {
        Self::new()
    }
}
