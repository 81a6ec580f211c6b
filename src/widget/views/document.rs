//! # Host Document
//!
//! In-memory model of the embedding page's body. The modal container is
//! inserted at the start of the body on mount and removed on unmount; its
//! elements mirror the view model on every render.

use super::ViewRenderer;
use crate::widget::events::{SessionId, ViewEvent};
use crate::widget::models::{EMAIL_SELECTOR, TRIGGER_SELECTOR};
use crate::widget::view_models::ModalViewModel;
use anyhow::Result;
use std::time::Duration;

/// Class applied to `#newsletterEmail` while its value is invalid
pub const EMAIL_ERROR_CLASS: &str = "failed";

/// Id of the container the fragment is mounted into
pub const CONTAINER_ID: &str = "newsletterModal";

/// Class of the container the fragment is mounted into
pub const CONTAINER_CLASS: &str = "newsletterContainer";

/// Rendered state of the mounted modal container
#[derive(Debug, Clone, PartialEq)]
pub struct ModalElement {
    pub session: SessionId,
    pub markup_html: String,
    pub opacity: f32,
    pub fade: Option<Duration>,
    pub form_visible: bool,
    pub form_fading: bool,
    pub form_opacity: f32,
    pub email_value: String,
    pub email_classes: Vec<&'static str>,
    pub focused: Option<&'static str>,
    pub submit_disabled: bool,
    pub message_box_height: Option<u32>,
    pub message_box_classes: Vec<&'static str>,
    pub message_text: Option<&'static str>,
    pub message_box_html: String,
}

impl ModalElement {
    fn from_view_model(view_model: &ModalViewModel) -> Self {
        let form = view_model.form();
        let message_box = view_model.message_box();
        let fade = view_model.container_fade();

        Self {
            session: view_model.session(),
            markup_html: view_model
                .markup()
                .map(|markup| markup.html().to_string())
                .unwrap_or_default(),
            opacity: if fade.is_some() { 0.0 } else { 1.0 },
            fade,
            form_visible: form.visible,
            form_fading: form.fading_out,
            form_opacity: if form.faded { 0.0 } else { 1.0 },
            email_value: form.email.clone(),
            email_classes: if form.email_error {
                vec![EMAIL_ERROR_CLASS]
            } else {
                Vec::new()
            },
            focused: form.email_focused.then_some(EMAIL_SELECTOR),
            submit_disabled: !form.submit_enabled,
            message_box_height: message_box.height_px,
            message_box_classes: message_box.class.into_iter().collect(),
            message_text: message_box.summary.map(|summary| summary.text()),
            message_box_html: message_box
                .summary
                .map(|summary| summary.to_html())
                .unwrap_or_default(),
        }
    }

    pub fn email_has_class(&self, class: &str) -> bool {
        self.email_classes.contains(&class)
    }

    /// Inline style of `.message-box`, once it has been sized
    pub fn message_box_style(&self) -> Option<String> {
        self.message_box_height
            .map(|height| format!("height: {height}px; display: flex"))
    }

    fn container_html(&self) -> String {
        let style = match self.fade {
            Some(duration) => format!(
                "opacity: {}; transition: opacity {}ms",
                self.opacity,
                duration.as_millis()
            ),
            None => format!("opacity: {}", self.opacity),
        };
        format!(
            r#"<div id="{}" class="{}" data-session="{}" style="{}">{}</div>"#,
            CONTAINER_ID,
            CONTAINER_CLASS,
            self.session.value(),
            style,
            self.markup_html
        )
    }
}

/// Body of the embedding page
#[derive(Debug, Clone, PartialEq)]
pub struct HostDocument {
    page_body: String,
    modal: Option<ModalElement>,
    notices: Vec<String>,
    mount_count: usize,
}

impl HostDocument {
    pub fn new(page_body: impl Into<String>) -> Self {
        Self {
            page_body: page_body.into(),
            modal: None,
            notices: Vec::new(),
            mount_count: 0,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn modal(&self) -> Option<&ModalElement> {
        self.modal.as_ref()
    }

    pub fn message_text(&self) -> Option<&'static str> {
        self.modal.as_ref().and_then(|modal| modal.message_text)
    }

    /// Failures reported to the page instead of a modal
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Number of times a modal was inserted
    pub fn mount_count(&self) -> usize {
        self.mount_count
    }

    /// Body markup with the modal container, if any, first
    pub fn body_html(&self) -> String {
        match &self.modal {
            Some(modal) => format!("{}{}", modal.container_html(), self.page_body),
            None => self.page_body.clone(),
        }
    }
}

impl ViewRenderer for HostDocument {
    fn render_full(&mut self, view_model: &ModalViewModel) -> Result<()> {
        self.modal = view_model
            .phase()
            .is_mounted()
            .then(|| ModalElement::from_view_model(view_model));
        Ok(())
    }

    fn has_trigger(&self) -> bool {
        let id = TRIGGER_SELECTOR.trim_start_matches('#');
        self.page_body.contains(&format!(r#"id="{id}""#))
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ModalViewModel) -> Result<()> {
        match event {
            ViewEvent::ModalMountRequired => self.mount_count += 1,
            ViewEvent::MarkupUnavailable { reason } => self.notices.push(reason.clone()),
            _ => {}
        }
        self.render_full(view_model)
    }
}
