//! # View Layer
//!
//! Views turn the modal view model into something a user can see. They
//! receive view events from the controller and reconcile their output from
//! the view model's state; they never change that state themselves.

use crate::widget::events::ViewEvent;
use crate::widget::view_models::ModalViewModel;
use anyhow::Result;

pub mod console;
pub mod document;

pub use console::ConsoleRenderer;
pub use document::{HostDocument, ModalElement, EMAIL_ERROR_CLASS};

/// Trait for rendering views
pub trait ViewRenderer {
    /// Render the complete modal state
    fn render_full(&mut self, view_model: &ModalViewModel) -> Result<()>;

    /// Handle view events
    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ModalViewModel) -> Result<()>;

    /// Whether the surface exposes `#newsletterTrigger`
    fn has_trigger(&self) -> bool;
}
