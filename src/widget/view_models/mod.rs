//! # View Models
//!
//! Presentation state of the widget, independent of how it is rendered.

pub mod modal;

pub use modal::{FormState, MessageBoxState, ModalViewModel};
