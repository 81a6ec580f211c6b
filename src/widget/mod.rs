//! # Newsletter Widget
//!
//! MVVM implementation of the signup modal. Models hold data, the view model
//! holds presentation state, views render it and the controller connects
//! input, remote calls and timers.

pub mod controllers;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::{ControllerMessage, WidgetController, WidgetTimings};
pub use error::{MarkupError, SubmitError, WidgetError};
pub use events::*;
pub use services::{HttpBackend, NewsletterBackend};
pub use view_models::ModalViewModel;
pub use views::{ConsoleRenderer, HostDocument, ViewRenderer};
