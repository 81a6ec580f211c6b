//! # Controllers
//!
//! Orchestration of the widget: input dispatch, spawned work and rendering.

pub mod widget_controller;

pub use widget_controller::{ControllerMessage, WidgetController, WidgetTimings};
