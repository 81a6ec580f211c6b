//! # Newsletter Widget - Signup Modal for Documentation Sites
//!
//! Opens a modal from a trigger on the embedding page, validates the email
//! on every keystroke and submits it to a marketing endpoint, then shows the
//! outcome and dismisses itself.
//!
//! ## Architecture
//!
//! This crate follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌──────────────┐  ViewEvents  ┌────────────────┐   Updates   ┌──────────────┐
//! │     View     │◄─────────────│   ViewModel    │◄────────────│    Models    │
//! │              │              │                │             │              │
//! │ - Document   │              │ - Modal phase  │             │ - Email      │
//! │ - Console    │              │ - Form state   │             │ - Markup     │
//! │              │              │ - Message box  │             │ - Attempt    │
//! └──────────────┘              └────────────────┘             └──────────────┘
//!                                       ▲
//!                                       │ Inputs / messages
//!                                       ▼
//!                               ┌────────────────┐   spawned   ┌──────────────┐
//!                               │   Controller   │────────────▶│   Backend    │
//!                               │                │◄────────────│ (HTTP, timers│
//!                               │ - Dispatch     │    mpsc     │  via tokio)  │
//!                               │ - Scheduling   │             │              │
//!                               └────────────────┘             └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod widget;

// Re-export main types for easy access
pub use widget::*;
