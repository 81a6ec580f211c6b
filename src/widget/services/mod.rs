//! # Services Module
//!
//! Remote collaborators of the widget.

pub mod http;

pub use http::{HttpBackend, NewsletterBackend};
