//! # Core Event Types
//!
//! Common types shared by the event system: modal phases, signup outcomes
//! and the session identifier that ties asynchronous work to a mounted modal.

/// Identifies one mount of the modal.
///
/// A fresh id is issued every time the modal is mounted. Asynchronous work
/// (markup fetch, form POST, timers) carries the id it was started under so
/// that late results for an unmounted modal can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn initial() -> Self {
        Self(0)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Resolved outcome of a signup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Endpoint answered 2xx
    Success,
    /// Endpoint answered 400
    AlreadyRegistered,
    /// Any other status, or no status at all
    Failed,
}

impl Outcome {
    /// Map a failed attempt's status code to an outcome.
    ///
    /// Only 400 is distinguished; everything else, including a missing code,
    /// is a plain failure.
    pub fn from_error_code(code: Option<u16>) -> Self {
        match code {
            Some(400) => Outcome::AlreadyRegistered,
            _ => Outcome::Failed,
        }
    }
}

/// Lifecycle phase of the modal
///
/// Closed → Open → Submitting → Resolved → Closing → Closed.
/// Open may also go straight to Closing when the user closes early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Nothing is mounted
    Closed,
    /// Markup is being fetched; nothing is mounted yet
    Loading,
    /// Form is visible and accepts input
    Open,
    /// Form fades out, then the POST is in flight
    Submitting,
    /// Outcome is displayed in the message box
    Resolved(Outcome),
    /// Container is fading to transparent before removal
    Closing,
}

impl ModalPhase {
    /// Whether the modal container is part of the document
    pub fn is_mounted(self) -> bool {
        matches!(
            self,
            ModalPhase::Open
                | ModalPhase::Submitting
                | ModalPhase::Resolved(_)
                | ModalPhase::Closing
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ModalPhase::Closed => "closed",
            ModalPhase::Loading => "loading",
            ModalPhase::Open => "open",
            ModalPhase::Submitting => "submitting",
            ModalPhase::Resolved(_) => "resolved",
            ModalPhase::Closing => "closing",
        }
    }
}
