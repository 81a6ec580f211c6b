//! Error types for the newsletter widget.

use thiserror::Error;

/// Problems with the fetched modal fragment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Fragment body was empty.
    #[error("Modal markup is empty")]
    Empty,

    /// A selector of the DOM contract is absent from the fragment.
    #[error("Modal markup has no element matching '{0}'")]
    MissingElement(&'static str),
}

/// Failure of a signup submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Endpoint answered with a non-2xx status.
    #[error("Endpoint rejected signup with status {0}")]
    Status(u16),

    /// Request never produced a status (connect, TLS, body errors).
    #[error("Signup request failed: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Status code of the failure, if the endpoint produced one
    pub fn code(&self) -> Option<u16> {
        match self {
            SubmitError::Status(code) => Some(*code),
            SubmitError::Transport(_) => None,
        }
    }
}

/// Errors raised by the widget controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Fetching the modal fragment failed.
    #[error("Modal markup unavailable: {0}")]
    MarkupUnavailable(String),

    /// Fragment was fetched but does not honour the DOM contract.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// The embedding page has no `#newsletterTrigger`.
    #[error("Embedding page has no newsletter trigger")]
    TriggerMissing,

    /// Trigger activation arrived before `attach_trigger`.
    #[error("Newsletter trigger is not attached")]
    TriggerNotAttached,

    /// Operation needs an open form.
    #[error("Newsletter form is not open")]
    NotOpen,

    /// Submit was requested with an email that fails validation.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// A signup attempt is already waiting for the endpoint.
    #[error("A signup attempt is already in flight")]
    SubmissionInFlight,
}
