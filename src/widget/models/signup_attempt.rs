//! # Signup Attempt Model
//!
//! One email submission and its resolved outcome. Created on submit,
//! resolved once by the endpoint reply, dropped when the modal closes.

use crate::widget::error::SubmitError;
use crate::widget::events::Outcome;
use crate::widget::models::EmailAddress;

/// Submission status of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// No reply yet
    #[default]
    Unsubmitted,
    /// Endpoint accepted the signup
    Success,
    /// Endpoint rejected it, or the request never completed
    Failed { error_code: Option<u16> },
}

/// A single signup attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupAttempt {
    email: EmailAddress,
    status: SubmissionStatus,
}

impl SignupAttempt {
    pub fn new(email: EmailAddress) -> Self {
        Self {
            email,
            status: SubmissionStatus::Unsubmitted,
        }
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_resolved(&self) -> bool {
        self.status != SubmissionStatus::Unsubmitted
    }

    /// Record the endpoint reply and return the outcome to display.
    ///
    /// An attempt is resolved at most once; later replies keep the first
    /// status.
    pub fn resolve(&mut self, result: &Result<(), SubmitError>) -> Outcome {
        if !self.is_resolved() {
            self.status = match result {
                Ok(()) => SubmissionStatus::Success,
                Err(e) => SubmissionStatus::Failed {
                    error_code: e.code(),
                },
            };
        } else {
            tracing::debug!("Ignoring second reply for signup attempt");
        }
        self.outcome().unwrap_or(Outcome::Failed)
    }

    /// Outcome of a resolved attempt
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            SubmissionStatus::Unsubmitted => None,
            SubmissionStatus::Success => Some(Outcome::Success),
            SubmissionStatus::Failed { error_code } => Some(Outcome::from_error_code(error_code)),
        }
    }

    pub fn error_code(&self) -> Option<u16> {
        match self.status {
            SubmissionStatus::Failed { error_code } => error_code,
            _ => None,
        }
    }
}
