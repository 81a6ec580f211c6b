//! # Model Events
//!
//! Events emitted when the signup state changes.
//! These notify subscribers of lifecycle transitions and attempt results.

use super::types::{ModalPhase, Outcome, SessionId};

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// Modal phase changed
    PhaseChanged {
        old_phase: ModalPhase,
        new_phase: ModalPhase,
    },

    /// Modal markup was inserted into the document
    ModalMounted { session: SessionId },

    /// Modal container was removed from the document
    ModalUnmounted { session: SessionId },

    /// Email field was re-validated after a keystroke
    EmailValidated { valid: bool },

    /// Signup attempt was sent to the endpoint
    SubmissionStarted { email: String },

    /// Endpoint reply (or transport failure) arrived
    SubmissionResolved {
        outcome: Outcome,
        error_code: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_changed_event_should_carry_both_phases() {
        let event = ModelEvent::PhaseChanged {
            old_phase: ModalPhase::Open,
            new_phase: ModalPhase::Submitting,
        };

        match event {
            ModelEvent::PhaseChanged {
                old_phase,
                new_phase,
            } => {
                assert_eq!(old_phase, ModalPhase::Open);
                assert_eq!(new_phase, ModalPhase::Submitting);
            }
            _ => panic!("Expected PhaseChanged event"),
        }
    }

    #[test]
    fn submission_resolved_event_should_carry_error_code() {
        let event = ModelEvent::SubmissionResolved {
            outcome: Outcome::AlreadyRegistered,
            error_code: Some(400),
        };

        assert_eq!(
            event,
            ModelEvent::SubmissionResolved {
                outcome: Outcome::AlreadyRegistered,
                error_code: Some(400),
            }
        );
    }
}
