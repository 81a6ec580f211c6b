//! # Models Module
//!
//! Pure data models for the signup widget: the email value, the fetched
//! modal fragment, the signup attempt and its displayed summary.

pub mod email;
pub mod markup;
pub mod message;
pub mod signup_attempt;

pub use email::{is_valid_email, EmailAddress, EMAIL_PATTERN};
pub use markup::{
    FormFields, ModalMarkup, CLOSE_SELECTOR, EMAIL_SELECTOR, FORM_SELECTOR,
    MESSAGE_BOX_SELECTOR, SUBMIT_SELECTOR, TRIGGER_SELECTOR,
};
pub use message::{MessageIcon, MessageSummary};
pub use signup_attempt::{SignupAttempt, SubmissionStatus};
