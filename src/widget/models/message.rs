//! # Message Summary
//!
//! Icon and text shown in `.message-box` once an attempt resolves. The
//! icon is a Font Awesome stack: a square background with the outcome
//! glyph on top.

use crate::widget::events::Outcome;

pub const SUCCESS_TEXT: &str = "REGISTRATION SUCCESSFUL";
pub const ALREADY_REGISTERED_TEXT: &str = "ALREADY REGISTERED";
pub const FAILURE_TEXT: &str = "REGISTRATION FAILED";

/// Added to `.message-box` when the signup went through
pub const SUCCESS_BOX_CLASS: &str = "newsletter-submit--success";

/// Added to the outcome glyph when the signup failed
pub const FAILURE_ICON_CLASS: &str = "newsletter-submit--failure";

/// Glyph shown on top of the icon background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIcon {
    Check,
    Cross,
}

impl MessageIcon {
    /// Classes of the glyph element
    pub fn css_class(self) -> &'static str {
        match self {
            MessageIcon::Check => "fas fa-stack-1x fa-check-square",
            MessageIcon::Cross => "fas fa-stack-1x fa-window-close newsletter-submit--failure",
        }
    }
}

/// Icon plus text for one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSummary {
    icon: MessageIcon,
    text: &'static str,
}

impl MessageSummary {
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self {
                icon: MessageIcon::Check,
                text: SUCCESS_TEXT,
            },
            Outcome::AlreadyRegistered => Self {
                icon: MessageIcon::Cross,
                text: ALREADY_REGISTERED_TEXT,
            },
            Outcome::Failed => Self {
                icon: MessageIcon::Cross,
                text: FAILURE_TEXT,
            },
        }
    }

    pub fn icon(&self) -> MessageIcon {
        self.icon
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Class the message box itself takes for this outcome, if any
    pub fn box_class(&self) -> Option<&'static str> {
        match self.icon {
            MessageIcon::Check => Some(SUCCESS_BOX_CLASS),
            MessageIcon::Cross => None,
        }
    }

    /// Markup appended to the message box
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="fa-stack fa-2x newsletter-icon">"#,
                r#"<i class="fas fa-square fa-stack-2x newsletter-icon-background"></i>"#,
                r#"<i class="{}"></i>"#,
                "</div>{}"
            ),
            self.icon.css_class(),
            self.text
        )
    }
}
