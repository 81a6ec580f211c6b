//! # View Events
//!
//! Events related to view updates and user input.
//! These drive re-rendering of the host document and carry user interactions.

use std::time::Duration;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Modal was mounted and must be rendered from scratch
    ModalMountRequired,

    /// Email field styling or submit button state changed
    FormStateChanged,

    /// Email input should receive focus
    FocusEmailRequired,

    /// Form should fade out before the attempt is sent
    FormFadeOutRequired,

    /// Form is fully transparent and the attempt is being sent
    FormFaded,

    /// Form is hidden and the message box takes its height
    MessageBoxSized { height_px: u32 },

    /// Icon and text were appended to the message box
    MessageSummaryAppended,

    /// Container should fade to transparent
    ContainerFadeRequired { duration: Duration },

    /// Container was removed from the document
    ModalRemovalRequired,

    /// Modal markup could not be loaded
    MarkupUnavailable { reason: String },
}

/// Input events from the user or host page
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetInput {
    /// `#newsletterTrigger` was activated
    TriggerActivated,

    /// Content of `#newsletterEmail` changed (one keystroke)
    EmailChanged(String),

    /// `#newsletterForm` was submitted
    SubmitRequested,

    /// `.modal-close` was activated
    CloseRequested,

    /// Host measured the rendered form height
    FormResized { height_px: u32 },
}
