//! Step definitions for the signup flow
//!
//! This module contains step definitions for:
//! - Serving the modal and answering signups
//! - Opening, typing into and closing the modal
//! - Checking the rendered document and the posted form

use crate::common::world::NewsletterWorld;
use cucumber::{given, then, when};
use newsletter_widget::{ModalPhase, WidgetInput};
use tracing::info;

// === SITE ===

#[given("the documentation site serves the newsletter modal")]
async fn given_site_serves_modal(world: &mut NewsletterWorld) {
    world.start_site(200).await;
}

#[given(expr = "the documentation site answers the modal request with {int}")]
async fn given_site_fails_modal(world: &mut NewsletterWorld, status: u16) {
    world.start_site(status).await;
}

#[given("the page has no newsletter trigger")]
async fn given_page_without_trigger(world: &mut NewsletterWorld) {
    world.page = Some("<main><h1>Guide</h1></main>".to_string());
}

#[given(expr = "the marketing endpoint answers signups with {int}")]
async fn given_endpoint_answers(world: &mut NewsletterWorld, status: u16) {
    world.answer_signups_with(status).await;
}

// === VISITOR ===

#[when("the visitor clicks the newsletter trigger")]
async fn when_trigger_clicked(world: &mut NewsletterWorld) {
    info!("Activating newsletter trigger");
    world.input(WidgetInput::TriggerActivated);
    world.settle().await.expect("modal did not settle");
}

#[when(expr = "the visitor types {string}")]
async fn when_visitor_types(world: &mut NewsletterWorld, text: String) {
    let mut typed = String::new();
    for ch in text.chars() {
        typed.push(ch);
        world.input(WidgetInput::EmailChanged(typed.clone()));
    }
}

#[when("the visitor submits the form")]
async fn when_visitor_submits(world: &mut NewsletterWorld) {
    world.input(WidgetInput::SubmitRequested);
}

#[when("the reply arrives")]
async fn when_reply_arrives(world: &mut NewsletterWorld) {
    world.wait_for_outcome().await.expect("no reply");
}

#[when("the visitor closes the modal")]
async fn when_visitor_closes(world: &mut NewsletterWorld) {
    world.input(WidgetInput::CloseRequested);
    world.settle().await.expect("modal did not close");
}

// === DOCUMENT ===

#[then("the modal should be shown with the email focused")]
async fn then_modal_shown(world: &mut NewsletterWorld) {
    let modal = world.document().modal().expect("modal not mounted");
    assert_eq!(modal.focused, Some("#newsletterEmail"));
    assert!(world
        .document()
        .body_html()
        .starts_with(r#"<div id="newsletterModal" class="newsletterContainer""#));
}

#[then("no modal should be on the page")]
async fn then_no_modal(world: &mut NewsletterWorld) {
    assert!(!world.document().has_modal());
    assert_eq!(world.controller().phase(), ModalPhase::Closed);
}

#[then("the trigger should be reported missing")]
async fn then_trigger_missing(world: &mut NewsletterWorld) {
    assert_eq!(
        world.attach_error.as_deref(),
        Some("Embedding page has no newsletter trigger")
    );
    assert!(!world.controller().is_trigger_attached());
}

#[then("the page should report the signup as unavailable")]
async fn then_signup_unavailable(world: &mut NewsletterWorld) {
    assert_eq!(world.document().notices().len(), 1);
}

#[then("the submit button should be disabled")]
async fn then_submit_disabled(world: &mut NewsletterWorld) {
    let modal = world.document().modal().expect("modal not mounted");
    assert!(modal.submit_disabled);
}

#[then("the submit button should be enabled")]
async fn then_submit_enabled(world: &mut NewsletterWorld) {
    let modal = world.document().modal().expect("modal not mounted");
    assert!(!modal.submit_disabled);
}

#[then("the email field should be marked invalid")]
async fn then_email_invalid(world: &mut NewsletterWorld) {
    let modal = world.document().modal().expect("modal not mounted");
    assert!(modal.email_has_class("failed"));
}

#[then("the email field should be marked valid")]
async fn then_email_valid(world: &mut NewsletterWorld) {
    let modal = world.document().modal().expect("modal not mounted");
    assert!(!modal.email_has_class("failed"));
}

#[then(expr = "the message {string} should be shown")]
async fn then_message_shown(world: &mut NewsletterWorld, text: String) {
    // The summary is appended on the tick after the box is sized
    let controller = world.controller();
    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        while controller.renderer().message_text().is_none() {
            controller.process_next_message().await.expect("message");
        }
    })
    .await
    .expect("message never appended");

    let modal = world.document().modal().expect("modal not mounted");
    assert_eq!(modal.message_text, Some(text.as_str()));
    assert!(!modal.form_visible);
}

#[then("the modal should be dismissed")]
async fn then_modal_dismissed(world: &mut NewsletterWorld) {
    let phase = world.settle().await.expect("modal did not close");
    assert_eq!(phase, ModalPhase::Closed);
    assert!(!world.document().has_modal());
}

#[then(expr = "the endpoint should have received {string}")]
async fn then_endpoint_received(world: &mut NewsletterWorld, body: String) {
    assert_eq!(world.signup_bodies().await, vec![body]);
}

#[then("no signup should have been sent")]
async fn then_no_signup(world: &mut NewsletterWorld) {
    assert!(world.signup_bodies().await.is_empty());
}

#[then("the submission should be refused as invalid")]
async fn then_submission_refused(world: &mut NewsletterWorld) {
    let error = world.last_error.as_deref().expect("submission was accepted");
    assert!(error.contains("not a valid email address"), "unexpected error: {error}");
}
