//! # HTTP Service
//!
//! Fetches the modal fragment and posts signups to the marketing endpoint.

use crate::config::WidgetConfig;
use crate::widget::error::{SubmitError, WidgetError};
use crate::widget::models::FormFields;
use anyhow::Result;
use reqwest::{Client, Url};
use std::error::Error as _;
use std::future::Future;

/// Remote collaborators of the widget
///
/// Both calls are awaitable and report failures through their result type.
/// Implementations must be cheap to clone; the controller hands a clone to
/// every spawned request.
pub trait NewsletterBackend: Clone + Send + Sync + 'static {
    /// Retrieve the modal fragment
    fn fetch_markup(&self) -> impl Future<Output = Result<String, WidgetError>> + Send;

    /// Post the signup form; `Ok` for any 2xx reply
    fn submit(&self, fields: FormFields) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// Backend talking to the real site and endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    fragment_url: Url,
    endpoint: Url,
}

impl HttpBackend {
    /// Create a backend from resolved configuration
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        tracing::debug!("Creating HTTP backend for {}", config.endpoint());
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            fragment_url: config.fragment_url()?,
            endpoint: config.endpoint().clone(),
        })
    }

    pub fn fragment_url(&self) -> &Url {
        &self.fragment_url
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl NewsletterBackend for HttpBackend {
    async fn fetch_markup(&self) -> Result<String, WidgetError> {
        tracing::debug!("GET {}", self.fragment_url);
        let response = self
            .client
            .get(self.fragment_url.clone())
            .send()
            .await
            .map_err(|e| WidgetError::MarkupUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::MarkupUnavailable(format!(
                "{} answered {}",
                self.fragment_url,
                status.as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| WidgetError::MarkupUnavailable(e.to_string()))
    }

    async fn submit(&self, fields: FormFields) -> Result<(), SubmitError> {
        tracing::debug!("POST {} with {} field(s)", self.endpoint, fields.len());
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(fields.pairs())
            .send()
            .await
            .map_err(|e| {
                // Show full error chain
                let mut message = e.to_string();
                let mut source = e.source();
                while let Some(cause) = source {
                    message.push_str(&format!("\n  Caused by: {cause}"));
                    source = cause.source();
                }
                tracing::error!("Signup request failed: {message}");
                SubmitError::Transport(message)
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::info!("Endpoint answered {}", status.as_u16());
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}
