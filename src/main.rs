//! # Newsletter Main Entry Point
//!
//! Headless driver for the newsletter signup widget.

use anyhow::{Context, Result};
use newsletter_widget::cmd_args::CommandLineArgs;
use newsletter_widget::config::{self, ConfigOverrides, NewsletterProfile, WidgetConfig};
use newsletter_widget::{
    tracing_event_bus, ConsoleRenderer, HttpBackend, Outcome, WidgetController,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = std::env::var(config::LOG_LEVEL_ENV_VAR)
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_email_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read email from standard input")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose());

    // Load profile from configuration
    let profile_path = config::get_profile_path();
    let profile = NewsletterProfile::load(args.profile(), &profile_path)?;
    let widget_config = WidgetConfig::resolve(
        ConfigOverrides {
            page_url: args.page_url().map(str::to_string),
            endpoint: args.endpoint().map(str::to_string),
        },
        config::get_endpoint_override(),
        profile,
    )?;
    tracing::debug!("Using endpoint {}", widget_config.endpoint());

    let email = match args.email() {
        Some(email) => email.to_string(),
        None => read_email_from_stdin()?,
    };

    let backend = HttpBackend::new(&widget_config)?;
    let renderer = ConsoleRenderer::new(std::io::stdout(), args.verbose());
    let mut controller = WidgetController::from_config(&widget_config, backend, renderer);
    controller
        .view_model_mut()
        .set_event_bus(Box::new(tracing_event_bus()));

    let outcome = controller.sign_up(&email).await?;
    Ok(match outcome {
        Outcome::Success | Outcome::AlreadyRegistered => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::from(2),
    })
}
