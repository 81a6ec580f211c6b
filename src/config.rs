//! Configuration constants and profile loading for the newsletter widget
//!
//! Fixed widget constants live here together with the INI profile that tells
//! the headless driver which page embeds the widget and where signups go.

use ini::Ini;
use reqwest::Url;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Modal fragment location, relative to the embedding page
pub const FRAGMENT_PATH: &str = "_static/html/newsletter.html";

/// Container fade before removal
pub const FADE_DURATION: Duration = Duration::from_millis(200);

/// Time from a displayed outcome until the modal is gone
pub const DISMISS_DELAY: Duration = Duration::from_millis(1500);

/// Delay before the summary is appended to the sized message box
pub const SUMMARY_TICK: Duration = Duration::ZERO;

/// Extra height the message box takes over the form it replaces
pub const MESSAGE_BOX_EXTRA_HEIGHT_PX: u32 = 16;

/// Form height used until the host reports a measured one
pub const DEFAULT_FORM_HEIGHT_PX: u32 = 160;

/// Default profile file path
pub const DEFAULT_PROFILE_PATH: &str = "~/.newsletter/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "NEWSLETTER_PROFILE_PATH";

/// Environment variable name for overriding the signup endpoint
pub const ENDPOINT_ENV_VAR: &str = "NEWSLETTER_ENDPOINT";

/// Environment variable name for the log filter
pub const LOG_LEVEL_ENV_VAR: &str = "NEWSLETTER_LOG_LEVEL";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Endpoint override from the environment, if set and non-empty
pub fn get_endpoint_override() -> Option<String> {
    std::env::var(ENDPOINT_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read profile file '{path}': {message}")]
    ProfileRead { path: String, message: String },

    #[error("Invalid value for '{key}' in profile '{profile}': {value}")]
    InvalidProfileValue {
        profile: String,
        key: &'static str,
        value: String,
    },

    #[error("No embedding page URL configured")]
    MissingPageUrl,

    #[error("No signup endpoint configured")]
    MissingEndpoint,

    #[error("Invalid URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Settings read from one section of the profile file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterProfile {
    pub page_url: Option<String>,
    pub endpoint: Option<String>,
    pub form_height_px: Option<u32>,
}

impl NewsletterProfile {
    /// Load a named profile.
    ///
    /// A missing file or section is not an error; it yields `None`.
    pub fn load(profile_name: &str, profile_path: &str) -> Result<Option<Self>, ConfigError> {
        let expanded = shellexpand::tilde(profile_path).into_owned();
        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' does not exist", expanded);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&expanded).map_err(|e| ConfigError::ProfileRead {
            path: expanded.clone(),
            message: e.to_string(),
        })?;

        let Some(section) = ini.section(Some(profile_name)) else {
            tracing::debug!("Profile '{}' not found in '{}'", profile_name, expanded);
            return Ok(None);
        };

        let form_height_px = match section.get("form_height") {
            Some(raw) => Some(raw.trim().parse::<u32>().map_err(|_| {
                ConfigError::InvalidProfileValue {
                    profile: profile_name.to_string(),
                    key: "form_height",
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Some(Self {
            page_url: section.get("page_url").map(|v| v.trim().to_string()),
            endpoint: section.get("endpoint").map(|v| v.trim().to_string()),
            form_height_px,
        }))
    }
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub page_url: Option<String>,
    pub endpoint: Option<String>,
}

/// Fully resolved widget configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    page_url: Url,
    endpoint: Url,
    form_height_px: u32,
    fade_duration: Duration,
    dismiss_delay: Duration,
}

impl WidgetConfig {
    /// Build a configuration with the fixed widget timings
    pub fn new(page_url: Url, endpoint: Url) -> Self {
        Self {
            page_url,
            endpoint,
            form_height_px: DEFAULT_FORM_HEIGHT_PX,
            fade_duration: FADE_DURATION,
            dismiss_delay: DISMISS_DELAY,
        }
    }

    /// Resolve command line > environment > profile for every setting
    pub fn resolve(
        overrides: ConfigOverrides,
        env_endpoint: Option<String>,
        profile: Option<NewsletterProfile>,
    ) -> Result<Self, ConfigError> {
        let profile = profile.unwrap_or_default();

        let page_url = overrides
            .page_url
            .or(profile.page_url)
            .ok_or(ConfigError::MissingPageUrl)?;
        let endpoint = overrides
            .endpoint
            .or(env_endpoint)
            .or(profile.endpoint)
            .ok_or(ConfigError::MissingEndpoint)?;

        let mut config = Self::new(parse_url(&page_url)?, parse_url(&endpoint)?);
        if let Some(height) = profile.form_height_px {
            config.form_height_px = height;
        }
        Ok(config)
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Absolute location of the modal fragment
    pub fn fragment_url(&self) -> Result<Url, ConfigError> {
        self.page_url
            .join(FRAGMENT_PATH)
            .map_err(|e| ConfigError::InvalidUrl {
                value: FRAGMENT_PATH.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn form_height_px(&self) -> u32 {
        self.form_height_px
    }

    pub fn fade_duration(&self) -> Duration {
        self.fade_duration
    }

    pub fn dismiss_delay(&self) -> Duration {
        self.dismiss_delay
    }
}

fn parse_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.newsletter/profile");
    }

    #[test]
    fn test_widget_timings() {
        assert_eq!(FADE_DURATION, Duration::from_millis(200));
        assert_eq!(DISMISS_DELAY, Duration::from_millis(1500));
        assert_eq!(SUMMARY_TICK, Duration::ZERO);
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn test_load_profile_section() {
        let file = write_profile(
            "[default]\npage_url = https://docs.example.com/\nendpoint = https://lists.example.com/subscribe\nform_height = 220\n",
        );
        let profile = NewsletterProfile::load("default", file.path().to_str().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(profile.page_url.as_deref(), Some("https://docs.example.com/"));
        assert_eq!(
            profile.endpoint.as_deref(),
            Some("https://lists.example.com/subscribe")
        );
        assert_eq!(profile.form_height_px, Some(220));
    }

    #[test]
    fn test_load_missing_profile_section() {
        let file = write_profile("[staging]\nendpoint = https://lists.example.com/\n");
        let profile = NewsletterProfile::load("default", file.path().to_str().unwrap()).unwrap();
        assert!(profile.is_none());
    }

    #[test]
    fn test_load_missing_profile_file() {
        let profile = NewsletterProfile::load("default", "/nonexistent/newsletter/profile").unwrap();
        assert!(profile.is_none());
    }

    #[test]
    fn test_load_invalid_form_height() {
        let file = write_profile("[default]\nform_height = tall\n");
        let result = NewsletterProfile::load("default", file.path().to_str().unwrap());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProfileValue { key: "form_height", .. })
        ));
    }

    #[test]
    fn test_resolve_precedence() {
        let profile = NewsletterProfile {
            page_url: Some("https://docs.example.com/".to_string()),
            endpoint: Some("https://profile.example.com/subscribe".to_string()),
            form_height_px: Some(200),
        };

        let from_env = WidgetConfig::resolve(
            ConfigOverrides::default(),
            Some("https://env.example.com/subscribe".to_string()),
            Some(profile.clone()),
        )
        .unwrap();
        assert_eq!(from_env.endpoint().as_str(), "https://env.example.com/subscribe");
        assert_eq!(from_env.form_height_px(), 200);

        let from_cli = WidgetConfig::resolve(
            ConfigOverrides {
                page_url: None,
                endpoint: Some("https://cli.example.com/subscribe".to_string()),
            },
            Some("https://env.example.com/subscribe".to_string()),
            Some(profile),
        )
        .unwrap();
        assert_eq!(from_cli.endpoint().as_str(), "https://cli.example.com/subscribe");
    }

    #[test]
    fn test_resolve_requires_endpoint_and_page() {
        let missing_page =
            WidgetConfig::resolve(ConfigOverrides::default(), Some("https://x.io/".into()), None);
        assert!(matches!(missing_page, Err(ConfigError::MissingPageUrl)));

        let missing_endpoint = WidgetConfig::resolve(
            ConfigOverrides {
                page_url: Some("https://docs.example.com/".to_string()),
                endpoint: None,
            },
            None,
            None,
        );
        assert!(matches!(missing_endpoint, Err(ConfigError::MissingEndpoint)));
    }

    #[test]
    fn test_fragment_url_is_relative_to_page() {
        let config = WidgetConfig::new(
            Url::parse("https://docs.example.com/guide/index.html").unwrap(),
            Url::parse("https://lists.example.com/subscribe").unwrap(),
        );
        assert_eq!(
            config.fragment_url().unwrap().as_str(),
            "https://docs.example.com/guide/_static/html/newsletter.html"
        );
    }
}
