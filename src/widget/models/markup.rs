//! # Modal Markup Model
//!
//! The HTML fragment fetched from the site's static resources. On load it is
//! checked against the DOM contract and its form inputs are collected so the
//! submission can send every field the fragment defines.

use crate::widget::error::MarkupError;
use crate::widget::models::EmailAddress;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

pub const TRIGGER_SELECTOR: &str = "#newsletterTrigger";
pub const FORM_SELECTOR: &str = "#newsletterForm";
pub const EMAIL_SELECTOR: &str = "#newsletterEmail";
pub const CLOSE_SELECTOR: &str = ".modal-close";
pub const MESSAGE_BOX_SELECTOR: &str = ".message-box";
pub const SUBMIT_SELECTOR: &str = ".newsletter-btn";

/// Selectors the fragment itself must provide
pub const REQUIRED_SELECTORS: [&str; 5] = [
    FORM_SELECTOR,
    EMAIL_SELECTOR,
    CLOSE_SELECTOR,
    MESSAGE_BOX_SELECTOR,
    SUBMIT_SELECTOR,
];

/// Name used for the email input when the fragment gives it none
pub const DEFAULT_EMAIL_FIELD: &str = "email";

fn start_tag_regex() -> &'static Regex {
    static START_TAG: OnceLock<Regex> = OnceLock::new();
    START_TAG.get_or_init(|| {
        Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s[^<>]*?)?)\s*/?>")
            .expect("start tag pattern compiles")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("attribute pattern compiles")
    })
}

fn comment_regex() -> &'static Regex {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern compiles"))
}

/// Blank out HTML comments, keeping byte offsets intact
fn blank_comments(html: &str) -> Cow<'_, str> {
    comment_regex().replace_all(html, |caps: &regex::Captures<'_>| " ".repeat(caps[0].len()))
}

/// A start tag and its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
struct StartTag {
    name: String,
    attributes: Vec<(String, Option<String>)>,
    /// Byte offset just past the tag in the source
    end: usize,
}

impl StartTag {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Match a simple `#id` or `.class` selector
    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id") == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.attribute("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
        } else {
            self.name.eq_ignore_ascii_case(selector)
        }
    }
}

fn scan_start_tags(html: &str) -> Vec<StartTag> {
    start_tag_regex()
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let attributes = caps
                .get(2)
                .map(|raw| {
                    attribute_regex()
                        .captures_iter(raw.as_str())
                        .filter_map(|attr| {
                            let key = attr.get(1)?.as_str().to_ascii_lowercase();
                            let value = attr
                                .get(2)
                                .or_else(|| attr.get(3))
                                .or_else(|| attr.get(4))
                                .map(|v| v.as_str().to_string());
                            Some((key, value))
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(StartTag {
                name,
                attributes,
                end: whole.end(),
            })
        })
        .collect()
}

/// One input of the signup form
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldTemplate {
    name: String,
    value: String,
    is_email: bool,
}

/// Ordered name/value pairs posted to the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Fetched modal fragment that honours the DOM contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalMarkup {
    html: String,
    fields: Vec<FieldTemplate>,
}

impl ModalMarkup {
    /// Check a fragment against the DOM contract and collect its form inputs
    pub fn parse(html: &str) -> Result<Self, MarkupError> {
        if html.trim().is_empty() {
            return Err(MarkupError::Empty);
        }

        let visible = blank_comments(html);
        let tags = scan_start_tags(&visible);
        for selector in REQUIRED_SELECTORS {
            if !tags.iter().any(|tag| tag.matches(selector)) {
                return Err(MarkupError::MissingElement(selector));
            }
        }

        let fields = Self::collect_fields(&visible, &tags);
        tracing::debug!("Modal markup accepted with {} form field(s)", fields.len());

        Ok(Self {
            html: html.to_string(),
            fields,
        })
    }

    fn collect_fields(html: &str, tags: &[StartTag]) -> Vec<FieldTemplate> {
        let Some(form) = tags.iter().find(|tag| tag.matches(FORM_SELECTOR)) else {
            return Vec::new();
        };
        let form_end = html[form.end..]
            .to_ascii_lowercase()
            .find("</form")
            .map_or(html.len(), |offset| form.end + offset);

        tags.iter()
            .filter(|tag| tag.end > form.end && tag.end <= form_end && tag.name == "input")
            .filter_map(|tag| {
                let is_email = tag.matches(EMAIL_SELECTOR);
                let input_type = tag.attribute("type").unwrap_or("text").to_ascii_lowercase();
                match input_type.as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => return None,
                    "checkbox" | "radio" if !tag.has_attribute("checked") => return None,
                    _ => {}
                }

                let name = match tag.attribute("name") {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ if is_email => DEFAULT_EMAIL_FIELD.to_string(),
                    _ => return None,
                };
                let value = match (tag.attribute("value"), input_type.as_str()) {
                    (Some(value), _) => value.to_string(),
                    (None, "checkbox" | "radio") => "on".to_string(),
                    (None, _) => String::new(),
                };

                Some(FieldTemplate {
                    name,
                    value,
                    is_email,
                })
            })
            .collect()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Name under which the email is posted
    pub fn email_field_name(&self) -> &str {
        self.fields
            .iter()
            .find(|field| field.is_email)
            .map_or(DEFAULT_EMAIL_FIELD, |field| field.name.as_str())
    }

    /// Every form field, with the email input carrying the entered address
    pub fn form_fields(&self, email: &EmailAddress) -> FormFields {
        let mut pairs: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|field| {
                let value = if field.is_email {
                    email.as_str().to_string()
                } else {
                    field.value.clone()
                };
                (field.name.clone(), value)
            })
            .collect();

        if !self.fields.iter().any(|field| field.is_email) {
            pairs.push((DEFAULT_EMAIL_FIELD.to_string(), email.as_str().to_string()));
        }

        FormFields::new(pairs)
    }
}
