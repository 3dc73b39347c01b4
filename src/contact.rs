//! Contact form: validation, error display, submission and the success banner.

use crate::dom::{Document, NodeId, SharedDocument};
use anyhow::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const FORM_ID: &str = "contact-form";
pub const SUCCESS_ID: &str = "success-message";

pub const REQUIRED_FIELDS: [&str; 6] = ["firstName", "lastName", "email", "phone", "service", "message"];

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const FAILURE_ALERT: &str = "Failed to send message. Please try again.";

const SUBMIT_LABEL: &str = "Send Message";
const SENDING_LABEL: &str = "Sending...";
const ERROR_FIELD_CLASS: &str = "form-error";
const ERROR_MESSAGE_CLASS: &str = "error-message";
const LOADING_CLASS: &str = "loading";
const HIDDEN_CLASS: &str = "hidden";

/// How long the simulated backend takes to answer.
const SIMULATED_ROUND_TRIP: Duration = Duration::from_secs(1);

/// Named field values collected from the form.
pub type FormData = BTreeMap<String, String>;

/// What a [`Sender`] returns; resolves once delivery succeeds or fails.
pub type SendFuture = Pin<Box<dyn Future<Output = Result<()>>>>;

/// Delivers a validated submission.
pub type Sender = Box<dyn Fn(FormData) -> SendFuture>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &str, message: &'static str) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(Vec<FieldError>),
    Sent,
    /// The sender returned an error; the user was alerted
    Failed,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+]?[1-9][\d]{0,15}$").expect("valid phone regex"))
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Check a phone number after dropping its formatting.
///
/// Spaces, dashes and parentheses are treated as formatting, so a number
/// written "(555) 123-4567" passes. Any other symbol, `$` included, is kept
/// and fails the match.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    phone_regex().is_match(&digits)
}

/// Check a submission. Errors come in display order; when a field has
/// several, the last one is what the user sees.
pub fn validate(data: &FormData) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        if data.get(field).map_or(true, |v| v.trim().is_empty()) {
            errors.push(FieldError::new(field, REQUIRED_MESSAGE));
        }
    }

    if let Some(email) = data.get("email").filter(|v| !v.is_empty()) {
        if !is_valid_email(email) {
            errors.push(FieldError::new("email", EMAIL_MESSAGE));
        }
    }

    if let Some(phone) = data.get("phone").filter(|v| !v.is_empty()) {
        if !is_valid_phone(phone) {
            errors.push(FieldError::new("phone", PHONE_MESSAGE));
        }
    }

    errors
}

/// The default sender: waits a second and logs the payload.
pub fn simulate_submission(data: FormData) -> SendFuture {
    Box::pin(async move {
        tokio::time::sleep(SIMULATED_ROUND_TRIP).await;
        info!("Form submitted: {}", serde_json::to_string(&data)?);
        Ok::<(), anyhow::Error>(())
    })
}

/// The contact form: validation, inline errors and the success banner.
pub struct ContactForm {
    form: NodeId,
    success: Option<NodeId>,
    sender: Sender,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("form", &self.form)
            .field("success", &self.success)
            .finish_non_exhaustive()
    }
}

impl ContactForm {
    /// Attach to `#contact-form` with the simulated sender. `None` when the
    /// page has no contact form.
    pub fn attach(doc: &Document) -> Option<Self> {
        Self::with_sender(doc, Box::new(simulate_submission))
    }

    pub fn with_sender(doc: &Document, sender: Sender) -> Option<Self> {
        let form = doc.get_element_by_id(FORM_ID)?;
        Some(Self {
            form,
            success: doc.get_element_by_id(SUCCESS_ID),
            sender,
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    /// Named controls inside the form.
    fn fields(&self, doc: &Document) -> Vec<NodeId> {
        doc.query_all(self.form, |el| {
            matches!(el.tag(), "input" | "select" | "textarea") && el.attribute("name").is_some()
        })
    }

    pub fn collect(&self, doc: &Document) -> FormData {
        self.fields(doc)
            .into_iter()
            .filter_map(|node| {
                let name = doc.attribute(node, "name")?;
                Some((name.to_string(), doc.value(node).to_string()))
            })
            .collect()
    }

    pub fn show_field_error(&self, doc: &mut Document, field: &str, message: &str) {
        let Some(node) = doc.get_element_by_id(field) else {
            return;
        };
        doc.add_class(node, ERROR_FIELD_CLASS);

        let Some(parent) = doc.element(node).parent() else {
            return;
        };
        let error = match doc.first_by_class(parent, ERROR_MESSAGE_CLASS) {
            Some(existing) => existing,
            None => doc
                .build("p")
                .class("error-message text-red-500 text-sm mt-1")
                .append_to(parent),
        };
        doc.set_text(error, message);
    }

    pub fn clear_errors(&self, doc: &mut Document) {
        for node in doc.query_by_class(self.form, ERROR_FIELD_CLASS) {
            doc.remove_class(node, ERROR_FIELD_CLASS);
        }
        for node in doc.query_by_class(self.form, ERROR_MESSAGE_CLASS) {
            doc.remove(node);
        }
    }

    pub fn set_loading(&self, doc: &mut Document, loading: bool) {
        let Some(button) = doc.query_first(self.form, |el| {
            el.tag() == "button" && el.attribute("type") == Some("submit")
        }) else {
            return;
        };

        doc.set_text(button, if loading { SENDING_LABEL } else { SUBMIT_LABEL });
        doc.set_disabled(button, loading);
        if loading {
            doc.add_class(self.form, LOADING_CLASS);
        } else {
            doc.remove_class(self.form, LOADING_CLASS);
        }
    }

    pub fn reset(&self, doc: &mut Document) {
        for node in self.fields(doc) {
            doc.set_value(node, "");
        }
    }

    fn set_success_visible(&self, doc: &mut Document, visible: bool) {
        let Some(banner) = self.success else {
            return;
        };
        if visible {
            doc.remove_class(banner, HIDDEN_CLASS);
        } else {
            doc.add_class(banner, HIDDEN_CLASS);
        }
    }

    /// Validate, send and report. Resolves once the sender has answered; the
    /// success banner is left visible (see [`ContactForm::hide_success_after`]).
    pub async fn submit(&self, doc: &SharedDocument) -> SubmitOutcome {
        let data = {
            let mut doc = doc.borrow_mut();
            self.clear_errors(&mut doc);

            let data = self.collect(&doc);
            let errors = validate(&data);
            if !errors.is_empty() {
                debug!("Contact form invalid: {} error(s)", errors.len());
                for error in &errors {
                    self.show_field_error(&mut doc, &error.field, error.message);
                }
                return SubmitOutcome::Invalid(errors);
            }

            self.set_loading(&mut doc, true);
            data
        };

        let result = (self.sender)(data).await;

        let mut doc = doc.borrow_mut();
        let outcome = match result {
            Ok(()) => {
                self.set_success_visible(&mut doc, true);
                self.reset(&mut doc);
                SubmitOutcome::Sent
            }
            Err(e) => {
                warn!("Contact form submission failed: {:#}", e);
                doc.alert(FAILURE_ALERT);
                SubmitOutcome::Failed
            }
        };
        self.set_loading(&mut doc, false);
        outcome
    }

    pub async fn hide_success_after(&self, doc: &SharedDocument, delay: Duration) {
        if self.success.is_none() {
            return;
        }
        tokio::time::sleep(delay).await;
        self.set_success_visible(&mut doc.borrow_mut(), false);
    }
}
