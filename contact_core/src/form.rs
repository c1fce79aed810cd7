//! Form state for the contact widget
//!
//! Holds the three field values and the static metadata each field is
//! rendered with. Editing is unrestricted; the only checks are the
//! native-style `required` / `type=email` gates a host runs before it
//! calls submit.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Prefix shared by every element id the widget renders
pub const ELEMENT_PREFIX: &str = "tlc-embed";

/// The valid e-mail address grammar HTML applies to `type="email"`
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| {
            Regex::new(EMAIL_PATTERN)
                .map_err(|e| tracing::error!("Email pattern failed to compile: {}", e))
                .ok()
        })
        .as_ref()
}

/// Why a field blocks submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// Required field is empty
    Missing,
    /// Email value has no `@`
    MissingAt,
    /// Email value has an `@` but does not match the address grammar
    Malformed,
}

/// Input kind of a field, matching the HTML input type it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Email,
    Text,
    TextArea { rows: u16 },
}

/// One of the three contact form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Email,
    Subject,
    Message,
}

impl FormField {
    /// All fields in render order
    pub const ALL: [FormField; 3] = [FormField::Email, FormField::Subject, FormField::Message];

    pub fn key(self) -> &'static str {
        match self {
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }

    pub fn element_id(self) -> String {
        format!("{}-{}", ELEMENT_PREFIX, self.key())
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Email => "you@example.com",
            FormField::Subject => "How can we help?",
            FormField::Message => "Write your message...",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FormField::Email => InputKind::Email,
            FormField::Subject => InputKind::Text,
            FormField::Message => InputKind::TextArea { rows: 5 },
        }
    }

    /// Every field is declared `required`
    pub fn is_required(self) -> bool {
        true
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Email => FormField::Subject,
            FormField::Subject => FormField::Message,
            FormField::Message => FormField::Email,
        }
    }

    pub fn previous(self) -> FormField {
        match self {
            FormField::Email => FormField::Message,
            FormField::Subject => FormField::Email,
            FormField::Message => FormField::Subject,
        }
    }
}

/// Current contents of the form; also the JSON body posted to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormValues {
    pub fn new(
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    /// Replace one field, leaving the other two untouched
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Value as the host's constraint check sees it. Email inputs strip
    /// surrounding whitespace; text inputs and textareas keep it.
    fn checked_value(&self, field: FormField) -> &str {
        match field.input_kind() {
            InputKind::Email => self.get(field).trim(),
            InputKind::Text | InputKind::TextArea { .. } => self.get(field),
        }
    }

    /// First required field left empty, in render order
    pub fn missing_required(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|f| f.is_required() && self.checked_value(*f).is_empty())
    }

    /// Whether the email matches the `type="email"` address grammar
    pub fn email_is_well_formed(&self) -> bool {
        let email = self.checked_value(FormField::Email);
        email_regex().is_some_and(|re| re.is_match(email))
    }

    fn email_issue(&self) -> Option<FieldIssue> {
        if self.email_is_well_formed() {
            None
        } else if self.checked_value(FormField::Email).contains('@') {
            Some(FieldIssue::Malformed)
        } else {
            Some(FieldIssue::MissingAt)
        }
    }

    /// Field a host should focus instead of submitting, and why
    pub fn first_invalid(&self) -> Option<(FormField, FieldIssue)> {
        match self.missing_required() {
            Some(field) => Some((field, FieldIssue::Missing)),
            None => self.email_issue().map(|issue| (FormField::Email, issue)),
        }
    }
}
