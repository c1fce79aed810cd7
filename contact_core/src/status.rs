//! Submission status shown on the widget's status line

/// Message shown while a request is in flight
pub const SENDING_MESSAGE: &str = "Sending...";

/// Message shown after the backend accepts a submission
pub const SUCCESS_MESSAGE: &str = "Message sent. We will reply soon.";

/// Phase of the current (or last) submission attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn loading() -> Self {
        SubmissionStatus::Loading(SENDING_MESSAGE.to_string())
    }

    pub fn success() -> Self {
        SubmissionStatus::Success(SUCCESS_MESSAGE.to_string())
    }

    pub fn error(message: impl Into<String>) -> Self {
        SubmissionStatus::Error(message.into())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionStatus::Loading(_))
    }

    /// Text for the status line, `None` while idle
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Loading(msg)
            | SubmissionStatus::Success(msg)
            | SubmissionStatus::Error(msg) => Some(msg),
        }
    }

    /// Label of the submit control for this status
    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            "Sending…"
        } else {
            "Send message"
        }
    }
}
