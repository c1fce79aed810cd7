//! Error types for the contact widget
//!
//! - `thiserror` for library errors ([`SubmissionError`], [`ConfigError`])
//! - `anyhow` at the application edges, in the CLI crate
//!
//! Every submission failure ends up as the widget's `Error` status; the
//! variants only decide which message the user reads.

use thiserror::Error;

/// Shown when a failure carries no usable message
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Shown when the backend rejects a submission without a `detail`
pub const SUBMIT_FAILED: &str = "Failed to submit";

/// Why a single submission attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Request could not be sent or the response could not be read
    #[error("{0}")]
    Network(String),

    /// Non-2xx response, optionally carrying the server's `detail`
    #[error("{}", .detail.as_deref().unwrap_or(SUBMIT_FAILED))]
    Server { status: u16, detail: Option<String> },

    /// Response body is not valid JSON
    #[error("{0}")]
    Parse(String),
}

impl SubmissionError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        SubmissionError::Network(err.to_string())
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        SubmissionError::Parse(err.to_string())
    }

    /// Text for the status line; never empty
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            SubmissionError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::network(err)
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::parse(err)
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid backend URL '{0}': expected http(s)://host or an empty string")]
    InvalidBaseUrl(String),
}
