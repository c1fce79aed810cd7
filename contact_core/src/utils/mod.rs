//! Shared utilities: configuration and error types

pub mod config;
pub mod error;

// Available exports via submodules:
// config::{WidgetConfig, BACKEND_URL_ENV, CONTACT_PATH}
// error::{SubmissionError, ConfigError}
