//! Contact endpoint transport
//!
//! `POST {base}/api/contact` with the form as a JSON body. Any 2xx with a
//! JSON body is a success; anything else is a [`SubmissionError`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::http_client::{create_contact_client, get_contact_client, ContactClientConfig};
use crate::form::FormValues;
use crate::utils::config::WidgetConfig;
use crate::utils::error::SubmissionError;

/// Delivers one submission to the backend
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send(&self, values: &FormValues) -> Result<(), SubmissionError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Transport for the endpoint `config` resolves to. Uses the shared
    /// client unless a request timeout is configured.
    pub fn new(config: &WidgetConfig) -> Self {
        let client = match config.request_timeout() {
            Some(timeout) => {
                let client_config = ContactClientConfig {
                    timeout: Some(timeout),
                    ..ContactClientConfig::default()
                };
                create_contact_client(&client_config).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring request timeout, client build failed: {}", e);
                    get_contact_client().clone()
                })
            }
            None => get_contact_client().clone(),
        };
        Self::with_client(client, config.endpoint())
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn send(&self, values: &FormValues) -> Result<(), SubmissionError> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(values)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // The body must be JSON whatever the status
        let data: Value = serde_json::from_slice(&body)?;

        if !status.is_success() {
            return Err(SubmissionError::Server {
                status: status.as_u16(),
                detail: extract_detail(&data),
            });
        }

        Ok(())
    }
}

/// Pull a readable message out of an error body's `detail` field.
///
/// Strings are used as-is. Lists (the shape validation errors usually
/// take) are flattened to their `msg` entries.
pub fn extract_detail(data: &Value) -> Option<String> {
    let detail = match data.get("detail")? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };

    if detail.trim().is_empty() {
        None
    } else {
        Some(detail)
    }
}
