//! Shared HTTP client for contact submissions
//!
//! The client is built lazily and reused so repeated submissions share a
//! connection pool. No overall timeout is set by default; a submission
//! waits as long as the transport does.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

static CONTACT_CLIENT: OnceLock<Client> = OnceLock::new();

/// Settings for building a contact client
#[derive(Debug, Clone)]
pub struct ContactClientConfig {
    /// Overall request timeout (default: none)
    pub timeout: Option<Duration>,
    /// Pool idle timeout (default: 60 seconds)
    pub pool_idle_timeout: Duration,
    /// Max idle connections per host (default: 2)
    pub pool_max_idle_per_host: usize,
}

impl Default for ContactClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            pool_idle_timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 2,
        }
    }
}

fn user_agent() -> String {
    format!("tlc-contact/{}", env!("CARGO_PKG_VERSION"))
}

/// Build a client from `config`
pub fn create_contact_client(config: &ContactClientConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(user_agent());

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Process-wide client with default settings
///
/// Falls back to `Client::new()` if the tuned builder fails, so callers
/// always get a client.
pub fn get_contact_client() -> &'static Client {
    CONTACT_CLIENT.get_or_init(|| {
        create_contact_client(&ContactClientConfig::default()).unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        let config = ContactClientConfig::default();
        assert!(config.timeout.is_none());
        assert_eq!(config.pool_max_idle_per_host, 2);
    }

    #[test]
    fn test_get_contact_client_is_shared() {
        let a = get_contact_client();
        let b = get_contact_client();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_create_with_timeout() {
        let config = ContactClientConfig {
            timeout: Some(Duration::from_secs(5)),
            ..ContactClientConfig::default()
        };
        assert!(create_contact_client(&config).is_ok());
    }
}
