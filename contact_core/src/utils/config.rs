use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::effects::burst::{CLEAR_DELAY_MS, MAX_PARTICLE_LIFETIME_MS};
use crate::utils::error::ConfigError;

/// Environment variable overriding the backend base URL
pub const BACKEND_URL_ENV: &str = "TLC_BACKEND_URL";

/// Path of the contact endpoint, appended to the base URL
pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Backend base URL; empty means same-origin relative paths
    pub base_url: String,

    /// Delay before a burst's particles are cleared
    pub clear_delay_ms: u64,

    /// Overall request timeout; transport default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            clear_delay_ms: CLEAR_DELAY_MS,
            request_timeout_secs: None,
        }
    }
}

impl WidgetConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_yaml::to_string(self).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, content).map_err(write_err)
    }

    /// `~/.tlc_contact/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tlc_contact").join("config.yaml"))
    }

    /// Resolve the effective config: defaults, then `path` if given (it
    /// must exist) or the default file if present, then `TLC_BACKEND_URL`,
    /// then the `--backend-url` flag. Validated once at the end.
    pub fn resolve(path: Option<&Path>, backend_url: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve_with(path, backend_url, |key| std::env::var(key).ok())
    }

    /// [`WidgetConfig::resolve`] with an explicit environment lookup
    pub fn resolve_with<F>(
        path: Option<&Path>,
        backend_url: Option<String>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(default) => Self::load_from_file(default)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides_with(lookup);
        if let Some(url) = backend_url {
            config.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup; an empty value is kept
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        let ok = url.is_empty()
            || url.starts_with("http://")
            || url.starts_with("https://")
            || url.starts_with('/');
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// Full URL of the contact endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim().trim_end_matches('/'), CONTACT_PATH)
    }

    /// Particle clear delay, never shorter than the longest particle flight
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms.max(MAX_PARTICLE_LIFETIME_MS))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
