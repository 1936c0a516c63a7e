use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

/// How the sink interprets the endpoint's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Any completed request counts as accepted; only transport failures fail.
    #[default]
    Opaque,
    /// Non-2xx statuses and `{"result": "error"}` bodies fail the delivery.
    Inspect,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read sink config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sink config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where and how to post submissions.
///
/// ```toml
/// endpoint = "https://script.example.com/exec"
/// timeout_secs = 30
/// response_mode = "inspect"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpSinkConfig {
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub response_mode: ResponseMode,
}

fn default_timeout_secs() -> u64 {
    30
}

impl HttpSinkConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: default_timeout_secs(),
            response_mode: ResponseMode::default(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = mode;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
