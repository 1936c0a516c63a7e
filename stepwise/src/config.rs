//! Wizard settings.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{
    NaiveDateTime,
    format::{Item, StrftimeItems},
};
use serde::Deserialize;

/// Matches `toLocaleString('en-GB')`, e.g. "19/10/2026, 14:03:22".
const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Error type for loading a `WizardConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid timestamp format '{0}'")]
    TimestampFormat(String),
}

/// Behavioural settings of a wizard.
///
/// Every key is optional in TOML; missing keys take the defaults below.
///
/// ```toml
/// auto_advance_delay_ms = 300
/// timestamp_format = "%d/%m/%Y, %H:%M:%S"
/// fallback_contact = "info@abacusenergysolutions.co.uk"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Delay between choosing a radio option and the automatic advance.
    pub auto_advance_delay_ms: u64,

    /// `chrono` format string for the submission timestamp (local time).
    pub timestamp_format: String,

    /// Where users are sent when a submission fails.
    pub fallback_contact: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            auto_advance_delay_ms: 300,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            fallback_contact: "info@abacusenergysolutions.co.uk".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        check_timestamp_format(&config.timestamp_format)?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the auto-advance delay.
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the timestamp format. Unknown `strftime` specifiers are rejected.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Result<Self, ConfigError> {
        let format = format.into();
        check_timestamp_format(&format)?;
        self.timestamp_format = format;
        Ok(self)
    }

    /// Set the fallback contact shown after a failed submission.
    pub fn with_fallback_contact(mut self, contact: impl Into<String>) -> Self {
        self.fallback_contact = contact.into();
        self
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    /// Render a submission timestamp.
    ///
    /// `timestamp_format` is public, so a format that slipped past the checks
    /// falls back to the default instead of failing the submission.
    pub fn timestamp(&self, now: NaiveDateTime) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        if write!(out, "{}", now.format(&self.timestamp_format)).is_ok() {
            return out;
        }
        tracing::warn!(format = %self.timestamp_format, "bad timestamp format, using default");
        now.format(DEFAULT_TIMESTAMP_FORMAT).to_string()
    }

    /// The message shown when the sink could not be reached.
    pub fn failure_message(&self) -> String {
        format!(
            "There was an error submitting your information. Please try again or contact us directly at {}",
            self.fallback_contact
        )
    }
}

fn check_timestamp_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::TimestampFormat(format.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WizardConfig::default();
        assert_eq!(config.auto_advance_delay(), Duration::from_millis(300));
        assert_eq!(config.timestamp_format, "%d/%m/%Y, %H:%M:%S");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = WizardConfig::from_toml_str("auto_advance_delay_ms = 150").unwrap();
        assert_eq!(config.auto_advance_delay(), Duration::from_millis(150));
        assert_eq!(config.fallback_contact, WizardConfig::default().fallback_contact);
    }

    #[test]
    fn unknown_types_are_rejected() {
        let err = WizardConfig::from_toml_str("auto_advance_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_timestamp_format_is_rejected() {
        let err = WizardConfig::from_toml_str("timestamp_format = \"%Q\"").unwrap_err();
        assert!(matches!(err, ConfigError::TimestampFormat(ref f) if f == "%Q"));

        assert!(WizardConfig::new().with_timestamp_format("%Y-%m-%d %Q").is_err());
        let config = WizardConfig::new().with_timestamp_format("%Y-%m-%d").unwrap();
        assert_eq!(config.timestamp_format, "%Y-%m-%d");
    }

    #[test]
    fn timestamp_falls_back_on_a_bad_format() {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let config = WizardConfig {
            timestamp_format: "%Q".to_string(),
            ..WizardConfig::default()
        };
        assert_eq!(config.timestamp(now), "19/10/2026, 09:30:00");
        assert_eq!(WizardConfig::default().timestamp(now), "19/10/2026, 09:30:00");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wizard.toml");
        fs::write(&path, "fallback_contact = \"help@example.com\"\n").unwrap();

        let config = WizardConfig::load(&path).unwrap();
        assert_eq!(config.fallback_contact, "help@example.com");
        assert!(config.failure_message().ends_with("help@example.com"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = WizardConfig::load("/nonexistent/wizard.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wizard.toml"));
    }
}
