use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use super::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Falls back to the current directory if the platform has no config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("bishnoi").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads and validates `path`. A missing file yields `Config::default()`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Both base URLs parse
    /// - Timeouts are non-zero
    /// - Feed page size is within 1..=100
    /// - Minimum password length is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("api.base_url", &self.api.base_url),
            ("feed.base_url", &self.feed.base_url),
        ] {
            Url::parse(value).map_err(|e| invalid(format!("{name} '{value}' is not a URL: {e}")))?;
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(invalid("Timeouts must be greater than zero"));
        }

        if !(1..=100).contains(&self.feed.per_page) {
            return Err(invalid(format!(
                "feed.per_page must be between 1 and 100, got {}",
                self.feed.per_page
            )));
        }

        if self.validation.password_min_length == 0 {
            return Err(invalid("validation.password_min_length must be at least 1"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.validation.password_min_length, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let file = write_config(
            r#"
            [api]
            base_url = "http://localhost:8000"

            [feed]
            per_page = 25

            [validation]
            password_min_length = 10
            "#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.feed.per_page, 25);
        assert_eq!(config.validation.password_min_length, 10);
        assert!(config.storage.token_file.is_none());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = write_config("[api\nbase_url = ");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let file = write_config("[feed]\nper_page = 0\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));

        let mut config = Config::default();
        config.api.base_url = "localhost".to_string();
        assert!(config.validate().is_err());
    }
}
