use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub user: UserConfig,
    pub polling: Option<PollingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_base: String,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub email: String,
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    pub interval_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base(&self) -> &str {
        &self.service.api_base
    }

    fn user_email(&self) -> &str {
        &self.user.email
    }

    fn serial_number(&self) -> Option<&str> {
        self.user.serial.as_deref()
    }

    fn poll_interval_seconds(&self) -> u64 {
        self.polling
            .as_ref()
            .and_then(|polling| polling.interval_seconds)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.service
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("service.api_base", &self.service.api_base)?;
        crate::utils::validation::validate_non_empty_string("user.email", &self.user.email)?;
        crate::utils::validation::validate_positive_number(
            "polling.interval_seconds",
            self.poll_interval_seconds(),
            1,
        )?;
        crate::utils::validation::validate_range(
            "service.request_timeout_seconds",
            self.request_timeout_seconds(),
            1,
            300,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[service]
api_base = "http://localhost:5000"
request_timeout_seconds = 15

[user]
email = "alice@example.com"
serial = "SN-42"

[polling]
interval_seconds = 5
"#;

    #[test]
    fn test_from_file_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_base(), "http://localhost:5000");
        assert_eq!(config.user_email(), "alice@example.com");
        assert_eq!(config.serial_number(), Some("SN-42"));
        assert_eq!(config.poll_interval_seconds(), 5);
        assert_eq!(config.request_timeout_seconds(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply_when_sections_omitted() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base = "http://localhost:5000"

[user]
email = "alice@example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.serial_number(), None);
        assert_eq!(
            config.poll_interval_seconds(),
            DEFAULT_POLL_INTERVAL_SECONDS
        );
        assert_eq!(
            config.request_timeout_seconds(),
            DEFAULT_REQUEST_TIMEOUT_SECONDS
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("not valid toml [");
        assert!(matches!(result, Err(CartError::ConfigError { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/nonexistent/cart.toml");
        assert!(matches!(result, Err(CartError::IoError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base = "ftp://wrong"

[user]
email = "alice@example.com"
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base = "http://localhost:5000"

[user]
email = "alice@example.com"

[polling]
interval_seconds = 0
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
