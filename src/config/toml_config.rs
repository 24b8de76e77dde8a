use crate::adapters::csv_history::DEFAULT_HISTORY_FILE;
use crate::domain::model::{LogFormat, OutputFormat};
use crate::core::ConfigProvider;
use crate::utils::error::{AgeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;
pub const MIN_REFRESH_INTERVAL_MS: u64 = 50;
pub const MAX_REFRESH_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub history_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub format: Option<String>,
    pub refresh_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AgeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn history_path(&self) -> &str {
        self.storage
            .history_path
            .as_deref()
            .unwrap_or(DEFAULT_HISTORY_FILE)
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.display
            .refresh_interval_ms
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.display
            .format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match self.logging.format.as_deref() {
            None => Ok(LogFormat::default()),
            Some(raw) => raw.parse().map_err(|reason| AgeError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: raw.to_string(),
                reason,
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("storage.history_path", self.history_path())?;
        validation::validate_range(
            "display.refresh_interval_ms",
            self.refresh_interval_ms(),
            MIN_REFRESH_INTERVAL_MS,
            MAX_REFRESH_INTERVAL_MS,
        )?;
        self.output_format().map_err(|_| AgeError::InvalidConfigValueError {
            field: "display.format".to_string(),
            value: self.display.format.clone().unwrap_or_default(),
            reason: "Unsupported format. Valid formats: text, json".to_string(),
        })?;
        if let Some(level) = &self.logging.level {
            validation::validate_one_of(
                "logging.level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }
        self.log_format()?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn history_path(&self) -> &str {
        self.history_path()
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format().unwrap_or_default()
    }

    fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms()
    }

    fn log_format(&self) -> LogFormat {
        self.log_format().unwrap_or_default()
    }

    fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[storage]
history_path = "./data/dobs.csv"

[display]
format = "json"
refresh_interval_ms = 500

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.history_path(), "./data/dobs.csv");
        assert_eq!(config.refresh_interval_ms(), 500);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.history_path(), DEFAULT_HISTORY_FILE);
        assert_eq!(config.refresh_interval_ms(), DEFAULT_REFRESH_INTERVAL_MS);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AGE_COUNTER_TEST_DIR", "/tmp/age-counter");

        let toml_content = r#"
[storage]
history_path = "${AGE_COUNTER_TEST_DIR}/history.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.history_path(), "/tmp/age-counter/history.csv");

        std::env::remove_var("AGE_COUNTER_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let too_fast = TomlConfig::from_toml_str("[display]\nrefresh_interval_ms = 1\n").unwrap();
        assert!(too_fast.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[display]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_format_is_case_insensitive() {
        let config = TomlConfig::from_toml_str("[display]\nformat = \"JSON\"\n").unwrap();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert!(config.validate().is_ok());

        let err = TomlConfig::from_toml_str("[display]\nformat = \"Yaml\"\n")
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            AgeError::InvalidConfigValueError { ref field, .. } if field == "display.format"
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[display\n").unwrap_err();
        assert!(matches!(err, AgeError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nhistory_path = \"file-test.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.history_path(), "file-test.csv");
    }
}
