#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{LogFormat, OutputFormat};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Effective settings: TOML file values with command-line overrides on top.
#[derive(Debug, Clone)]
pub struct Settings {
    pub history_path: String,
    pub output_format: OutputFormat,
    pub refresh_interval_ms: u64,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub history_path: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub refresh_interval_ms: Option<u64>,
    pub log_format: Option<LogFormat>,
}

impl Settings {
    pub fn resolve(file: &TomlConfig, overrides: Overrides) -> Result<Self> {
        file.validate()?;

        Ok(Self {
            history_path: overrides
                .history_path
                .unwrap_or_else(|| file.history_path().to_string()),
            output_format: match overrides.output_format {
                Some(format) => format,
                None => file.output_format()?,
            },
            refresh_interval_ms: overrides
                .refresh_interval_ms
                .unwrap_or_else(|| file.refresh_interval_ms()),
            log_level: file.logging.level.clone(),
            log_format: match overrides.log_format {
                Some(format) => format,
                None => file.log_format()?,
            },
        })
    }
}

impl ConfigProvider for Settings {
    fn history_path(&self) -> &str {
        &self.history_path
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }

    fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("history_path", &self.history_path)?;
        validation::validate_range(
            "refresh_interval_ms",
            self.refresh_interval_ms,
            toml_config::MIN_REFRESH_INTERVAL_MS,
            toml_config::MAX_REFRESH_INTERVAL_MS,
        )?;
        if let Some(level) = &self.log_level {
            validation::validate_non_empty_string("log_level", level)?;
        }
        Ok(())
    }
}
