use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::domain::model::{LogFormat, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "age-counter")]
#[command(about = "Live age counter: years, months, days, hours, minutes and seconds since a date of birth")]
pub struct CliConfig {
    /// Date of birth as "YYYY-MM-DD HH:MM:SS" (defaults to the latest saved one)
    pub dob: Option<String>,

    /// CSV file holding previously entered dates of birth
    #[arg(long)]
    pub history_path: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Keep refreshing the counter until interrupted
    #[arg(long)]
    pub live: bool,

    /// Stop live mode after this many refreshes
    #[arg(long, requires = "live")]
    pub ticks: Option<u64>,

    /// Refresh interval in milliseconds for live mode
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Print saved dates of birth and exit
    #[arg(long)]
    pub list: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            history_path: self.history_path.clone(),
            output_format: self.format,
            refresh_interval_ms: self.interval_ms,
            log_format: self.json_logs.then_some(LogFormat::Json),
        }
    }

    /// 讀取 TOML 設定檔 (若有指定) 並套用命令列覆蓋
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Settings::resolve(&file, self.overrides())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.history_path {
            validation::validate_path("--history-path", path)?;
        }
        if let Some(ticks) = self.ticks {
            validation::validate_positive_number("--ticks", ticks, 1)?;
        }
        if let Some(dob) = &self.dob {
            validation::validate_non_empty_string("dob", dob)?;
        }
        Ok(())
    }
}
