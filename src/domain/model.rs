use crate::utils::error::{AgeError, Result};
use serde::{Deserialize, Serialize};

/// A calendar date plus time-of-day in one local calendar. No timezone
/// conversion is ever applied.
pub type Instant = chrono::NaiveDateTime;

/// Elapsed time between two instants, decomposed into calendar units
/// (years, months) and fixed-length units (days and below).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElapsedBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ElapsedBreakdown {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Days, hours, minutes and seconds collapsed back into seconds.
    pub fn sub_month_seconds(&self) -> i64 {
        self.days as i64 * 86_400
            + self.hours as i64 * 3_600
            + self.minutes as i64 * 60
            + self.seconds as i64
    }
}

/// One refresh of the live counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub breakdown: ElapsedBreakdown,
    /// `seconds` differs from the previous tick (or this is the first tick).
    pub second_changed: bool,
}

/// How a breakdown is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AgeError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: text, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}
