pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvHistory, SystemClock};
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{counter::AgeCounter, elapsed::compute};
pub use domain::model::{ElapsedBreakdown, Instant, Tick};
pub use utils::error::{AgeError, Result};
