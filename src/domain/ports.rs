use crate::domain::model::{Instant, LogFormat, OutputFormat};
use crate::utils::error::Result;

/// Source of "now" for the counter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        chrono::Local::now().naive_local()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn history_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn refresh_interval_ms(&self) -> u64;
    fn log_format(&self) -> LogFormat;
    fn log_level(&self) -> Option<&str>;
}

/// Previously entered DOB strings.
pub trait DobHistory: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    /// Returns `false` when `dob` was already stored.
    fn save(&self, dob: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn latest(&self) -> impl std::future::Future<Output = Result<Option<String>>> + Send {
        async move { Ok(self.load().await?.pop()) }
    }
}
