use crate::core::elapsed;
use crate::domain::model::{Instant, Tick};
use crate::domain::ports::{Clock, DobHistory};
use crate::utils::error::{AgeError, Result};
use crate::utils::validation::{parse_dob, validate_not_future};

/// State of one counting session: the chosen DOB, the history it was saved
/// to and the clock it is measured against.
pub struct AgeCounter<H: DobHistory, C: Clock> {
    history: H,
    clock: C,
    dob: Option<Instant>,
    last_second: Option<u32>,
}

impl<H: DobHistory, C: Clock> AgeCounter<H, C> {
    pub fn new(history: H, clock: C) -> Self {
        Self {
            history,
            clock,
            dob: None,
            last_second: None,
        }
    }

    pub fn dob(&self) -> Option<Instant> {
        self.dob
    }

    pub async fn saved_dobs(&self) -> Result<Vec<String>> {
        self.history.load().await
    }

    /// 解析並驗證輸入，成功後寫入歷史紀錄
    pub async fn start(&mut self, dob_text: &str) -> Result<Instant> {
        let dob = parse_dob(dob_text)?;
        validate_not_future(dob, self.clock.now())?;

        // 歷史紀錄寫入失敗不影響計數
        match self.history.save(dob_text.trim()).await {
            Ok(true) => tracing::debug!("Saved DOB {} to history", dob),
            Ok(false) => tracing::debug!("DOB {} already in history", dob),
            Err(e) => tracing::warn!("Could not save DOB to history: {}", e),
        }

        self.dob = Some(dob);
        self.last_second = None;
        tracing::info!("Counting from {}", dob);
        Ok(dob)
    }

    /// Starts from the most recently saved DOB.
    pub async fn resume_latest(&mut self) -> Result<Instant> {
        let latest = self
            .history
            .latest()
            .await?
            .ok_or_else(|| AgeError::invalid_input("No saved DOBs. Enter one as YYYY-MM-DD HH:MM:SS"))?;
        tracing::debug!("Resuming with saved DOB {}", latest);
        self.start(&latest).await
    }

    pub fn tick(&mut self) -> Result<Tick> {
        let dob = self
            .dob
            .ok_or_else(|| AgeError::invalid_input("Counter has not been started"))?;
        let breakdown = elapsed::compute(self.clock.now(), dob)?;

        let second_changed = self.last_second != Some(breakdown.seconds);
        self.last_second = Some(breakdown.seconds);

        Ok(Tick {
            breakdown,
            second_changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemoryHistory {
        entries: Arc<Mutex<Vec<String>>>,
        fail_saves: bool,
    }

    impl DobHistory for MemoryHistory {
        async fn load(&self) -> Result<Vec<String>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn save(&self, dob: &str) -> Result<bool> {
            if self.fail_saves {
                return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into());
            }
            let mut entries = self.entries.lock().unwrap();
            if entries.iter().any(|e| e == dob) {
                return Ok(false);
            }
            entries.push(dob.to_string());
            Ok(true)
        }
    }

    #[derive(Clone)]
    struct ManualClock(Arc<Mutex<Instant>>);

    impl ManualClock {
        fn at(s: &str) -> Self {
            Self(Arc::new(Mutex::new(parse_dob(s).unwrap())))
        }

        fn advance(&self, seconds: i64) {
            let mut now = self.0.lock().unwrap();
            *now += chrono::TimeDelta::seconds(seconds);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.0.lock().unwrap()
        }
    }

    #[tokio::test]
    async fn test_start_saves_once() {
        let history = MemoryHistory::default();
        let mut counter = AgeCounter::new(history.clone(), ManualClock::at("2024-01-01 00:00:00"));

        counter.start("2000-01-01 00:00:00").await.unwrap();
        counter.start(" 2000-01-01 00:00:00 ").await.unwrap();

        assert_eq!(counter.saved_dobs().await.unwrap(), vec!["2000-01-01 00:00:00"]);
    }

    #[tokio::test]
    async fn test_start_rejects_future_dob() {
        let history = MemoryHistory::default();
        let mut counter = AgeCounter::new(history.clone(), ManualClock::at("2024-01-01 00:00:00"));

        let err = counter.start("2024-01-01 00:00:01").await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "DOB cannot be in the future");
        assert!(counter.dob().is_none());
        assert!(history.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_does_not_abort() {
        let history = MemoryHistory {
            fail_saves: true,
            ..Default::default()
        };
        let mut counter = AgeCounter::new(history, ManualClock::at("2024-01-01 00:00:00"));
        assert!(counter.start("2000-01-01 00:00:00").await.is_ok());
        assert_eq!(counter.tick().unwrap().breakdown.years, 24);
    }

    #[tokio::test]
    async fn test_tick_tracks_second_changes() {
        let clock = ManualClock::at("2024-03-15 10:00:00");
        let mut counter = AgeCounter::new(MemoryHistory::default(), clock.clone());
        counter.start("2000-03-15 10:00:00").await.unwrap();

        let first = counter.tick().unwrap();
        assert!(first.second_changed);
        assert_eq!(first.breakdown.years, 24);

        let same = counter.tick().unwrap();
        assert!(!same.second_changed);

        clock.advance(1);
        let next = counter.tick().unwrap();
        assert!(next.second_changed);
        assert_eq!(next.breakdown.seconds, 1);
    }

    #[tokio::test]
    async fn test_tick_before_start_fails() {
        let mut counter = AgeCounter::new(MemoryHistory::default(), ManualClock::at("2024-01-01 00:00:00"));
        assert!(counter.tick().is_err());
    }

    #[tokio::test]
    async fn test_resume_latest() {
        let history = MemoryHistory::default();
        history.save("1980-05-05 05:05:05").await.unwrap();
        history.save("1999-09-09 09:09:09").await.unwrap();

        let mut counter = AgeCounter::new(history, ManualClock::at("2024-01-01 00:00:00"));
        let dob = counter.resume_latest().await.unwrap();
        assert_eq!(dob, parse_dob("1999-09-09 09:09:09").unwrap());
    }

    #[tokio::test]
    async fn test_resume_latest_with_empty_history() {
        let mut counter = AgeCounter::new(MemoryHistory::default(), ManualClock::at("2024-01-01 00:00:00"));
        let err = counter.resume_latest().await.unwrap_err();
        assert!(matches!(err, AgeError::InvalidInput { .. }));
    }
}
