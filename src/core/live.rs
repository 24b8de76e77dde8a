use crate::core::counter::AgeCounter;
use crate::domain::model::Tick;
use crate::domain::ports::{Clock, DobHistory};
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct LiveOptions {
    pub interval: Duration,
    /// Stop after this many refreshes; `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

/// Refreshes `counter` every `options.interval` and hands each tick to `emit`
/// until `shutdown` resolves or `max_ticks` is reached. Returns the number of
/// ticks emitted.
///
/// `shutdown` is polled across the whole run, so a signal that arrives while
/// a tick is being emitted is still seen on the next turn of the loop.
pub async fn run_live<H, C, S, F>(
    counter: &mut AgeCounter<H, C>,
    options: LiveOptions,
    shutdown: S,
    mut emit: F,
) -> Result<u64>
where
    H: DobHistory,
    C: Clock,
    S: Future<Output = ()>,
    F: FnMut(&Tick) -> Result<()>,
{
    let mut interval = tokio::time::interval(options.interval);
    tokio::pin!(shutdown);

    let mut emitted = 0u64;
    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::info!("Interrupted, stopping live counter");
                break;
            }
            _ = interval.tick() => {
                let tick = counter.tick()?;
                if tick.second_changed {
                    tracing::trace!("seconds -> {}", tick.breakdown.seconds);
                }
                emit(&tick)?;

                emitted += 1;
                if options.max_ticks.is_some_and(|limit| emitted >= limit) {
                    tracing::debug!("Reached {} refreshes, stopping", emitted);
                    break;
                }
            }
        }
    }

    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Instant;
    use crate::utils::validation::parse_dob;
    use tokio::sync::oneshot;

    struct NoHistory;

    impl DobHistory for NoHistory {
        async fn load(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        async fn save(&self, _dob: &str) -> Result<bool> {
            Ok(true)
        }
    }

    struct FixedClock(Instant);

    impl Clock for FixedClock {
        fn now(&self) -> Instant {
            self.0
        }
    }

    async fn started_counter() -> AgeCounter<NoHistory, FixedClock> {
        let mut counter = AgeCounter::new(NoHistory, FixedClock(parse_dob("2024-03-15 10:00:00").unwrap()));
        counter.start("2000-03-15 10:00:00").await.unwrap();
        counter
    }

    fn options(max_ticks: Option<u64>) -> LiveOptions {
        LiveOptions {
            interval: Duration::from_millis(1),
            max_ticks,
        }
    }

    #[tokio::test]
    async fn test_stops_after_max_ticks() {
        let mut counter = started_counter().await;
        let mut years = Vec::new();

        let emitted = run_live(&mut counter, options(Some(3)), std::future::pending(), |tick| {
            years.push(tick.breakdown.years);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(emitted, 3);
        assert_eq!(years, vec![24, 24, 24]);
    }

    #[tokio::test]
    async fn test_shutdown_during_emit_is_not_lost() {
        let mut counter = started_counter().await;
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let mut seen = 0u64;

        // 在輸出第二筆時送出中斷訊號
        let emitted = run_live(
            &mut counter,
            options(None),
            async move {
                let _ = rx.await;
            },
            |_| {
                seen += 1;
                if seen == 2 {
                    if let Some(tx) = tx.take() {
                        let _ = tx.send(());
                    }
                }
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(emitted, 2);
    }

    #[tokio::test]
    async fn test_emit_error_stops_loop() {
        let mut counter = started_counter().await;
        let result = run_live(&mut counter, options(None), std::future::pending(), |_| {
            Err(crate::utils::error::AgeError::invalid_input("closed"))
        })
        .await;
        assert!(result.is_err());
    }
}
