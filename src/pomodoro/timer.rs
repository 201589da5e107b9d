use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::display::ProgressReporter;

pub const TICK: Duration = Duration::from_secs(1);
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Source of elapsed time for the timer.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs a countdown of `minutes`, reporting once per elapsed second.
///
/// Returns only after `minutes * 60` ticks have been reported. Reporter
/// failures are logged and never shorten the interval.
pub async fn run_timer<C, P>(clock: &C, reporter: &mut P, minutes: u64, label: &str)
where
    C: Clock + ?Sized,
    P: ProgressReporter + ?Sized,
{
    // Config caps durations well below this; saturate rather than wrap.
    let total_seconds = minutes.saturating_mul(SECONDS_PER_MINUTE);

    if let Err(e) = reporter.start(label, total_seconds) {
        debug!(label, error = %e, "progress start failed");
    }

    for second in 1..=total_seconds {
        clock.sleep(TICK).await;
        if let Err(e) = reporter.report_tick(second, total_seconds, label) {
            debug!(label, second, error = %e, "progress update failed");
        }
    }

    if let Err(e) = reporter.finish(label) {
        debug!(label, error = %e, "progress finish failed");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DisplayError;
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Advances instantly and counts the seconds it was asked to sleep.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct FakeClock {
        pub(crate) elapsed: Arc<AtomicU64>,
    }

    impl FakeClock {
        pub(crate) fn elapsed_seconds(&self) -> u64 {
            self.elapsed.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Clock for FakeClock {
        async fn sleep(&self, duration: Duration) {
            self.elapsed.fetch_add(duration.as_secs(), Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct TickLog {
        started: Option<(String, u64)>,
        ticks: Vec<(u64, u64, u64)>,
        finished: bool,
        fail: bool,
    }

    struct LoggingReporter<'a> {
        clock: &'a FakeClock,
        log: TickLog,
    }

    impl ProgressReporter for LoggingReporter<'_> {
        fn start(&mut self, label: &str, total_seconds: u64) -> Result<(), DisplayError> {
            self.log.started = Some((label.to_string(), total_seconds));
            Ok(())
        }

        fn report_tick(
            &mut self,
            current: u64,
            total: u64,
            _label: &str,
        ) -> Result<(), DisplayError> {
            self.log.ticks.push((current, total, self.clock.elapsed_seconds()));
            if self.log.fail {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed").into());
            }
            Ok(())
        }

        fn finish(&mut self, _label: &str) -> Result<(), DisplayError> {
            self.log.finished = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_one_tick_per_second() {
        let clock = FakeClock::default();
        let mut reporter = LoggingReporter {
            clock: &clock,
            log: TickLog::default(),
        };

        run_timer(&clock, &mut reporter, 2, "Working").await;

        assert_eq!(reporter.log.started, Some(("Working".to_string(), 120)));
        assert_eq!(reporter.log.ticks.len(), 120);
        for (i, &(current, total, elapsed)) in reporter.log.ticks.iter().enumerate() {
            let expected = i as u64 + 1;
            assert_eq!(current, expected);
            assert_eq!(total, 120);
            // each tick lands exactly one simulated second after the previous
            assert_eq!(elapsed, expected);
        }
        assert!(reporter.log.finished);
        assert_eq!(clock.elapsed_seconds(), 120);
    }

    #[tokio::test]
    async fn test_failing_reporter_keeps_full_duration() {
        let clock = FakeClock::default();
        let mut reporter = LoggingReporter {
            clock: &clock,
            log: TickLog {
                fail: true,
                ..TickLog::default()
            },
        };

        run_timer(&clock, &mut reporter, 1, "Short break").await;

        assert_eq!(reporter.log.ticks.len(), 60);
        assert_eq!(clock.elapsed_seconds(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_waits() {
        let before = tokio::time::Instant::now();
        TokioClock.sleep(TICK).await;
        assert!(tokio::time::Instant::now() - before >= TICK);
    }
}
