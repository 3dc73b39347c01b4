use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tracing::debug;

/// Shortest interval a poll will tick at; shorter ones are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for polling behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Time between checks; the first check runs one interval after start
    pub interval: Duration,
    /// Total time after which the poll is abandoned
    pub timeout: Duration,
}

impl PollConfig {
    /// Create a new poll configuration
    ///
    /// An interval below [`MIN_INTERVAL`] is raised to it.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            timeout,
        }
    }

    /// Preset: waiting for the translation widget's control (200ms, up to 10s)
    pub fn widget_control() -> Self {
        Self::new(Duration::from_millis(200), Duration::from_secs(10))
    }

    /// The interval actually ticked at, never below [`MIN_INTERVAL`]
    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_INTERVAL)
    }

    /// Upper bound on how many checks a poll can make before its deadline
    pub fn max_attempts(&self) -> u32 {
        let interval = self.effective_interval().as_nanos();
        u32::try_from(self.timeout.as_nanos() / interval).unwrap_or(u32::MAX)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::widget_control()
    }
}

/// How a poll ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The check produced a value
    Ready { value: T, attempts: u32 },
    /// The deadline passed first
    TimedOut { attempts: u32 },
    /// The poll was cancelled through its handle
    Cancelled { attempts: u32 },
}

impl<T> PollOutcome<T> {
    /// Whether the check produced a value
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }

    /// Number of checks run before the poll ended
    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Ready { attempts, .. }
            | PollOutcome::TimedOut { attempts }
            | PollOutcome::Cancelled { attempts } => *attempts,
        }
    }

    /// The value found, if the poll ended ready
    pub fn into_value(self) -> Option<T> {
        match self {
            PollOutcome::Ready { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Cancels the [`PollTask`] it was taken from. Cancelling before the task
/// starts makes it end on its first wait.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    notify: Arc<Notify>,
}

impl CancelHandle {
    /// Stop the poll at its next wait
    pub fn cancel(&self) {
        self.notify.notify_one();
    }
}

/// A scheduled, cancellable check with a fixed interval and a deadline.
#[derive(Debug)]
pub struct PollTask {
    name: String,
    config: PollConfig,
    cancel: Arc<Notify>,
}

impl PollTask {
    /// Create a poll task
    ///
    /// # Arguments
    /// * `name` - Name of the task for logging
    /// * `config` - Interval and deadline
    pub fn new(name: impl Into<String>, config: PollConfig) -> Self {
        Self {
            name: name.into(),
            config,
            cancel: Arc::new(Notify::new()),
        }
    }

    /// The interval and deadline this task runs with
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// A handle that cancels this task, usable from another future
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            notify: Arc::clone(&self.cancel),
        }
    }

    /// Run `check` every interval until it returns `Some`, the deadline
    /// passes, or the task is cancelled, whichever comes first.
    ///
    /// A check due at the same instant as the deadline still runs.
    ///
    /// # Arguments
    /// * `check` - Called once per tick; `Some` ends the poll
    ///
    /// # Returns
    /// How the poll ended, with the number of checks made
    pub async fn run<T, F>(self, mut check: F) -> PollOutcome<T>
    where
        F: FnMut() -> Option<T>,
    {
        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let period = self.config.effective_interval();
        let mut ticker = interval_at(started + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut attempts = 0;
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.notified() => {
                    debug!("{}: Cancelled after {} attempts", self.name, attempts);
                    return PollOutcome::Cancelled { attempts };
                }
                _ = ticker.tick() => {}
                _ = sleep_until(deadline) => {
                    debug!(
                        "{}: Gave up after {:?} ({} attempts)",
                        self.name, self.config.timeout, attempts
                    );
                    return PollOutcome::TimedOut { attempts };
                }
            }

            attempts += 1;
            if let Some(value) = check() {
                debug!(
                    "{}: Ready after {} attempts ({:?})",
                    self.name,
                    attempts,
                    started.elapsed()
                );
                return PollOutcome::Ready { value, attempts };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_poll_config_widget_control() {
        let config = PollConfig::widget_control();
        assert_eq!(config.interval, Duration::from_millis(200));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts(), 50);
    }

    #[test]
    fn test_poll_config_raises_zero_interval() {
        let config = PollConfig::new(Duration::ZERO, Duration::from_millis(5));
        assert_eq!(config.interval, MIN_INTERVAL);
        assert_eq!(config.max_attempts(), 5);

        let literal = PollConfig {
            interval: Duration::ZERO,
            timeout: Duration::from_millis(5),
        };
        assert_eq!(literal.effective_interval(), MIN_INTERVAL);
        assert_eq!(literal.max_attempts(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_with_zero_interval_runs() {
        let config = PollConfig {
            interval: Duration::ZERO,
            timeout: Duration::from_millis(3),
        };
        let task = PollTask::new("test", config);
        let started = Instant::now();

        let outcome: PollOutcome<()> = task.run(|| None).await;

        assert_eq!(outcome, PollOutcome::TimedOut { attempts: 3 });
        assert_eq!(started.elapsed(), Duration::from_millis(3));
    }

    #[test]
    fn test_poll_config_default_is_widget_control() {
        assert_eq!(PollConfig::default(), PollConfig::widget_control());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_on_first_check() {
        let task = PollTask::new("test", PollConfig::widget_control());
        let started = Instant::now();

        let outcome = task.run(|| Some(7)).await;

        assert_eq!(outcome, PollOutcome::Ready { value: 7, attempts: 1 });
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_after_several_checks() {
        let task = PollTask::new("test", PollConfig::widget_control());
        let calls = Cell::new(0);

        let outcome = task
            .run(|| {
                calls.set(calls.get() + 1);
                (calls.get() == 4).then_some("found")
            })
            .await;

        assert_eq!(outcome.attempts(), 4);
        assert_eq!(outcome.into_value(), Some("found"));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_times_out() {
        let config = PollConfig::new(Duration::from_millis(200), Duration::from_secs(1));
        let task = PollTask::new("test", config);
        let started = Instant::now();

        let outcome: PollOutcome<()> = task.run(|| None).await;

        assert!(matches!(outcome, PollOutcome::TimedOut { .. }));
        assert_eq!(outcome.attempts(), 5);
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_stops_probing_after_ready() {
        let task = PollTask::new("test", PollConfig::widget_control());
        let calls = Cell::new(0);

        let outcome = task
            .run(|| {
                calls.set(calls.get() + 1);
                Some(())
            })
            .await;
        tokio::time::advance(Duration::from_secs(5)).await;

        assert!(outcome.is_ready());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_cancelled_before_start() {
        let task = PollTask::new("test", PollConfig::widget_control());
        task.cancel_handle().cancel();

        let outcome: PollOutcome<()> = task.run(|| None).await;
        assert_eq!(outcome, PollOutcome::Cancelled { attempts: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_cancelled_while_running() {
        let task = PollTask::new("test", PollConfig::widget_control());
        let handle = task.cancel_handle();

        let canceller = async move {
            tokio::time::sleep(Duration::from_millis(700)).await;
            handle.cancel();
        };
        let (outcome, ()) = tokio::join!(task.run(|| None::<()>), canceller);

        assert_eq!(outcome, PollOutcome::Cancelled { attempts: 3 });
    }
}
