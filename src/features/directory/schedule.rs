//! Periodic directory publishing
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use super::publisher::Publish;

/// Runs one publish shortly after startup, then one every `interval` until stopped
#[derive(Default)]
pub struct PublishSchedule {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PublishSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start publishing. A schedule that is already running is replaced.
    /// A zero or unrepresentable `interval` publishes once and then stops.
    pub fn start(&self, publisher: Arc<dyn Publish>, initial_delay: Duration, interval: Duration) {
        let handle = tokio::spawn(async move {
            sleep(initial_delay).await;
            publisher.publish().await;

            if interval.is_zero() {
                warn!("Publish interval is zero, no further directory publishes");
                return;
            }
            let Some(first_tick) = Instant::now().checked_add(interval) else {
                warn!("Publish interval {interval:?} is out of range, no further directory publishes");
                return;
            };

            let mut ticker = interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Running scheduled directory publish");
                publisher.publish().await;
            }
        });

        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }

        info!(
            "📅 Directory publishing scheduled (first in {}s, then every {}s)",
            initial_delay.as_secs(),
            interval.as_secs()
        );
    }

    /// Stop publishing. Safe to call repeatedly or before `start`.
    pub fn stop(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
            info!("Directory publishing stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.slot().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // A poisoned lock still holds a valid handle
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for PublishSchedule {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPublisher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Publish for CountingPublisher {
        async fn publish(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    const DELAY: Duration = Duration::from_secs(5);
    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_publishes_after_delay_then_daily() {
        let publisher = Arc::new(CountingPublisher::default());
        let schedule = PublishSchedule::new();
        schedule.start(publisher.clone(), DELAY, DAY);
        assert!(schedule.is_running());

        sleep(Duration::from_secs(4)).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);

        sleep(DAY).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 2);

        sleep(DAY).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 3);

        schedule.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_immediately_prevents_publishes() {
        let publisher = Arc::new(CountingPublisher::default());
        let schedule = PublishSchedule::new();
        schedule.start(publisher.clone(), DELAY, DAY);
        schedule.stop();

        assert!(!schedule.is_running());
        sleep(DAY * 3).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_publishing_halts_further_publishes() {
        let publisher = Arc::new(CountingPublisher::default());
        let schedule = PublishSchedule::new();
        schedule.start(publisher.clone(), DELAY, DAY);

        sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);

        schedule.stop();
        sleep(DAY * 2).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_safe_before_start() {
        let schedule = PublishSchedule::new();
        schedule.stop();
        schedule.stop();
        assert!(!schedule.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_schedule() {
        let publisher = Arc::new(CountingPublisher::default());
        let schedule = PublishSchedule::new();
        schedule.start(publisher.clone(), DELAY, DAY);
        schedule.start(publisher.clone(), DELAY, DAY);

        sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);

        schedule.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_publishes_once_without_panicking() {
        let publisher = Arc::new(CountingPublisher::default());
        let schedule = PublishSchedule::new();
        schedule.start(publisher.clone(), DELAY, Duration::ZERO);

        sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
        assert!(!schedule.is_running());

        sleep(DAY).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflowing_interval_publishes_once_without_panicking() {
        let publisher = Arc::new(CountingPublisher::default());
        let schedule = PublishSchedule::new();
        schedule.start(publisher.clone(), DELAY, Duration::MAX);

        sleep(DELAY + Duration::from_secs(1)).await;
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
        assert!(!schedule.is_running());
    }
}
