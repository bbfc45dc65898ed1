use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Default spacing between countdown ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Cancellable countdown driver.
///
/// A background task emits one tick per period onto a channel until
/// [`stop`](Self::stop) is called or the timer is dropped. The session itself
/// is never touched from the task, so only one actor mutates it.
#[derive(Debug)]
pub struct SessionTimer {
    period: Duration,
    ticks: Option<mpsc::Receiver<()>>,
    task: Option<JoinHandle<()>>,
}

impl SessionTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ticks: None,
            task: None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Spawn the tick task. Does nothing if already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        let period = self.period;
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        self.ticks = Some(rx);
        self.task = Some(task);
        tracing::debug!(
            period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "session timer started"
        );
    }

    /// Abort the tick task and drop any pending ticks.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("session timer stopped");
        }
        self.ticks = None;
    }

    /// Wait for the next tick. Returns `false` once the timer is stopped.
    pub async fn next_tick(&mut self) -> bool {
        match self.ticks.as_mut() {
            Some(rx) => rx.recv().await.is_some(),
            None => false,
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
