//! # Delayed Jobs
//!
//! Runs a job once after a delay chosen by a [`DelayPolicy`], on its own Tokio task.
//!
//! Production code uses [`UniformDelay`]; tests use [`FixedDelay`] together with
//! paused Tokio time so nothing waits on the wall clock.

use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

/// Decides how long the next job waits before running.
pub trait DelayPolicy: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// Delay drawn uniformly from `[min, max)`.
#[derive(Debug, Clone, Copy)]
pub struct UniformDelay {
    min: Duration,
    max: Duration,
}

impl UniformDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }
}

impl DelayPolicy for UniformDelay {
    fn next_delay(&self) -> Duration {
        // Degenerate window: nothing to draw from
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

/// Always the same delay.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl DelayPolicy for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}

/// Cooperative cancellation flag shared between a task and its owner.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a job waiting on its delay or already running.
///
/// Awaiting [`join`](Self::join) yields `Some(output)` when the job ran, or `None`
/// when it was cancelled before its delay elapsed.
#[derive(Debug)]
pub struct ScheduledTask<T> {
    delay: Duration,
    token: CancellationToken,
    handle: JoinHandle<Option<T>>,
}

impl<T> ScheduledTask<T> {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    pub async fn join(self) -> Result<Option<T>, JoinError> {
        self.handle.await
    }
}

/// Spawns delayed jobs according to a [`DelayPolicy`].
#[derive(Clone)]
pub struct Scheduler {
    policy: Arc<dyn DelayPolicy>,
}

impl Scheduler {
    pub fn new(policy: impl DelayPolicy + 'static) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// Schedules `job` to run once after the policy's next delay.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F, Fut, T>(&self, job: F) -> ScheduledTask<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let delay = self.policy.next_delay();
        let token = CancellationToken::new();
        let watcher = token.clone();
        debug!(delay_ms = delay.as_millis() as u64, "Scheduling job");

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = watcher.cancelled() => {
                    info!("Scheduled job cancelled");
                    None
                }
                _ = tokio::time::sleep(delay) => Some(job().await),
            }
        });

        ScheduledTask {
            delay,
            token,
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_uniform_delay_stays_in_window() {
        let policy = UniformDelay::new(Duration::from_millis(2000), Duration::from_millis(5000));
        for _ in 0..1_000 {
            let delay = policy.next_delay();
            assert!(delay >= Duration::from_millis(2000));
            assert!(delay < Duration::from_millis(5000));
        }
    }

    #[test]
    fn test_uniform_delay_with_empty_window_uses_min() {
        let policy = UniformDelay::new(Duration::from_millis(300), Duration::from_millis(300));
        assert_eq!(policy.next_delay(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_after_delay() {
        let scheduler = Scheduler::new(FixedDelay(Duration::from_secs(3)));
        let started = tokio::time::Instant::now();

        let task = scheduler.schedule(|| async { 7 });
        assert_eq!(task.delay(), Duration::from_secs(3));

        let output = task.join().await.unwrap();
        assert_eq!(output, Some(7));
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_job_never_runs() {
        let scheduler = Scheduler::new(FixedDelay(Duration::from_secs(3)));
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let task = scheduler.schedule(move || async move {
            flag.store(true, Ordering::SeqCst);
        });
        task.cancellation_token().cancel();
        assert!(task.cancellation_token().is_cancelled());

        assert_eq!(task.join().await.unwrap(), None);
        assert!(!ran.load(Ordering::SeqCst));
    }
}
