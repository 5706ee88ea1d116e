//! Fixed-rate animation timer

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Delivers ticks at a fixed interval while running
///
/// Ticks are produced by a background tokio task and consumed with
/// [`FrameTimer::tick`] on the dispatch thread, so a tick handler never runs
/// concurrently with any other handler. Late ticks are skipped rather than
/// bunched up.
#[derive(Debug)]
pub struct FrameTimer {
    period: Duration,
    task: Option<JoinHandle<()>>,
    ticks: Option<mpsc::Receiver<Instant>>,
}

impl FrameTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: None,
            ticks: None,
        }
    }

    /// Begin ticking. Does nothing if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let (tx, rx) = mpsc::channel(1);
        let period = self.period;

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            // Skip the first tick (fires immediately)
            interval.tick().await;

            loop {
                let at = interval.tick().await;
                if tx.send(at).await.is_err() {
                    break;
                }
            }
        }));
        self.ticks = Some(rx);

        debug!("Frame timer started ({:?} period)", period);
    }

    /// Stop ticking. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Frame timer stopped");
        }
        // pending ticks go with the receiver
        self.ticks = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the next tick; `None` when the timer is stopped
    pub async fn tick(&mut self) -> Option<Instant> {
        match self.ticks.as_mut() {
            Some(ticks) => ticks.recv().await,
            None => None,
        }
    }
}

impl Drop for FrameTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
