//! Decorative cyclic progress counter.
//!
//! The counter only exists to keep something moving on screen. It knows
//! nothing about uploads and must not be read as real progress.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Exclusive upper bound of the counter.
pub const INDICATOR_BOUND: u8 = 100;
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressIndicator {
    tick: u8,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u8 {
        self.tick
    }

    /// Advance by one, wrapping to 0 at [`INDICATOR_BOUND`].
    pub fn tick(&mut self) -> u8 {
        self.tick = (self.tick + 1) % INDICATOR_BOUND;
        self.tick
    }
}

/// Background task driving a [`ProgressIndicator`] on a fixed period.
///
/// Started once when a view mounts; stopped by [`stop`](Self::stop) or on drop.
pub struct IndicatorTask {
    receiver: watch::Receiver<u8>,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl IndicatorTask {
    /// Spawn the ticking task. Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        // tokio's interval panics on a zero period
        let period = period.max(Duration::from_millis(1));
        let (sender, receiver) = watch::channel(0);
        let token = CancellationToken::new();
        let task_token = token.child_token();

        let handle = tokio::spawn(async move {
            let mut indicator = ProgressIndicator::new();
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if sender.send(indicator.tick()).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::trace!("Indicator task stopped");
        });

        tracing::debug!(?period, "Indicator task started");

        Self {
            receiver,
            token,
            handle: Some(handle),
        }
    }

    pub fn value(&self) -> u8 {
        *self.receiver.borrow()
    }

    /// Follow the counter. The receiver closes once the task stops.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.receiver.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                tracing::error!("Indicator task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for IndicatorTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
