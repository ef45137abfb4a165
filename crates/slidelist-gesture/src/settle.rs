//! Cancelable settle animation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// What happens once a settle animation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettleKind {
    /// Report the drop to the host.
    Commit,
    /// Drag was cancelled; nothing to report.
    Discard,
}

/// A running settle animation.
#[derive(Debug)]
pub(crate) struct Settle {
    pub generation: u64,
    pub kind: SettleKind,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Animation timing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SettleTiming {
    pub duration: Duration,
    pub frame_interval: Duration,
}

impl Settle {
    /// Start animating `offset` from `from` to `to`.
    ///
    /// `generation` is sent on `done` if the animation runs to completion.
    pub fn spawn(
        offset: Arc<watch::Sender<f32>>,
        from: f32,
        to: f32,
        timing: SettleTiming,
        generation: u64,
        kind: SettleKind,
        done: mpsc::UnboundedSender<u64>,
    ) -> Self {
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            if animate(&offset, from, to, timing, &child).await {
                let _ = done.send(generation);
            }
        });

        Self {
            generation,
            kind,
            token,
            handle,
        }
    }

    /// Stop the animation and wait for its task to exit.
    ///
    /// Once this returns the offset is no longer written by the animation.
    pub async fn interrupt(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await
            && e.is_panic()
        {
            tracing::error!("Settle animation panicked: {}", e);
        }
    }
}

/// Linearly interpolate the offset. Returns `false` if cancelled first.
async fn animate(
    offset: &watch::Sender<f32>,
    from: f32,
    to: f32,
    timing: SettleTiming,
    token: &CancellationToken,
) -> bool {
    if timing.duration.is_zero() || from == to {
        offset.send_replace(to);
        return true;
    }

    let start = Instant::now();
    let total = timing.duration.as_secs_f32();
    let mut ticker = tokio::time::interval(timing.frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return false,
            _ = ticker.tick() => {
                let progress = (start.elapsed().as_secs_f32() / total).min(1.0);
                offset.send_replace(from + (to - from) * progress);
                if progress >= 1.0 {
                    return true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(ms: u64) -> SettleTiming {
        SettleTiming {
            duration: Duration::from_millis(ms),
            frame_interval: Duration::from_millis(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_reaches_target() {
        let offset = Arc::new(watch::Sender::new(40.0f32));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();

        let _settle = Settle::spawn(
            Arc::clone(&offset),
            40.0,
            100.0,
            timing(100),
            1,
            SettleKind::Commit,
            done_tx,
        );

        assert_eq!(done_rx.recv().await, Some(1));
        assert_eq!(*offset.borrow(), 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_snaps() {
        let offset = Arc::new(watch::Sender::new(12.0f32));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();

        let _settle = Settle::spawn(
            Arc::clone(&offset),
            12.0,
            0.0,
            timing(0),
            3,
            SettleKind::Discard,
            done_tx,
        );

        assert_eq!(done_rx.recv().await, Some(3));
        assert_eq!(*offset.borrow(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_stops_writes() {
        let offset = Arc::new(watch::Sender::new(0.0f32));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();

        let settle = Settle::spawn(
            Arc::clone(&offset),
            0.0,
            100.0,
            timing(1000),
            1,
            SettleKind::Commit,
            done_tx,
        );

        tokio::time::sleep(Duration::from_millis(250)).await;
        settle.interrupt().await;
        let frozen = *offset.borrow();
        assert!(frozen > 0.0 && frozen < 100.0, "frozen at {frozen}");

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(*offset.borrow(), frozen);
        assert!(done_rx.recv().await.is_none());
    }
}
