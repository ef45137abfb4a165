//! Per-item gesture controller.
//!
//! Each controller owns one task. Commands from the handle are processed in
//! order by that task, so offset updates and slide-state changes for a
//! session can never interleave or get lost. The settle animation runs as a
//! separate cancelable task that writes only the visual offset; its
//! completion is fed back into the controller task, which is the only place
//! the host is called from.

use std::sync::Arc;

use slidelist_core::{DragSession, ReorderConfig, ReorderError, SlideMetrics};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::COMMAND_CHANNEL_SIZE;
use crate::host::ReorderHost;
use crate::phase::DragPhase;
use crate::settle::{Settle, SettleKind, SettleTiming};

#[derive(Debug)]
enum Command<T> {
    Start { items: Arc<[T]> },
    Drag { delta: f32 },
    End,
    Cancel,
}

/// Handle to the gesture controller of one list item.
///
/// Dropping every handle stops the controller task.
#[derive(Debug)]
pub struct GestureController<T> {
    commands: mpsc::Sender<Command<T>>,
    offset: watch::Receiver<f32>,
    phase: watch::Receiver<DragPhase>,
    task: JoinHandle<()>,
}

impl<T> GestureController<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Attach a controller to `item`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<H: ReorderHost<T>>(item: T, host: Arc<H>, config: &ReorderConfig) -> Self {
        let (commands, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let offset_tx = Arc::new(watch::Sender::new(0.0f32));
        let phase_tx = watch::Sender::new(DragPhase::Idle);
        let offset = offset_tx.subscribe();
        let phase = phase_tx.subscribe();

        let actor = Actor {
            item,
            host,
            metrics: SlideMetrics::from(config),
            timing: SettleTiming {
                duration: config.settle_duration(),
                frame_interval: config.frame_interval(),
            },
            offset: offset_tx,
            phase: phase_tx,
            active: None,
            settle: None,
            generation: 0,
        };
        let task = tokio::spawn(actor.run(command_rx));

        Self {
            commands,
            offset,
            phase,
            task,
        }
    }

    /// Begin a drag session against the current list.
    ///
    /// Interrupts a running settle animation on this item. If the item is not
    /// in `items` the session is a no-op.
    pub async fn start(&self, items: impl Into<Arc<[T]>>) -> Result<(), ReorderError> {
        self.send(Command::Start {
            items: items.into(),
        })
        .await
    }

    /// Feed one vertical pointer delta.
    ///
    /// Returns whether the event should be consumed, i.e. not passed on to
    /// an outer scroll container.
    pub async fn drag(&self, delta: f32) -> Result<bool, ReorderError> {
        self.send(Command::Drag { delta }).await?;
        Ok(delta != 0.0)
    }

    /// Release the pointer: settle, then report the drop to the host.
    pub async fn end(&self) -> Result<(), ReorderError> {
        self.send(Command::End).await
    }

    /// Abandon the drag: give back displacements and settle home without
    /// reporting a drop.
    pub async fn cancel(&self) -> Result<(), ReorderError> {
        self.send(Command::Cancel).await
    }

    /// Current visual offset of the item, in pixels.
    pub fn offset(&self) -> f32 {
        *self.offset.borrow()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DragPhase {
        *self.phase.borrow()
    }

    /// Watch the visual offset.
    pub fn subscribe_offset(&self) -> watch::Receiver<f32> {
        self.offset.clone()
    }

    /// Watch the lifecycle phase.
    pub fn subscribe_phase(&self) -> watch::Receiver<DragPhase> {
        self.phase.clone()
    }

    /// Stop the controller and wait for its task.
    ///
    /// A session in progress is dropped without reporting.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await
            && e.is_panic()
        {
            tracing::error!("Gesture controller panicked: {}", e);
        }
    }

    async fn send(&self, command: Command<T>) -> Result<(), ReorderError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ReorderError::ControllerClosed)
    }
}

/// A session and the list snapshot it indexes into.
struct Active<T> {
    session: DragSession,
    items: Arc<[T]>,
}

struct Actor<T, H> {
    item: T,
    host: Arc<H>,
    metrics: SlideMetrics,
    timing: SettleTiming,
    offset: Arc<watch::Sender<f32>>,
    phase: watch::Sender<DragPhase>,
    active: Option<Active<T>>,
    settle: Option<Settle>,
    generation: u64,
}

impl<T, H> Actor<T, H>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    H: ReorderHost<T>,
{
    async fn run(mut self, mut commands: mpsc::Receiver<Command<T>>) {
        let (settled_tx, mut settled_rx) = mpsc::unbounded_channel();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Start { items }) => self.start(items).await,
                    Some(Command::Drag { delta }) => self.drag(delta),
                    Some(Command::End) => self.release(SettleKind::Commit, &settled_tx),
                    Some(Command::Cancel) => self.release(SettleKind::Discard, &settled_tx),
                    None => break,
                },
                Some(generation) = settled_rx.recv() => self.settled(generation),
            }
        }

        if let Some(settle) = self.settle.take() {
            settle.interrupt().await;
        }
        if let Some(mut active) = self.active.take() {
            let host = &self.host;
            active
                .session
                .revert(&active.items, |item, state| host.update_slide_state(item, state));
        }
        tracing::trace!("Gesture controller stopped");
    }

    async fn start(&mut self, items: Arc<[T]>) {
        let interrupted = self.settle.take();
        let resuming = interrupted.is_some();
        if let Some(settle) = interrupted {
            tracing::debug!(generation = settle.generation, "Interrupting settle");
            settle.interrupt().await;
        }

        let host = &self.host;
        let in_flight = *self.offset.borrow();

        let fresh = match DragSession::begin(&self.item, &items) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("{}", e);
                if let Some(mut active) = self.active.take() {
                    active
                        .session
                        .revert(&active.items, |item, state| host.update_slide_state(item, state));
                }
                self.offset.send_replace(0.0);
                self.phase.send_replace(DragPhase::Idle);
                return;
            }
        };
        let origin_index = fresh.origin_index();

        match self.active.take() {
            // Same item caught mid-settle: pick the session up where the
            // animation left it.
            Some(mut active) if resuming && active.session.origin_index() == origin_index => {
                active.items = items;
                active.session.resume_at(
                    in_flight,
                    &active.items,
                    self.metrics,
                    |item, state| host.update_slide_state(item, state),
                );
                tracing::debug!(origin_index, offset = in_flight, "Resumed drag session");
                self.active = Some(active);
            }
            previous => {
                if let Some(mut stale) = previous {
                    stale
                        .session
                        .revert(&stale.items, |item, state| host.update_slide_state(item, state));
                }
                self.offset.send_replace(0.0);
                self.active = Some(Active {
                    session: fresh,
                    items,
                });
                tracing::debug!(origin_index, "Started drag session");
            }
        }

        self.phase.send_replace(DragPhase::Dragging);
        self.host.on_start_drag(origin_index);
    }

    fn drag(&mut self, delta: f32) {
        if self.settle.is_some() {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let host = &self.host;
        active
            .session
            .drag_by(delta, &active.items, self.metrics, |item, state| {
                host.update_slide_state(item, state)
            });
        self.offset.send_replace(active.session.offset());
    }

    fn release(&mut self, kind: SettleKind, settled_tx: &mpsc::UnboundedSender<u64>) {
        if self.settle.is_some() {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let from = active.session.offset();
        let to = match kind {
            SettleKind::Commit => active.session.settle_offset(self.metrics.item_height),
            SettleKind::Discard => {
                let host = &self.host;
                active
                    .session
                    .revert(&active.items, |item, state| host.update_slide_state(item, state));
                0.0
            }
        };

        self.generation += 1;
        tracing::debug!(
            from,
            to,
            ?kind,
            generation = self.generation,
            "Settling drag"
        );
        self.settle = Some(Settle::spawn(
            Arc::clone(&self.offset),
            from,
            to,
            self.timing,
            self.generation,
            kind,
            settled_tx.clone(),
        ));
        self.phase.send_replace(DragPhase::Settling);
    }

    fn settled(&mut self, generation: u64) {
        let Some(settle) = self.settle.take_if(|settle| settle.generation == generation) else {
            tracing::trace!(generation, "Ignoring stale settle");
            return;
        };

        if let Some(active) = self.active.take()
            && settle.kind == SettleKind::Commit
        {
            let origin = active.session.origin_index();
            let destination = active.session.destination();
            tracing::debug!(origin, destination, "Drag finished");
            self.host.on_stop_drag(origin, destination);
        }

        self.offset.send_replace(0.0);
        self.phase.send_replace(DragPhase::Idle);
    }
}
