//! Long-press drag recognition.
//!
//! A drag starts only after the pointer has been held for the long-press
//! threshold without moving more than the touch slop. Call
//! [`LongPressDetector::poll`] periodically (for example on every tick) so a
//! stationary press can still start a drag.

use std::time::{Duration, Instant};

use slidelist_core::ReorderConfig;

/// Drag lifecycle events produced by the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressEvent {
    /// The long press fired; a drag session should begin.
    DragStart,
    /// The pointer moved vertically while dragging.
    DragMove { delta_y: f32 },
    /// The pointer was released while dragging.
    DragEnd,
    /// The drag was abandoned (escape key, focus loss).
    DragCancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    Pressed { at: Instant, origin_y: f32, last_y: f32 },
    Dragging { last_y: f32 },
}

/// Turns press, move and release input into [`PressEvent`]s.
#[derive(Debug, Clone)]
pub struct LongPressDetector {
    threshold: Duration,
    touch_slop: f32,
    state: PressState,
}

impl LongPressDetector {
    pub fn new(threshold: Duration, touch_slop: f32) -> Self {
        Self {
            threshold,
            touch_slop,
            state: PressState::Idle,
        }
    }

    pub fn from_config(config: &ReorderConfig) -> Self {
        Self::new(config.long_press_threshold(), config.touch_slop)
    }

    /// Pointer went down at `y`.
    pub fn press(&mut self, y: f32, now: Instant) -> Option<PressEvent> {
        if self.threshold.is_zero() {
            self.state = PressState::Dragging { last_y: y };
            return Some(PressEvent::DragStart);
        }
        self.state = PressState::Pressed {
            at: now,
            origin_y: y,
            last_y: y,
        };
        None
    }

    /// Pointer moved to `y`.
    pub fn move_to(&mut self, y: f32, now: Instant) -> Vec<PressEvent> {
        let mut events = Vec::new();
        match self.state {
            PressState::Idle => {}
            PressState::Pressed { at, origin_y, .. } => {
                if (y - origin_y).abs() > self.touch_slop {
                    tracing::trace!(y, origin_y, "Press moved past touch slop");
                    self.state = PressState::Idle;
                } else if now.duration_since(at) >= self.threshold {
                    self.state = PressState::Dragging { last_y: y };
                    events.push(PressEvent::DragStart);
                } else {
                    self.state = PressState::Pressed {
                        at,
                        origin_y,
                        last_y: y,
                    };
                }
            }
            PressState::Dragging { last_y } => {
                let delta_y = y - last_y;
                self.state = PressState::Dragging { last_y: y };
                if delta_y != 0.0 {
                    events.push(PressEvent::DragMove { delta_y });
                }
            }
        }
        events
    }

    /// Fire the long press if the pointer has been held long enough.
    pub fn poll(&mut self, now: Instant) -> Option<PressEvent> {
        if let PressState::Pressed { at, last_y, .. } = self.state
            && now.duration_since(at) >= self.threshold
        {
            self.state = PressState::Dragging { last_y };
            return Some(PressEvent::DragStart);
        }
        None
    }

    /// Pointer released.
    pub fn release(&mut self) -> Option<PressEvent> {
        let was_dragging = self.is_dragging();
        self.state = PressState::Idle;
        was_dragging.then_some(PressEvent::DragEnd)
    }

    /// Abandon the press or drag.
    pub fn cancel(&mut self) -> Option<PressEvent> {
        let was_dragging = self.is_dragging();
        self.state = PressState::Idle;
        was_dragging.then_some(PressEvent::DragCancel)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PressState::Dragging { .. })
    }
}
