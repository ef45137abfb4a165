//! Gesture side of slidelist.
//!
//! This crate drives drag sessions asynchronously: a [`GestureController`]
//! per list item serializes pointer updates through a single task, animates
//! the settle after release, and reports back to a [`ReorderHost`]. The
//! [`SlideStore`] is a watchable item to slide-state map that hosts can use
//! to re-render only when something changed, and [`LongPressDetector`] turns
//! raw press/move/release input into drag lifecycle events.

mod controller;
mod host;
mod phase;
mod press;
mod settle;
mod store;

pub use controller::GestureController;
pub use host::ReorderHost;
pub use phase::DragPhase;
pub use press::{LongPressDetector, PressEvent};
pub use store::SlideStore;

/// Default buffer size for controller command channels.
pub const COMMAND_CHANNEL_SIZE: usize = 64;
