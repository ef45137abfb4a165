//! Core types for slidelist.
//!
//! This crate holds the pure parts of drag-to-reorder: the displacement
//! calculator, the per-drag session state machine, slide states, the
//! reorder configuration, and the commit step that applies a finished
//! drag to a list. Nothing here touches async runtimes or terminals.

mod commit;
mod config;
mod displacement;
mod error;
mod session;
mod slide;

pub use commit::{CommitMode, apply_reorder};
pub use config::{DEFAULT_ITEM_HEIGHT, ReorderConfig, ReorderConfigBuilder};
pub use displacement::{default_slide_threshold, displaced_count};
pub use error::ReorderError;
pub use session::{DragSession, SlideMetrics};
pub use slide::SlideState;
