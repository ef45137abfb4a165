//! Terminal host for slidelist drag-to-reorder.
//!
//! Renders a vertical list of fixed-height cards. Holding the mouse button on
//! a card picks it up; dragging slides the neighbor it passes out of the way;
//! releasing drops it and commits the reorder.
//!
//! # Usage
//!
//! ```rust,no_run
//! use slidelist_tui::TuiConfig;
//!
//! slidelist_tui::run(TuiConfig::default()).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Scroll
//! - `Esc` - Cancel the drag
//! - `m` - Toggle swap/move commit
//! - `r` - Reset order
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use slidelist_core::CommitMode;

pub use app::{App, AppResult};
pub use theme::Theme;

/// Command line overrides for the TUI. `None` falls back to user settings.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Number of items in the list.
    pub item_count: Option<usize>,
    /// How drops are committed.
    pub commit_mode: Option<CommitMode>,
}

/// Run the TUI application.
pub fn run(config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture, EnableFocusChange)?;

    let result = rt.block_on(async { App::new(config).run(terminal).await });

    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture, DisableFocusChange) {
        tracing::warn!("Failed to disable mouse capture: {}", e);
    }
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
