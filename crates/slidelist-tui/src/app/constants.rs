//! Application constants.

/// Items shown when no count is given.
pub const DEFAULT_ITEM_COUNT: usize = 21;

/// Terminal rows per list item.
pub const DEFAULT_ROWS_PER_ITEM: u16 = 2;

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 16;

/// How long a status message stays in the header, in ticks.
pub const STATUS_TICKS: u32 = 150;
