//! Applying a finished drag to the host's list.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ReorderError;

/// How a reported `(from, to)` pair mutates the list.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommitMode {
    /// Exchange the dragged item with the item at the destination.
    #[default]
    Swap,
    /// Remove the dragged item and reinsert it at the destination,
    /// shifting everything in between by one.
    Move,
}

impl CommitMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Swap => Self::Move,
            Self::Move => Self::Swap,
        }
    }
}

/// Apply a reorder to `items`.
///
/// `from == to` leaves the list untouched.
pub fn apply_reorder<T>(
    items: &mut Vec<T>,
    from: usize,
    to: usize,
    mode: CommitMode,
) -> Result<(), ReorderError> {
    let len = items.len();
    ReorderError::check_index(from, len)?;
    ReorderError::check_index(to, len)?;

    if from == to {
        return Ok(());
    }

    match mode {
        CommitMode::Swap => items.swap(from, to),
        CommitMode::Move => {
            let item = items.remove(from);
            items.insert(to, item);
        }
    }

    tracing::debug!(from, to, %mode, "Applied reorder");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Vec<&'static str> {
        vec!["A", "B", "C", "D"]
    }

    #[test]
    fn test_swap_moves_item_down() {
        let mut items = abcd();
        apply_reorder(&mut items, 0, 2, CommitMode::Swap).unwrap();
        assert_eq!(items, vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_move_moves_item_down() {
        let mut items = abcd();
        apply_reorder(&mut items, 0, 2, CommitMode::Move).unwrap();
        assert_eq!(items, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_move_moves_item_up() {
        let mut items = abcd();
        apply_reorder(&mut items, 3, 1, CommitMode::Move).unwrap();
        assert_eq!(items, vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_noop_when_dropped_on_self() {
        for mode in [CommitMode::Swap, CommitMode::Move] {
            let mut items = abcd();
            apply_reorder(&mut items, 1, 1, mode).unwrap();
            assert_eq!(items, abcd());
        }
    }

    #[test]
    fn test_out_of_range_leaves_list_untouched() {
        let mut items = abcd();
        let err = apply_reorder(&mut items, 0, 4, CommitMode::Move).unwrap_err();
        assert_eq!(err, ReorderError::IndexOutOfRange { index: 4, len: 4 });
        assert_eq!(items, abcd());
    }

    #[test]
    fn test_mode_parse_and_toggle() {
        assert_eq!("move".parse::<CommitMode>().unwrap(), CommitMode::Move);
        assert_eq!(CommitMode::Swap.toggled(), CommitMode::Move);
        assert_eq!(CommitMode::Move.to_string(), "move");
    }
}
