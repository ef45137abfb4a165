//! Per-item slide state.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Visual displacement of a neighbor item while another item is dragged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SlideState {
    /// At rest.
    #[default]
    None,
    /// Shifted up by one item height (the dragged item moved down past it).
    Up,
    /// Shifted down by one item height (the dragged item moved up past it).
    Down,
}

impl SlideState {
    /// State for a neighbor passed by a drag heading in `direction`.
    ///
    /// A positive direction means the dragged item moves down, so the
    /// neighbor makes room by sliding up.
    pub fn for_direction(direction: i8) -> Self {
        match direction.signum() {
            1 => Self::Up,
            -1 => Self::Down,
            _ => Self::None,
        }
    }

    /// Render offset in pixels for an item of the given height.
    pub fn translation(self, item_height: u32) -> i32 {
        let height = i32::try_from(item_height).unwrap_or(i32::MAX);
        match self {
            Self::None => 0,
            Self::Up => -height,
            Self::Down => height,
        }
    }

    /// Whether the item is currently displaced.
    pub fn is_displaced(self) -> bool {
        self != Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_for_direction() {
        assert_eq!(SlideState::for_direction(1), SlideState::Up);
        assert_eq!(SlideState::for_direction(-1), SlideState::Down);
        assert_eq!(SlideState::for_direction(0), SlideState::None);
    }

    #[test]
    fn test_translation() {
        assert_eq!(SlideState::None.translation(50), 0);
        assert_eq!(SlideState::Up.translation(50), -50);
        assert_eq!(SlideState::Down.translation(50), 50);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = SlideState::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["none", "up", "down"]);
    }
}
