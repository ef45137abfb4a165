use strum::Display;

/// Lifecycle phase of a gesture controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DragPhase {
    /// No session.
    #[default]
    Idle,
    /// Following the pointer.
    Dragging,
    /// Released; the offset is animating to its resting place.
    Settling,
}

impl DragPhase {
    /// Whether a session exists in this phase.
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}
