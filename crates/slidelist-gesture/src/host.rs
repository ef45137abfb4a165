//! The contract between a gesture controller and the list that hosts it.

use slidelist_core::SlideState;

/// Callbacks a list host provides to its gesture controllers.
///
/// All calls for one controller come from that controller's task, in order.
pub trait ReorderHost<T>: Send + Sync + 'static {
    /// Set the visual slide state of a neighbor item.
    fn update_slide_state(&self, item: &T, state: SlideState);

    /// A drag session started on the item at `origin_index`.
    fn on_start_drag(&self, origin_index: usize) {
        let _ = origin_index;
    }

    /// A drag session finished settling. The host moves the item and resets
    /// every slide state to [`SlideState::None`].
    fn on_stop_drag(&self, origin_index: usize, destination_index: usize);
}
