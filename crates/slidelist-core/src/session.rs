//! Drag session state machine.
//!
//! A [`DragSession`] turns a stream of vertical pointer deltas into
//! slide-state transitions for the neighbors of the dragged item, and
//! resolves where the item lands when released.
//!
//! # Invariants
//!
//! 1. The displaced count only changes through [`displaced_count`], followed
//!    by a clamp to the neighbors that actually exist in the drag direction.
//! 2. At most one neighbor (the boundary neighbor) holds a non-`None` slide
//!    state. The previous boundary neighbor is reverted when a new one is
//!    assigned.
//! 3. [`DragSession::destination`] is always a valid index of the list the
//!    session was started on.

use crate::config::ReorderConfig;
use crate::displacement::{default_slide_threshold, displaced_count};
use crate::error::ReorderError;
use crate::slide::SlideState;

/// Item height and slide threshold, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideMetrics {
    pub item_height: u32,
    pub slide_threshold: u32,
}

impl SlideMetrics {
    /// Metrics with the default threshold of half an item.
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            slide_threshold: default_slide_threshold(item_height),
        }
    }

    /// Override the slide threshold.
    pub fn with_threshold(mut self, slide_threshold: u32) -> Self {
        self.slide_threshold = slide_threshold;
        self
    }
}

impl From<&ReorderConfig> for SlideMetrics {
    fn from(config: &ReorderConfig) -> Self {
        Self::new(config.item_height).with_threshold(config.slide_threshold())
    }
}

/// State of one drag, from long press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    origin_index: usize,
    offset: f32,
    displaced_count: usize,
    direction: i8,
    boundary: Option<usize>,
}

impl DragSession {
    /// Start a session for `item`, which must be present in `items`.
    pub fn begin<T: PartialEq>(item: &T, items: &[T]) -> Result<Self, ReorderError> {
        let origin_index = items
            .iter()
            .position(|candidate| candidate == item)
            .ok_or(ReorderError::ItemNotFound)?;
        Ok(Self {
            origin_index,
            offset: 0.0,
            displaced_count: 0,
            direction: 0,
            boundary: None,
        })
    }

    /// Index of the dragged item when the session started.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Current visual offset of the dragged item, in pixels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Number of neighbors displaced in the current direction.
    pub fn displaced_count(&self) -> usize {
        self.displaced_count
    }

    /// Sign of the offset: -1 (up), 0, or 1 (down).
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Index of the neighbor currently holding a non-`None` slide state.
    pub fn boundary_neighbor(&self) -> Option<usize> {
        self.boundary
    }

    /// Pending change of index: `displaced_count * direction`.
    pub fn list_offset(&self) -> isize {
        self.displaced_count as isize * isize::from(self.direction)
    }

    /// Index the item lands on if released now.
    pub fn destination(&self) -> usize {
        self.origin_index.saturating_add_signed(self.list_offset())
    }

    /// Offset the item snaps to when released: the destination slot's edge.
    pub fn settle_offset(&self, item_height: u32) -> f32 {
        item_height as f32 * self.displaced_count as f32 * f32::from(self.direction)
    }

    /// Apply one pointer move.
    ///
    /// Returns whether the move should be consumed (any non-zero delta).
    pub fn drag_by<T, F>(
        &mut self,
        delta: f32,
        items: &[T],
        metrics: SlideMetrics,
        mut update_slide: F,
    ) -> bool
    where
        F: FnMut(&T, SlideState),
    {
        self.offset += delta;
        self.recompute(items, metrics, &mut update_slide);

        tracing::trace!(
            delta,
            offset = self.offset,
            displaced = self.displaced_count,
            direction = self.direction,
            "Drag update"
        );

        delta != 0.0
    }

    /// Continue an interrupted session from an in-flight offset.
    pub fn resume_at<T, F>(
        &mut self,
        offset: f32,
        items: &[T],
        metrics: SlideMetrics,
        mut update_slide: F,
    ) where
        F: FnMut(&T, SlideState),
    {
        self.offset = offset;
        self.recompute(items, metrics, &mut update_slide);
    }

    /// Give back every displacement this session made.
    ///
    /// The offset is left alone so the caller can animate it home.
    pub fn revert<T, F>(&mut self, items: &[T], mut update_slide: F)
    where
        F: FnMut(&T, SlideState),
    {
        self.release_boundary(items, &mut update_slide);
        self.displaced_count = 0;
        self.direction = 0;
    }

    fn recompute<T, F>(&mut self, items: &[T], metrics: SlideMetrics, update_slide: &mut F)
    where
        F: FnMut(&T, SlideState),
    {
        let direction = offset_sign(self.offset);
        let previous = self.displaced_count;
        let len = items.len();

        let mut count = if direction == 0 {
            0
        } else {
            displaced_count(
                self.offset.abs(),
                metrics.item_height,
                metrics.slide_threshold,
                previous,
            )
        };

        // Past the list edge: keep the previous count.
        if count >= previous && count != 0 && self.neighbor_index(count, direction, len).is_none()
        {
            count = previous;
        }
        // A direction flip at an edge can leave the rolled-back count pointing
        // outside the list.
        count = count.min(self.available_neighbors(direction, len));

        if count < previous || count == 0 {
            self.release_boundary(items, update_slide);
        } else if let Some(index) = self.neighbor_index(count, direction, len) {
            self.assign_boundary(index, SlideState::for_direction(direction), items, update_slide);
        }

        self.displaced_count = count;
        self.direction = direction;
    }

    fn assign_boundary<T, F>(
        &mut self,
        index: usize,
        state: SlideState,
        items: &[T],
        update_slide: &mut F,
    ) where
        F: FnMut(&T, SlideState),
    {
        if self.boundary == Some(index) {
            return;
        }
        self.release_boundary(items, update_slide);
        if let Some(item) = items.get(index) {
            update_slide(item, state);
            self.boundary = Some(index);
        }
    }

    fn release_boundary<T, F>(&mut self, items: &[T], update_slide: &mut F)
    where
        F: FnMut(&T, SlideState),
    {
        if let Some(index) = self.boundary.take()
            && let Some(item) = items.get(index)
        {
            update_slide(item, SlideState::None);
        }
    }

    fn neighbor_index(&self, count: usize, direction: i8, len: usize) -> Option<usize> {
        if count == 0 || direction == 0 {
            return None;
        }
        let index = if direction > 0 {
            self.origin_index.checked_add(count)?
        } else {
            self.origin_index.checked_sub(count)?
        };
        (index < len).then_some(index)
    }

    fn available_neighbors(&self, direction: i8, len: usize) -> usize {
        match direction {
            1 => len.saturating_sub(self.origin_index + 1),
            -1 => self.origin_index.min(len.saturating_sub(1)),
            _ => 0,
        }
    }
}

fn offset_sign(offset: f32) -> i8 {
    if offset > 0.0 {
        1
    } else if offset < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: SlideMetrics = SlideMetrics {
        item_height: 100,
        slide_threshold: 50,
    };

    fn drag<'a>(
        session: &mut DragSession,
        items: &'a [&'static str],
        deltas: &[f32],
        log: &mut Vec<(&'a str, SlideState)>,
    ) {
        for &delta in deltas {
            session.drag_by(delta, items, METRICS, |item, state| log.push((*item, state)));
        }
    }

    #[test]
    fn test_begin_finds_origin() {
        let items = ["A", "B", "C"];
        let session = DragSession::begin(&"B", &items).unwrap();
        assert_eq!(session.origin_index(), 1);
        assert_eq!(session.destination(), 1);
    }

    #[test]
    fn test_begin_missing_item() {
        let items = ["A", "B"];
        assert_eq!(
            DragSession::begin(&"Z", &items),
            Err(ReorderError::ItemNotFound)
        );
    }

    #[test]
    fn test_drag_down_assigns_up() {
        let items = ["A", "B", "C", "D"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[40.0], &mut log);
        assert!(log.is_empty());

        drag(&mut session, &items, &[20.0], &mut log);
        assert_eq!(log, vec![("B", SlideState::Up)]);
        assert_eq!(session.displaced_count(), 1);
        assert_eq!(session.destination(), 1);
    }

    #[test]
    fn test_drag_up_assigns_down() {
        let items = ["A", "B", "C", "D"];
        let mut session = DragSession::begin(&"D", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[-60.0], &mut log);
        assert_eq!(log, vec![("C", SlideState::Down)]);
        assert_eq!(session.direction(), -1);
        assert_eq!(session.destination(), 2);
    }

    #[test]
    fn test_new_boundary_reverts_previous() {
        let items = ["A", "B", "C", "D"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[60.0, 100.0], &mut log);
        assert_eq!(
            log,
            vec![
                ("B", SlideState::Up),
                ("B", SlideState::None),
                ("C", SlideState::Up),
            ]
        );
        assert_eq!(session.boundary_neighbor(), Some(2));
    }

    #[test]
    fn test_receding_releases_boundary() {
        let items = ["A", "B", "C", "D"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[60.0, -50.0], &mut log);
        assert_eq!(log, vec![("B", SlideState::Up), ("B", SlideState::None)]);
        assert_eq!(session.displaced_count(), 0);
        assert_eq!(session.boundary_neighbor(), None);
        assert_eq!(session.destination(), 0);
    }

    #[test]
    fn test_repeated_moves_do_not_repeat_transitions() {
        let items = ["A", "B", "C"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[60.0, 5.0, 5.0, 5.0], &mut log);
        assert_eq!(log, vec![("B", SlideState::Up)]);
    }

    #[test]
    fn test_first_item_cannot_move_above_top() {
        let items = ["A", "B", "C"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[-80.0, -300.0], &mut log);
        assert!(log.is_empty());
        assert_eq!(session.displaced_count(), 0);
        assert_eq!(session.destination(), 0);
        assert_eq!(session.settle_offset(100), 0.0);
    }

    #[test]
    fn test_last_item_cannot_move_below_bottom() {
        let items = ["A", "B", "C"];
        let mut session = DragSession::begin(&"B", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[60.0, 200.0, 200.0], &mut log);
        assert_eq!(log, vec![("C", SlideState::Up)]);
        assert_eq!(session.displaced_count(), 1);
        assert_eq!(session.destination(), 2);
        assert_eq!(session.settle_offset(100), 100.0);
    }

    #[test]
    fn test_direction_flip_at_edge_stays_in_range() {
        let items = ["A", "B", "C"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[60.0, -220.0], &mut log);
        assert_eq!(log, vec![("B", SlideState::Up), ("B", SlideState::None)]);
        assert_eq!(session.displaced_count(), 0);
        assert_eq!(session.destination(), 0);
    }

    #[test]
    fn test_direction_flip_moves_boundary_across_origin() {
        let items = ["A", "B", "C", "D", "E"];
        let mut session = DragSession::begin(&"C", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[60.0, -120.0], &mut log);
        assert_eq!(
            log,
            vec![
                ("D", SlideState::Up),
                ("D", SlideState::None),
                ("B", SlideState::Down),
            ]
        );
        assert_eq!(session.destination(), 1);
    }

    #[test]
    fn test_consumed_only_for_nonzero_delta() {
        let items = ["A", "B"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        assert!(!session.drag_by(0.0, &items, METRICS, |_, _| {}));
        assert!(session.drag_by(1.5, &items, METRICS, |_, _| {}));
    }

    #[test]
    fn test_revert_releases_boundary() {
        let items = ["A", "B", "C"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[70.0], &mut log);
        session.revert(&items, |item, state| log.push((*item, state)));

        assert_eq!(log, vec![("B", SlideState::Up), ("B", SlideState::None)]);
        assert_eq!(session.destination(), 0);
        assert_eq!(session.offset(), 70.0);
    }

    #[test]
    fn test_resume_keeps_count_for_in_flight_offset() {
        let items = ["A", "B", "C", "D"];
        let mut session = DragSession::begin(&"A", &items).unwrap();
        let mut log = Vec::new();

        drag(&mut session, &items, &[180.0], &mut log);
        assert_eq!(session.displaced_count(), 2);

        session.resume_at(190.0, &items, METRICS, |item, state| log.push((*item, state)));
        assert_eq!(session.displaced_count(), 2);
        assert_eq!(session.offset(), 190.0);
        assert_eq!(log, vec![("C", SlideState::Up)]);
    }
}
