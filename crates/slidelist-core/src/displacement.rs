//! Offset to displaced-neighbor count, with hysteresis.

/// Number of neighbors a drag of `abs_offset` pixels has displaced.
///
/// A neighbor counts as passed once the dragged item is within
/// `slide_threshold` pixels of its far edge (normally half an item, which
/// puts the switch at the neighbor's midpoint).
/// Between boundaries the previous count is kept so that small back-and-forth
/// motion does not flicker.
///
/// `abs_offset` must be non-negative; the caller strips the sign.
pub fn displaced_count(
    abs_offset: f32,
    item_height: u32,
    slide_threshold: u32,
    previous_count: usize,
) -> usize {
    if item_height == 0 {
        return 0;
    }

    let height = item_height as f32;
    let threshold = slide_threshold as f32;
    let past_threshold = abs_offset - threshold - 1.0;

    if past_threshold < 0.0 {
        return 0;
    }

    let in_offset = whole_items(abs_offset, height);
    let plus_offset = whole_items(abs_offset + threshold, height);
    let minus_offset = whole_items(past_threshold, height);

    if plus_offset > in_offset {
        plus_offset
    } else if minus_offset < in_offset {
        in_offset
    } else {
        previous_count
    }
}

/// Default slide threshold for an item height: half an item, rounded down.
pub fn default_slide_threshold(item_height: u32) -> u32 {
    item_height / 2
}

fn whole_items(offset: f32, height: f32) -> usize {
    (offset / height).floor().max(0.0) as usize
}
