use crate::SlotRange;

/// Maps a scroll position onto the contiguous run of slots that are in view or
/// within `threshold_px` past the fold.
///
/// The list is a uniform grid of `item_size`-pixel slots. The first slot is the
/// one containing `scroll_offset`; the run then covers every pixel up to
/// `scroll_offset + viewport_size + threshold_px`.
///
/// Pure and stateless: identical inputs always yield identical output. A zero
/// `item_size` or `viewport_size` yields an empty range rather than dividing by
/// zero.
pub fn visible_slots(
    scroll_offset: u64,
    viewport_size: u32,
    threshold_px: u32,
    item_size: u32,
) -> SlotRange {
    if item_size == 0 || viewport_size == 0 {
        return SlotRange::default();
    }

    let item = item_size as u64;
    let first = (scroll_offset / item) as usize;

    // Pixels to cover starting from the top of `first`'s slot: the viewport,
    // the threshold margin, and the part of the first slot already scrolled by.
    let overhang = viewport_size as u64 + threshold_px as u64 + scroll_offset % item;
    let count = overhang.div_ceil(item) as usize;

    SlotRange {
        start: first,
        end: first.saturating_add(count),
    }
}
