use crate::SlotRange;
use crate::tracker::MaterializationTracker;

/// Pops eviction candidates off the tracker's FIFO until it holds at most
/// `limit` entries, emitting the indices that should be detached.
///
/// A popped index that is in view or in flight is dropped from the FIFO
/// without being re-inserted: the next `mark_wanted` re-queues it at the tail.
/// This is intentionally lossy; the occasional redundant re-query is preferred
/// over reordering the FIFO on every pass. The loop is bounded by the queue
/// length at entry, so a single pass always terminates.
///
/// The caller decides what an emitted index means (here: logical removal now,
/// physical detach deferred). When no limit is configured the engine never
/// calls this.
pub(crate) fn select_for_eviction(
    tracker: &mut MaterializationTracker,
    in_view: SlotRange,
    limit: usize,
    mut emit: impl FnMut(usize),
) {
    let mut pops_left = tracker.queue_len();
    while pops_left > 0 && tracker.queue_len() > limit {
        pops_left -= 1;
        let Some(index) = tracker.pop_oldest() else {
            break;
        };
        if in_view.contains(index) || tracker.is_in_flight(index) {
            continue;
        }
        emit(index);
    }
}
