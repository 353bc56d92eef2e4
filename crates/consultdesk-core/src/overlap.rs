//! Range-overlap filtering.
//!
//! An event matches a [`DateRange`] when its start falls inside the range,
//! its end falls inside the range, or it spans the whole range. Bounds are
//! inclusive on both sides.

use tracing::debug;

use crate::event::ScheduleEvent;
use crate::time::DateRange;

/// Checks if a single event overlaps the range.
pub fn event_overlaps(event: &ScheduleEvent, range: &DateRange) -> bool {
    range.overlaps(event.start_date, event.end_date)
}

/// Returns the events overlapping `range`, sorted ascending by start date.
///
/// The sort is stable, so events sharing a start date keep their input order.
pub fn filter_overlapping(
    events: impl IntoIterator<Item = ScheduleEvent>,
    range: &DateRange,
) -> Vec<ScheduleEvent> {
    let mut matched: Vec<_> = events
        .into_iter()
        .filter(|e| event_overlaps(e, range))
        .collect();
    sort_by_start(&mut matched);
    debug!(
        matched = matched.len(),
        start = %range.start(),
        end = %range.end(),
        "Filtered events by range"
    );
    matched
}

/// Sorts events ascending by start date, keeping input order for ties.
pub fn sort_by_start(events: &mut [ScheduleEvent]) {
    events.sort_by_key(|e| e.start_date);
}
