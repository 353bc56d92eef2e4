//! Recurrence advancement.
//!
//! Occurrence `n` of a recurring event starts at `start + n * unit`, computed
//! from the original start every time rather than by stepping from the
//! previous occurrence. Calendar-month arithmetic clamps to the last day of
//! shorter months, so a monthly event anchored on Jan 31 lands on Feb 28
//! (Feb 29 in leap years) and returns to Mar 31: every month appears exactly
//! once and the day of month never drifts.
//!
//! Every occurrence keeps the original event duration.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use tracing::{debug, trace};

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Occurrence, Recurrence, ScheduleEvent};
use crate::time::DateRange;

/// Returns the start of occurrence `index` counted from `anchor`.
///
/// Returns `None` when the result is not representable, or when `recurrence`
/// is [`Recurrence::None`] and `index > 0`.
pub fn nth_start(
    anchor: DateTime<Utc>,
    recurrence: Recurrence,
    index: u32,
) -> Option<DateTime<Utc>> {
    if index == 0 {
        return Some(anchor);
    }
    match recurrence {
        Recurrence::None => None,
        Recurrence::Daily => anchor.checked_add_signed(Duration::days(i64::from(index))),
        Recurrence::Weekly => anchor.checked_add_signed(Duration::weeks(i64::from(index))),
        Recurrence::Monthly => anchor.checked_add_months(Months::new(index)),
        Recurrence::Yearly => anchor.checked_add_months(Months::new(index.checked_mul(12)?)),
    }
}

/// Returns the smallest index whose start is not earlier than `after`.
fn first_index_at_or_after(
    anchor: DateTime<Utc>,
    recurrence: Recurrence,
    after: DateTime<Utc>,
) -> ScheduleResult<u32> {
    if !recurrence.is_recurring() {
        return Err(ScheduleError::NotRecurring);
    }
    if after <= anchor {
        return Ok(0);
    }

    // A lower bound on the answer; at most two correction steps follow.
    let estimate = match recurrence {
        Recurrence::Daily => (after - anchor).num_days(),
        Recurrence::Weekly => (after - anchor).num_weeks(),
        Recurrence::Monthly => month_ordinal(after) - month_ordinal(anchor) - 1,
        Recurrence::Yearly => i64::from(after.year() - anchor.year()) - 1,
        Recurrence::None => 0,
    };
    let mut index = u32::try_from(estimate.max(0)).map_err(|_| ScheduleError::OutOfRange)?;

    loop {
        let start = nth_start(anchor, recurrence, index).ok_or(ScheduleError::OutOfRange)?;
        if start >= after {
            return Ok(index);
        }
        index = index.checked_add(1).ok_or(ScheduleError::OutOfRange)?;
    }
}

fn month_ordinal(dt: DateTime<Utc>) -> i64 {
    i64::from(dt.year()) * 12 + i64::from(dt.month0())
}

fn occurrence_at(
    start_date: DateTime<Utc>,
    duration: Duration,
    recurrence: Recurrence,
    index: u32,
) -> ScheduleResult<Occurrence> {
    let start = nth_start(start_date, recurrence, index).ok_or(ScheduleError::OutOfRange)?;
    let end = start
        .checked_add_signed(duration)
        .ok_or(ScheduleError::OutOfRange)?;
    Ok(Occurrence { index, start, end })
}

/// Computes the next occurrence of a recurring interval.
///
/// Returns the earliest occurrence whose start is `>= after`; an occurrence
/// starting exactly at `after` qualifies. If `after` precedes `start_date`
/// the original interval is returned. The end is always
/// `start + (end_date - start_date)`.
///
/// This does not look at any recurrence end; see [`next_occurrence`] for the
/// bounded form.
///
/// # Errors
///
/// [`ScheduleError::NotRecurring`] for [`Recurrence::None`] and
/// [`ScheduleError::OutOfRange`] if the result is not representable.
pub fn next_occurrence_from(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    recurrence: Recurrence,
    after: DateTime<Utc>,
) -> ScheduleResult<Occurrence> {
    let index = first_index_at_or_after(start_date, recurrence, after)?;
    occurrence_at(start_date, end_date - start_date, recurrence, index)
}

/// Computes the next occurrence of an event, honouring its recurrence end.
///
/// Returns `Ok(None)` when the candidate starts after `recurrence_end`. An
/// occurrence starting exactly at `recurrence_end` is still returned.
pub fn next_occurrence(
    event: &ScheduleEvent,
    after: DateTime<Utc>,
) -> ScheduleResult<Option<Occurrence>> {
    let occurrence =
        next_occurrence_from(event.start_date, event.end_date, event.recurrence, after)?;
    if event
        .recurrence_end
        .is_some_and(|limit| occurrence.start > limit)
    {
        debug!(
            event_id = %event.id,
            candidate = %occurrence.start,
            "Next occurrence falls after recurrence end"
        );
        return Ok(None);
    }
    Ok(Some(occurrence))
}

/// Iterator over the occurrences of an event, in order.
///
/// A non-recurring event yields itself once. A recurring event yields until
/// an occurrence would start after `recurrence_end` or date arithmetic runs
/// out of range; without a recurrence end it is unbounded.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    event: &'a ScheduleEvent,
    next_index: Option<u32>,
}

impl<'a> Occurrences<'a> {
    /// Iterates from the event's original start.
    pub fn new(event: &'a ScheduleEvent) -> Self {
        Self::starting_at(event, 0)
    }

    /// Iterates from occurrence `index`.
    pub fn starting_at(event: &'a ScheduleEvent, index: u32) -> Self {
        let next_index = if event.is_recurring() || index == 0 {
            Some(index)
        } else {
            None
        };
        Self { event, next_index }
    }

    /// Iterates from the first occurrence starting at or after `after`.
    pub fn after(event: &'a ScheduleEvent, after: DateTime<Utc>) -> ScheduleResult<Self> {
        if !event.is_recurring() {
            let next_index = (event.start_date >= after).then_some(0);
            return Ok(Self { event, next_index });
        }
        let index = first_index_at_or_after(event.start_date, event.recurrence, after)?;
        Ok(Self::starting_at(event, index))
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index.take()?;
        let event = self.event;
        let occurrence =
            match occurrence_at(event.start_date, event.duration(), event.recurrence, index) {
                Ok(occurrence) => occurrence,
                Err(err) => {
                    trace!(event_id = %event.id, index, %err, "Stopping occurrence iteration");
                    return None;
                }
            };

        if event
            .recurrence_end
            .is_some_and(|limit| occurrence.start > limit)
        {
            return None;
        }

        if event.is_recurring() {
            self.next_index = index.checked_add(1);
        }
        Some(occurrence)
    }
}

/// Expands an event into the occurrences overlapping `range`.
///
/// Uses the same inclusive overlap rule as range filtering. At most `limit`
/// occurrences are returned.
pub fn expand_in_range(
    event: &ScheduleEvent,
    range: &DateRange,
    limit: usize,
) -> ScheduleResult<Vec<Occurrence>> {
    if !event.is_recurring() {
        let occurrence = event.first_occurrence();
        let hit = range.overlaps(occurrence.start, occurrence.end) && limit > 0;
        return Ok(if hit { vec![occurrence] } else { Vec::new() });
    }

    // The first occurrence that can still end inside the range starts no
    // earlier than `range.start - duration`.
    let earliest = range
        .start()
        .checked_sub_signed(event.duration().max(Duration::zero()))
        .ok_or(ScheduleError::OutOfRange)?;
    let occurrences: Vec<_> = Occurrences::after(event, earliest)?
        .take_while(|o| o.start <= range.end())
        .filter(|o| range.overlaps(o.start, o.end))
        .take(limit)
        .collect();

    debug!(
        event_id = %event.id,
        count = occurrences.len(),
        "Expanded recurring event"
    );
    Ok(occurrences)
}
