//! Date types for schedule queries.
//!
//! This module provides [`DateRange`], the closed window used by range
//! queries, and [`parse_datetime`], the single entry point for turning
//! caller-supplied date strings into UTC instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Naive datetime layouts accepted by [`parse_datetime`], read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a caller-supplied date string into a UTC instant.
///
/// Accepted inputs, tried in order:
/// - RFC 3339 (`2025-03-01T09:00:00Z`, `2025-03-01T10:00:00+01:00`)
/// - naive datetimes (`2025-03-01T09:00:00`, `2025-03-01 09:00`), read as UTC
/// - plain dates (`2025-03-01`), read as midnight UTC
///
/// Anything else is rejected; nothing is coerced.
pub fn parse_datetime(field: &'static str, value: &str) -> ScheduleResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::MissingField(field));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }

    Err(ScheduleError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Returns midnight UTC on the given date.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// A closed date window `[start, end]` in UTC.
///
/// Both bounds are inclusive. Construction (including deserialization)
/// guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ScheduleError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<Self> {
        if start > end {
            return Err(ScheduleError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds with [`parse_datetime`] and builds a range.
    pub fn parse(start: &str, end: &str) -> ScheduleResult<Self> {
        let start = parse_datetime("start", start)?;
        let end = parse_datetime("end", end)?;
        Self::new(start, end)
    }

    /// Range start (inclusive).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Range end (inclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the length of this range.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if an instant falls within the range, bounds included.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// Checks if an interval `[start, end]` matches this range.
    ///
    /// Matches when the interval starts inside the range, ends inside the
    /// range, or spans the whole range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.contains(start)
            || self.contains(end)
            || (start <= self.start && end >= self.end)
    }
}
