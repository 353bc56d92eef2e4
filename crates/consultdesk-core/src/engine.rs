//! The schedule range engine.
//!
//! [`ScheduleRangeEngine`] bundles range filtering and recurrence math behind
//! one configured value. It holds no state besides its configuration; every
//! call is a pure function of its arguments, including the reference instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScheduleResult;
use crate::event::{Occurrence, ScheduleEvent};
use crate::overlap::{filter_overlapping, sort_by_start};
use crate::query::ValidatedQuery;
use crate::recurrence::{Occurrences, expand_in_range, next_occurrence};
use crate::time::DateRange;

/// Default cap on occurrences produced per event by range expansion.
pub const DEFAULT_MAX_OCCURRENCES: usize = 500;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum occurrences expanded per event for a single range.
    pub max_occurrences: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl EngineConfig {
    /// Builder: set the per-event expansion cap.
    #[must_use]
    pub fn with_max_occurrences(mut self, max: usize) -> Self {
        self.max_occurrences = max;
        self
    }
}

/// One occurrence of an event, paired with the event it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub event: ScheduleEvent,
    pub occurrence: Occurrence,
}

/// Range filtering and recurrence math over in-memory schedule events.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRangeEngine {
    config: EngineConfig,
}

impl ScheduleRangeEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Events overlapping `range`, ascending by start date.
    pub fn overlapping(
        &self,
        events: impl IntoIterator<Item = ScheduleEvent>,
        range: &DateRange,
    ) -> Vec<ScheduleEvent> {
        filter_overlapping(events, range)
    }

    /// Applies a validated query: equality and text filters, then the date
    /// window if one was given. The result is always sorted by start date.
    pub fn query(
        &self,
        events: impl IntoIterator<Item = ScheduleEvent>,
        query: &ValidatedQuery,
    ) -> Vec<ScheduleEvent> {
        let filtered = query.filter.apply(events);
        match query.range {
            Some(ref range) => filter_overlapping(filtered, range),
            None => {
                let mut sorted = filtered;
                sort_by_start(&mut sorted);
                sorted
            }
        }
    }

    /// Next occurrence of `event` at or after `after`, bounded by its
    /// recurrence end.
    pub fn next_occurrence(
        &self,
        event: &ScheduleEvent,
        after: DateTime<Utc>,
    ) -> ScheduleResult<Option<Occurrence>> {
        next_occurrence(event, after)
    }

    /// Occurrences of a single event overlapping `range`, capped by
    /// [`EngineConfig::max_occurrences`].
    pub fn expand(
        &self,
        event: &ScheduleEvent,
        range: &DateRange,
    ) -> ScheduleResult<Vec<Occurrence>> {
        expand_in_range(event, range, self.config.max_occurrences)
    }

    /// Expands every event into its occurrences within `range`, sorted by
    /// occurrence start.
    ///
    /// Events whose expansion fails are skipped with a warning.
    pub fn agenda<'a>(
        &self,
        events: impl IntoIterator<Item = &'a ScheduleEvent>,
        range: &DateRange,
    ) -> Vec<AgendaEntry> {
        let mut entries = Vec::new();
        for event in events {
            match self.expand(event, range) {
                Ok(occurrences) => entries.extend(occurrences.into_iter().map(|occurrence| {
                    AgendaEntry {
                        event: event.clone(),
                        occurrence,
                    }
                })),
                Err(err) => warn!(event_id = %event.id, %err, "Skipping event in agenda"),
            }
        }
        entries.sort_by_key(|e| e.occurrence.start);
        debug!(entries = entries.len(), "Built agenda");
        entries
    }

    /// The next occurrence of every event starting at or after `now`,
    /// soonest first, at most `limit` entries.
    ///
    /// One-off events are included while their start is still ahead.
    pub fn upcoming<'a>(
        &self,
        events: impl IntoIterator<Item = &'a ScheduleEvent>,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<AgendaEntry> {
        let mut entries: Vec<_> = events
            .into_iter()
            .filter_map(|event| {
                let next = match Occurrences::after(event, now) {
                    Ok(mut occurrences) => occurrences.next(),
                    Err(err) => {
                        warn!(event_id = %event.id, %err, "Skipping event in upcoming");
                        None
                    }
                };
                next.map(|occurrence| AgendaEntry {
                    event: event.clone(),
                    occurrence,
                })
            })
            .collect();
        entries.sort_by_key(|e| e.occurrence.start);
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventStatus, Recurrence};
    use crate::query::ScheduleQuery;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn sample_events() -> Vec<ScheduleEvent> {
        vec![
            ScheduleEvent::new("visit", "Client visit", utc(2025, 3, 10, 14, 0, 0), utc(2025, 3, 10, 15, 0, 0))
                .with_client("acme"),
            ScheduleEvent::new("standup", "Team standup", utc(2025, 3, 3, 9, 0, 0), utc(2025, 3, 3, 9, 15, 0))
                .with_recurrence(Recurrence::Weekly),
            ScheduleEvent::new("audit", "Safety audit", utc(2025, 3, 1, 9, 0, 0), utc(2025, 3, 3, 17, 0, 0))
                .with_client("acme")
                .with_status(EventStatus::Completed),
            ScheduleEvent::new("filing", "VAT filing", utc(2025, 1, 31, 12, 0, 0), utc(2025, 1, 31, 13, 0, 0))
                .with_recurrence(Recurrence::Monthly)
                .with_recurrence_end(utc(2025, 4, 30, 23, 59, 59)),
        ]
    }

    fn ids(events: &[ScheduleEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn default_config() {
        let engine = ScheduleRangeEngine::default();
        assert_eq!(engine.config().max_occurrences, DEFAULT_MAX_OCCURRENCES);
        let engine = ScheduleRangeEngine::new(EngineConfig::default().with_max_occurrences(3));
        assert_eq!(engine.config().max_occurrences, 3);
    }

    #[test]
    fn query_without_range_sorts_everything() {
        let engine = ScheduleRangeEngine::default();
        let query = ScheduleQuery::new().validate().unwrap();
        let result = engine.query(sample_events(), &query);
        assert_eq!(ids(&result), vec!["filing", "audit", "standup", "visit"]);
    }

    #[test]
    fn query_combines_filters_and_range() {
        let engine = ScheduleRangeEngine::default();
        let query = ScheduleQuery {
            client_id: Some("acme".into()),
            ..ScheduleQuery::new().between("2025-03-02", "2025-03-11")
        }
        .validate()
        .unwrap();
        let result = engine.query(sample_events(), &query);
        assert_eq!(ids(&result), vec!["audit", "visit"]);
    }

    #[test]
    fn overlapping_uses_stored_dates_only() {
        // The weekly standup is stored on Mar 3 and is not expanded here
        let engine = ScheduleRangeEngine::default();
        let range = DateRange::new(utc(2025, 3, 4, 0, 0, 0), utc(2025, 3, 9, 0, 0, 0)).unwrap();
        assert!(engine.overlapping(sample_events(), &range).is_empty());
    }

    #[test]
    fn agenda_expands_recurring_events() {
        let engine = ScheduleRangeEngine::default();
        let events = sample_events();
        let range = DateRange::new(utc(2025, 3, 1, 0, 0, 0), utc(2025, 3, 16, 0, 0, 0)).unwrap();
        let agenda = engine.agenda(&events, &range);

        let summary: Vec<_> = agenda
            .iter()
            .map(|e| (e.event.id.as_str(), e.occurrence.start))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("audit", utc(2025, 3, 1, 9, 0, 0)),
                ("standup", utc(2025, 3, 3, 9, 0, 0)),
                ("standup", utc(2025, 3, 10, 9, 0, 0)),
                ("visit", utc(2025, 3, 10, 14, 0, 0)),
            ]
        );
    }

    #[test]
    fn agenda_respects_cap() {
        let engine = ScheduleRangeEngine::new(EngineConfig::default().with_max_occurrences(2));
        let events = sample_events();
        let range = DateRange::new(utc(2025, 3, 1, 0, 0, 0), utc(2025, 6, 1, 0, 0, 0)).unwrap();
        let standups = engine
            .agenda(&events, &range)
            .into_iter()
            .filter(|e| e.event.id == "standup")
            .count();
        assert_eq!(standups, 2);
    }

    #[test]
    fn upcoming_mixes_single_and_recurring() {
        let engine = ScheduleRangeEngine::default();
        let events = sample_events();
        let now = utc(2025, 3, 4, 8, 0, 0);
        let upcoming = engine.upcoming(&events, now, 10);

        let summary: Vec<_> = upcoming
            .iter()
            .map(|e| (e.event.id.as_str(), e.occurrence.start))
            .collect();
        // The audit started before `now` and is not listed
        assert_eq!(
            summary,
            vec![
                ("standup", utc(2025, 3, 10, 9, 0, 0)),
                ("visit", utc(2025, 3, 10, 14, 0, 0)),
                ("filing", utc(2025, 3, 31, 12, 0, 0)),
            ]
        );

        for entry in &upcoming {
            assert_eq!(entry.occurrence.duration(), entry.event.duration());
        }
    }

    #[test]
    fn upcoming_drops_finished_recurrences_and_truncates() {
        let engine = ScheduleRangeEngine::default();
        let events = sample_events();
        let now = utc(2025, 5, 1, 0, 0, 0);
        let upcoming = engine.upcoming(&events, now, 10);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].event.id, "standup");

        let truncated = engine.upcoming(&events, now - Duration::days(90), 2);
        assert_eq!(truncated.len(), 2);
    }

    #[test]
    fn next_occurrence_delegates() {
        let engine = ScheduleRangeEngine::default();
        let events = sample_events();
        let filing = &events[3];
        let next = engine
            .next_occurrence(filing, utc(2025, 2, 1, 0, 0, 0))
            .unwrap()
            .unwrap();
        assert_eq!(next.start, utc(2025, 2, 28, 12, 0, 0));
        assert_eq!(next.end, utc(2025, 2, 28, 13, 0, 0));
    }
}
