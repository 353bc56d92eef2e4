//! Schedule service: a store plus the range engine.
//!
//! The store answers equality and text filters; the engine does the date
//! overlap, ordering and recurrence math on whatever the store returned.

use chrono::{DateTime, Utc};
use consultdesk_core::{
    AgendaEntry, DateRange, Occurrence, ScheduleError, ScheduleEvent, ScheduleFilter,
    ScheduleQuery, ScheduleRangeEngine, sort_by_start,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::ScheduleStore;

/// Errors returned by [`ScheduleService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller's input was rejected.
    #[error(transparent)]
    Validation(#[from] ScheduleError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No event has the requested id.
    #[error("no schedule with id `{0}`")]
    UnknownEvent(String),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Answers schedule queries against a store.
#[derive(Debug)]
pub struct ScheduleService<S> {
    store: S,
    engine: ScheduleRangeEngine,
}

impl<S: ScheduleStore> ScheduleService<S> {
    /// Creates a service over `store` using `engine`.
    pub fn new(store: S, engine: ScheduleRangeEngine) -> Self {
        Self { store, engine }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the engine.
    pub fn engine(&self) -> &ScheduleRangeEngine {
        &self.engine
    }

    /// Lists events matching a raw query, ascending by start date.
    ///
    /// The query is validated before the store is touched.
    pub fn list(&self, query: &ScheduleQuery) -> ServiceResult<Vec<ScheduleEvent>> {
        let validated = query.validate()?;
        let fetched = self.store.fetch(&validated.filter)?;
        let fetched_count = fetched.len();

        // Filters already ran in the store; only the range is left.
        let events = match validated.range {
            Some(ref range) => self.engine.overlapping(fetched, range),
            None => {
                let mut sorted = fetched;
                sort_by_start(&mut sorted);
                sorted
            }
        };

        info!(
            store = self.store.name(),
            fetched = fetched_count,
            returned = events.len(),
            "Listed schedules"
        );
        Ok(events)
    }

    /// Returns the next occurrence of event `id` at or after `after`.
    ///
    /// `Ok(None)` means the event's recurrence has ended.
    pub fn next_occurrence(
        &self,
        id: &str,
        after: DateTime<Utc>,
    ) -> ServiceResult<(ScheduleEvent, Option<Occurrence>)> {
        let event = self
            .store
            .get(id)?
            .ok_or_else(|| ServiceError::UnknownEvent(id.to_string()))?;
        let next = self.engine.next_occurrence(&event, after)?;
        debug!(event_id = id, ?next, "Computed next occurrence");
        Ok((event, next))
    }

    /// Expands every event matching `filter` into occurrences within `range`.
    pub fn agenda(
        &self,
        range: &DateRange,
        filter: &ScheduleFilter,
    ) -> ServiceResult<Vec<AgendaEntry>> {
        let events = self.store.fetch(filter)?;
        Ok(self.engine.agenda(&events, range))
    }

    /// The next `limit` occurrences across all events, from `now` on.
    pub fn upcoming(&self, now: DateTime<Utc>, limit: usize) -> ServiceResult<Vec<AgendaEntry>> {
        let events = self.store.fetch(&ScheduleFilter::default())?;
        Ok(self.engine.upcoming(&events, now, limit))
    }
}
