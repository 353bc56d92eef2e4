//! ScheduleStore trait definition.
//!
//! A store owns schedule records and answers equality and text filters.
//! Date-range overlap and recurrence math are left to the engine in
//! `consultdesk-core`, whatever the backing storage is.

use consultdesk_core::{ScheduleEvent, ScheduleFilter};
use tracing::debug;

use crate::error::StoreResult;

/// The core abstraction for schedule storage backends.
pub trait ScheduleStore: Send + Sync {
    /// Returns a short name for this store, used in logs and errors.
    fn name(&self) -> &str;

    /// Returns every event matching `filter`, in storage order.
    fn fetch(&self, filter: &ScheduleFilter) -> StoreResult<Vec<ScheduleEvent>>;

    /// Looks up a single event by id.
    fn get(&self, id: &str) -> StoreResult<Option<ScheduleEvent>> {
        let events = self.fetch(&ScheduleFilter::default())?;
        Ok(events.into_iter().find(|e| e.id == id))
    }
}

/// A store backed by a vector, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    events: Vec<ScheduleEvent>,
}

impl InMemoryStore {
    /// Creates a store holding the given events.
    pub fn new(events: Vec<ScheduleEvent>) -> Self {
        Self { events }
    }

    /// Adds an event, replacing any existing event with the same id.
    pub fn upsert(&mut self, event: ScheduleEvent) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    /// Removes an event by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<ScheduleEvent> {
        let position = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(position))
    }

    /// Returns the number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ScheduleStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, filter: &ScheduleFilter) -> StoreResult<Vec<ScheduleEvent>> {
        let events = filter.apply(self.events.iter().cloned());
        debug!(store = self.name(), matched = events.len(), "Fetched events");
        Ok(events)
    }

    fn get(&self, id: &str) -> StoreResult<Option<ScheduleEvent>> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }
}
