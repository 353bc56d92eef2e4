//! Equality and free-text filters over schedule events.
//!
//! These are the predicates a store applies before the engine does any date
//! math. Every field is optional; an absent field never excludes anything.

use serde::{Deserialize, Serialize};

use crate::event::{EventStatus, ScheduleEvent};

/// Optional AND-combined constraints on schedule events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,

    /// Case-insensitive substring matched against title, description or location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ScheduleFilter {
    /// Creates an empty filter that matches every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: only events with this status.
    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder: only events for this client.
    pub fn client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Builder: only events for this project.
    pub fn project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Builder: only events for this service.
    pub fn service(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Builder: only events assigned to this user.
    pub fn assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    /// Builder: free-text search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Returns true if no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.client_id.is_none()
            && self.project_id.is_none()
            && self.service_id.is_none()
            && self.assignee_id.is_none()
            && self.search_needle().is_none()
    }

    /// Checks every constraint against an event.
    pub fn matches(&self, event: &ScheduleEvent) -> bool {
        self.matches_with(event, self.search_needle().as_deref())
    }

    /// Keeps the events that match, preserving order.
    pub fn apply(&self, events: impl IntoIterator<Item = ScheduleEvent>) -> Vec<ScheduleEvent> {
        let needle = self.search_needle();
        events
            .into_iter()
            .filter(|e| self.matches_with(e, needle.as_deref()))
            .collect()
    }

    /// `needle` is the trimmed, lowercased search text.
    fn matches_with(&self, event: &ScheduleEvent, needle: Option<&str>) -> bool {
        if self.status.is_some_and(|status| status != event.status) {
            return false;
        }

        let references = [
            (&self.client_id, &event.client_id),
            (&self.project_id, &event.project_id),
            (&self.service_id, &event.service_id),
            (&self.assignee_id, &event.assignee_id),
        ];
        for (wanted, actual) in references {
            if let Some(wanted) = wanted
                && actual.as_ref() != Some(wanted)
            {
                return false;
            }
        }

        needle.is_none_or(|needle| matches_text(event, needle))
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

fn matches_text(event: &ScheduleEvent, needle: &str) -> bool {
    std::iter::once(event.title.as_str())
        .chain(event.description.as_deref())
        .chain(event.location.as_deref())
        .any(|field| field.to_lowercase().contains(needle))
}
