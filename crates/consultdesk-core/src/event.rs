//! Schedule event types.
//!
//! This module provides the record types the engine reads:
//! - [`ScheduleEvent`]: a calendar-like schedule entry owned by the store
//! - [`Recurrence`]: how often an event repeats
//! - [`EventStatus`]: the workflow status of an entry
//! - [`Occurrence`]: one concrete instance of a (possibly recurring) event

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// How often a schedule event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// The event happens once.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    /// Returns the lowercase name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Returns true unless this is [`Recurrence::None`].
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(ScheduleError::InvalidRecurrence(s.to_string())),
        }
    }
}

/// Workflow status of a schedule entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Returns the snake_case name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ScheduleError::InvalidStatus(s.to_string())),
        }
    }
}

/// A schedule entry as persisted by the store.
///
/// `start_date <= end_date` is expected but not enforced here; the engine
/// treats records as read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Unique identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// When the (first occurrence of the) event starts.
    pub start_date: DateTime<Utc>,
    /// When the (first occurrence of the) event ends.
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// No occurrence starts after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

impl ScheduleEvent {
    /// Creates a one-off scheduled event.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            location: None,
            start_date,
            end_date,
            status: EventStatus::Scheduled,
            recurrence: Recurrence::None,
            recurrence_end: None,
            client_id: None,
            project_id: None,
            service_id: None,
            assignee_id: None,
        }
    }

    /// Returns the event length, carried unchanged to every occurrence.
    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }

    /// Returns true if this event repeats.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Returns the first occurrence, i.e. the event itself.
    pub fn first_occurrence(&self) -> Occurrence {
        Occurrence {
            index: 0,
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the recurrence.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Builder method to bound the recurrence.
    pub fn with_recurrence_end(mut self, end: DateTime<Utc>) -> Self {
        self.recurrence_end = Some(end);
        self
    }

    /// Builder method to set the client reference.
    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Builder method to set the project reference.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Builder method to set the service reference.
    pub fn with_service(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Builder method to set the assignee reference.
    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }
}

/// One concrete instance of a schedule event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Number of recurrence steps from the original start; 0 is the event itself.
    pub index: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Occurrence {
    /// Returns the occurrence length.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
