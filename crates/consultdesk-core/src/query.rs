//! Caller-facing schedule queries.
//!
//! [`ScheduleQuery`] mirrors what arrives from a query string or CLI flags:
//! every field is an optional string. [`ScheduleQuery::validate`] turns it
//! into a [`ValidatedQuery`] or a validation error; nothing is coerced.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::EventStatus;
use crate::filter::ScheduleFilter;
use crate::time::{DateRange, parse_datetime};

/// An unvalidated schedule list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
    pub service_id: Option<String>,
    pub assignee_id: Option<String>,
    pub search: Option<String>,
}

/// A query whose dates and status have been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedQuery {
    /// Date window; `None` means no date constraint.
    pub range: Option<DateRange>,
    pub filter: ScheduleFilter,
}

impl ScheduleQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: date window bounds.
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Builder: status name.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder: free-text search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Validates the query.
    ///
    /// Blank fields count as absent. Either both or neither date bound must
    /// be present.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::MissingField`] when only one bound is given
    /// - [`ScheduleError::InvalidDate`] for an unparseable bound
    /// - [`ScheduleError::InvalidRange`] when start is after end
    /// - [`ScheduleError::InvalidStatus`] for an unknown status
    pub fn validate(&self) -> ScheduleResult<ValidatedQuery> {
        let range = match (present(&self.start), present(&self.end)) {
            (None, None) => None,
            (Some(_), None) => return Err(ScheduleError::MissingField("end")),
            (None, Some(_)) => return Err(ScheduleError::MissingField("start")),
            (Some(start), Some(end)) => Some(DateRange::new(
                parse_datetime("start", start)?,
                parse_datetime("end", end)?,
            )?),
        };

        let status = present(&self.status)
            .map(str::parse::<EventStatus>)
            .transpose()?;

        let filter = ScheduleFilter {
            status,
            client_id: present(&self.client_id).map(str::to_string),
            project_id: present(&self.project_id).map(str::to_string),
            service_id: present(&self.service_id).map(str::to_string),
            assignee_id: present(&self.assignee_id).map(str::to_string),
            search: present(&self.search).map(str::to_string),
        };

        Ok(ValidatedQuery { range, filter })
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
