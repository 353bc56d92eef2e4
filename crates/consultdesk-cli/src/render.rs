//! Text and JSON rendering of command results.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use consultdesk_core::{AgendaEntry, Occurrence, ScheduleEvent};
use serde::Serialize;

use crate::config::DisplaySettings;
use crate::error::{CliError, CliResult};

/// Renders values as text lines using the configured display settings.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    display: &'a DisplaySettings,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer.
    pub fn new(display: &'a DisplaySettings) -> Self {
        Self { display }
    }

    fn date(&self, dt: DateTime<Utc>) -> CliResult<String> {
        let mut out = String::new();
        write!(out, "{}", dt.format(&self.display.date_format)).map_err(|_| {
            CliError::Config(format!(
                "display.date_format {:?} cannot render a date",
                self.display.date_format
            ))
        })?;
        Ok(out)
    }

    fn line(
        &self,
        event: &ScheduleEvent,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CliResult<String> {
        Ok(format!(
            "{}  ->  {}  [{}] {} ({})",
            self.date(start)?,
            self.date(end)?,
            event.status,
            event.title,
            event.id
        ))
    }

    fn lines(&self, lines: Vec<String>) -> String {
        if lines.is_empty() {
            self.display.empty_text.clone()
        } else {
            lines.join("\n")
        }
    }

    /// One line per event, using the event's own dates.
    pub fn events(&self, events: &[ScheduleEvent]) -> CliResult<String> {
        let lines = events
            .iter()
            .map(|e| self.line(e, e.start_date, e.end_date))
            .collect::<CliResult<Vec<_>>>()?;
        Ok(self.lines(lines))
    }

    /// One line per agenda entry, using the occurrence's dates.
    pub fn agenda(&self, entries: &[AgendaEntry]) -> CliResult<String> {
        let lines = entries
            .iter()
            .map(|e| self.line(&e.event, e.occurrence.start, e.occurrence.end))
            .collect::<CliResult<Vec<_>>>()?;
        Ok(self.lines(lines))
    }

    /// The next occurrence of one event, or a note that it has ended.
    pub fn next(&self, event: &ScheduleEvent, next: Option<&Occurrence>) -> CliResult<String> {
        match next {
            Some(occurrence) => self.line(event, occurrence.start, occurrence.end),
            None => Ok(format!(
                "{} ({}) has no further occurrences",
                event.title, event.id
            )),
        }
    }
}

/// JSON payload for `next`.
#[derive(Debug, Serialize)]
pub struct NextOutput<'a> {
    pub event: &'a ScheduleEvent,
    pub next: Option<&'a Occurrence>,
}

/// Pretty-prints any serializable value.
pub fn json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
