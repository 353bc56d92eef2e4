//! Schedule commands: list, next, agenda, upcoming.
//!
//! Each command returns its rendered output; `main` prints it.

use chrono::{DateTime, Utc};
use consultdesk_core::{DateRange, ScheduleFilter, ScheduleQuery, parse_datetime};
use consultdesk_store::{ScheduleService, ScheduleStore};
use tracing::debug;

use crate::cli::ListArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::render::{self, NextOutput, Renderer};

impl From<&ListArgs> for ScheduleQuery {
    fn from(args: &ListArgs) -> Self {
        Self {
            start: args.from.clone(),
            end: args.to.clone(),
            status: args.status.clone(),
            client_id: args.client.clone(),
            project_id: args.project.clone(),
            service_id: args.service.clone(),
            assignee_id: args.assignee.clone(),
            search: args.search.clone(),
        }
    }
}

/// Lists schedules matching the flags.
pub fn list<S: ScheduleStore>(
    service: &ScheduleService<S>,
    config: &CliConfig,
    args: &ListArgs,
) -> CliResult<String> {
    let events = service.list(&ScheduleQuery::from(args))?;
    if args.json {
        render::json(&events)
    } else {
        Renderer::new(&config.display).events(&events)
    }
}

/// Shows the next occurrence of one schedule at or after `after` (or `now`).
pub fn next<S: ScheduleStore>(
    service: &ScheduleService<S>,
    config: &CliConfig,
    id: &str,
    after: Option<&str>,
    json: bool,
    now: DateTime<Utc>,
) -> CliResult<String> {
    let after = match after {
        Some(value) => parse_datetime("after", value)?,
        None => now,
    };
    debug!(id, %after, "Looking up next occurrence");
    let (event, next) = service.next_occurrence(id, after)?;
    if json {
        render::json(&NextOutput {
            event: &event,
            next: next.as_ref(),
        })
    } else {
        Renderer::new(&config.display).next(&event, next.as_ref())
    }
}

/// Expands every schedule into occurrences between `from` and `to`.
pub fn agenda<S: ScheduleStore>(
    service: &ScheduleService<S>,
    config: &CliConfig,
    from: &str,
    to: &str,
    json: bool,
) -> CliResult<String> {
    let range = DateRange::parse(from, to)?;
    let entries = service.agenda(&range, &ScheduleFilter::default())?;
    if json {
        render::json(&entries)
    } else {
        Renderer::new(&config.display).agenda(&entries)
    }
}

/// Shows the next occurrence of every schedule from `now`.
pub fn upcoming<S: ScheduleStore>(
    service: &ScheduleService<S>,
    config: &CliConfig,
    limit: Option<usize>,
    json: bool,
    now: DateTime<Utc>,
) -> CliResult<String> {
    let limit = limit.unwrap_or(config.engine.upcoming_limit);
    let entries = service.upcoming(now, limit)?;
    if json {
        render::json(&entries)
    } else {
        Renderer::new(&config.display).agenda(&entries)
    }
}
