//! Core types: schedule events, date ranges, filters, recurrence

pub mod engine;
pub mod error;
pub mod event;
pub mod filter;
pub mod overlap;
pub mod query;
pub mod recurrence;
pub mod time;
pub mod tracing;

pub use engine::{AgendaEntry, DEFAULT_MAX_OCCURRENCES, EngineConfig, ScheduleRangeEngine};
pub use error::{ScheduleError, ScheduleResult};
pub use event::{EventStatus, Occurrence, Recurrence, ScheduleEvent};
pub use filter::ScheduleFilter;
pub use overlap::{event_overlaps, filter_overlapping, sort_by_start};
pub use query::{ScheduleQuery, ValidatedQuery};
pub use recurrence::{Occurrences, expand_in_range, next_occurrence, next_occurrence_from};
pub use time::{DateRange, parse_datetime};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
