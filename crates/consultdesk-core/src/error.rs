//! Error types for schedule validation and recurrence math.

use thiserror::Error;

/// Result type for schedule engine operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised by the schedule engine.
///
/// Every variant is an input or programming error. The engine performs no I/O,
/// so none of these are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A date field could not be parsed.
    #[error("invalid date for `{field}`: {value:?}")]
    InvalidDate {
        /// Name of the offending field.
        field: &'static str,
        /// The raw input.
        value: String,
    },

    /// A required field was not supplied.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A range whose start is after its end.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Range start, RFC 3339.
        start: String,
        /// Range end, RFC 3339.
        end: String,
    },

    /// An unknown status name.
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),

    /// An unknown recurrence name.
    #[error("invalid recurrence: {0:?}")]
    InvalidRecurrence(String),

    /// The recurrence advancer was called on a non-recurring event.
    #[error("event does not recur")]
    NotRecurring,

    /// Date arithmetic left the representable range.
    #[error("date arithmetic out of range")]
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ScheduleError::InvalidDate {
            field: "start",
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "invalid date for `start`: \"yesterday\"");

        let err = ScheduleError::MissingField("end");
        assert_eq!(err.to_string(), "missing required field `end`");

        let err = ScheduleError::NotRecurring;
        assert_eq!(err.to_string(), "event does not recur");
    }
}
