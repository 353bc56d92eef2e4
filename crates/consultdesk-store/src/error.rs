//! Error types for schedule store operations.

use std::fmt;
use thiserror::Error;

/// The category of a store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorCode {
    /// The backing resource (file, record) does not exist.
    NotFound,
    /// Reading the backing resource failed.
    Io,
    /// The backing data could not be decoded.
    Parse,
    /// The data decoded but is not usable.
    InvalidData,
}

impl StoreErrorCode {
    /// Returns the snake_case name of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Io => "io",
            Self::Parse => "parse",
            Self::InvalidData => "invalid_data",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a [`ScheduleStore`](crate::ScheduleStore).
#[derive(Debug, Error)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    /// Name of the store that failed (e.g. "json:/path/to/file").
    store: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Creates a new store error.
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            store: None,
            source: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::NotFound, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Io, message)
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Parse, message)
    }

    /// Creates an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::InvalidData, message)
    }

    /// Sets the store name.
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the store name, if set.
    pub fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref store) = self.store {
            write!(f, "[{}] ", store)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
