//! JSON file store.
//!
//! Reads a JSON array of schedule records from disk on every call, so edits
//! to the file are picked up without a restart. Records that fail to decode
//! are logged and skipped; a file that is not a JSON array is an error.

use std::path::{Path, PathBuf};

use consultdesk_core::{ScheduleEvent, ScheduleFilter};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::ScheduleStore;

/// A store reading schedule records from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    name: String,
}

impl JsonFileStore {
    /// Creates a store for the given file. The file is not touched until
    /// the first fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes every record in the file.
    pub fn load(&self) -> StoreResult<Vec<ScheduleEvent>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            let err = if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::not_found(format!("no schedule file at {}", self.path.display()))
            } else {
                StoreError::io(format!("failed to read {}", self.path.display()))
            };
            err.with_store(&self.name).with_source(e)
        })?;

        let records: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            StoreError::parse("expected a JSON array of schedule records")
                .with_store(&self.name)
                .with_source(e)
        })?;

        let total = records.len();
        let events: Vec<ScheduleEvent> = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| {
                match serde_json::from_value::<ScheduleEvent>(record) {
                    Ok(event) => Some(event),
                    Err(err) => {
                        warn!(store = %self.name, position, %err, "Skipping malformed schedule record");
                        None
                    }
                }
            })
            .collect();

        debug!(store = %self.name, total, loaded = events.len(), "Loaded schedule file");
        Ok(events)
    }

    /// Writes events to the file as a pretty-printed JSON array.
    pub fn save(&self, events: &[ScheduleEvent]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(events).map_err(|e| {
            StoreError::invalid_data("failed to encode schedule records")
                .with_store(&self.name)
                .with_source(e)
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(format!("failed to create {}", parent.display()))
                    .with_store(&self.name)
                    .with_source(e)
            })?;
        }
        std::fs::write(&self.path, json).map_err(|e| {
            StoreError::io(format!("failed to write {}", self.path.display()))
                .with_store(&self.name)
                .with_source(e)
        })
    }
}

impl ScheduleStore for JsonFileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, filter: &ScheduleFilter) -> StoreResult<Vec<ScheduleEvent>> {
        Ok(filter.apply(self.load()?))
    }
}
