//! ScheduleStore trait, in-memory and JSON file stores, schedule service

pub mod error;
pub mod json;
pub mod service;
pub mod store;

pub use error::{StoreError, StoreErrorCode, StoreResult};
pub use json::JsonFileStore;
pub use service::{ScheduleService, ServiceError, ServiceResult};
pub use store::{InMemoryStore, ScheduleStore};
