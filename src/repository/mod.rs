use chrono::{DateTime, Utc};

use crate::{
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::ClientId,
    },
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod clock;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod storage;

pub use client::{ClientStore, DEFAULT_STORAGE_KEY, load_clients, save_clients};
pub use clock::{ManualClock, SystemClock};
pub use storage::{FileSlotStorage, MemorySlotStorage};

/// Durable key-value slot holding serialized state.
pub trait SlotStorage {
    /// Returns `None` when nothing was ever written under `key`.
    fn read_slot(&self, key: &str) -> RepositoryResult<Option<String>>;
    /// Replaces the content stored under `key`.
    fn write_slot(&self, key: &str, value: &str) -> RepositoryResult<()>;
}

/// Source of the current time for timestamps assigned by the store.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub trait ClientReader {
    fn get_client(&self, id: &ClientId) -> Option<&Client>;
    /// All clients, newest-created first.
    fn list_clients(&self) -> &[Client];
}

/// Mutations of the client collection. Lookups by an unknown id leave the
/// collection untouched and return `None`.
pub trait ClientWriter {
    fn add_client(&mut self, new_client: NewClient) -> Client;
    fn update_client(&mut self, id: &ClientId, updates: &UpdateClient) -> Option<Client>;
    fn remove_client(&mut self, id: &ClientId) -> Option<Client>;
}
