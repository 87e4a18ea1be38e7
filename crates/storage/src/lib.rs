#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sessions;
pub mod sqlite;

pub use repository::{InMemoryStore, KeyValueStore, StorageError};
pub use sessions::{DEFAULT_SESSIONS_KEY, LoadOutcome, SessionStore};
