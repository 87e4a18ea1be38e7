use std::sync::Arc;

use interview_core::model::Session;
use tracing::{debug, warn};

use crate::record::SessionRecord;
use crate::repository::{KeyValueStore, StorageError};

/// Key the session collection lives under unless configured otherwise.
pub const DEFAULT_SESSIONS_KEY: &str = "interviews";

/// Result of reading the session collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key yet.
    Missing,
    /// Stored collection decoded successfully.
    Loaded(Vec<Session>),
    /// Stored value could not be decoded and was dropped.
    Discarded { reason: String },
}

impl LoadOutcome {
    /// Sessions to start from; empty unless the stored value decoded.
    #[must_use]
    pub fn into_sessions(self) -> Vec<Session> {
        match self {
            LoadOutcome::Loaded(sessions) => sessions,
            LoadOutcome::Missing | LoadOutcome::Discarded { .. } => Vec::new(),
        }
    }
}

/// JSON codec for the whole session collection over a `KeyValueStore`.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the stored collection.
    ///
    /// A value that is not valid JSON, or that decodes into sessions breaking
    /// an invariant, is removed from the store and reported as `Discarded`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend read itself fails.
    pub async fn load(&self) -> Result<LoadOutcome, StorageError> {
        let Some(raw) = self.kv.get(&self.key).await? else {
            debug!(key = %self.key, "no stored sessions");
            return Ok(LoadOutcome::Missing);
        };
        debug!(key = %self.key, bytes = raw.len(), "read stored sessions");

        match decode(&raw) {
            Ok(sessions) => Ok(LoadOutcome::Loaded(sessions)),
            Err(reason) => {
                warn!(key = %self.key, %reason, "discarding unreadable session data");
                if let Err(err) = self.kv.remove(&self.key).await {
                    warn!(
                        key = %self.key,
                        error = %err,
                        "failed to remove unreadable session data"
                    );
                }
                Ok(LoadOutcome::Discarded { reason })
            }
        }
    }

    /// Encode and write the full collection, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails, or the backend's
    /// error if the write fails.
    pub async fn save(&self, sessions: &[Session]) -> Result<(), StorageError> {
        let records: Vec<SessionRecord> =
            sessions.iter().map(SessionRecord::from_session).collect();
        let raw = serde_json::to_string(&records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.put(&self.key, &raw).await?;
        debug!(
            key = %self.key,
            sessions = sessions.len(),
            bytes = raw.len(),
            "wrote sessions"
        );
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Vec<Session>, String> {
    let records: Vec<SessionRecord> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    records
        .into_iter()
        .map(|record| record.into_session().map_err(|e| e.to_string()))
        .collect()
}
