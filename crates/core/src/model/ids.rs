use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SESSION_ID_PREFIX: &str = "interview_";

/// Unique identifier for an interview session.
///
/// Ids look like `interview_1700000000000`: the prefix followed by the
/// millisecond timestamp the session was started at. Stored ids are accepted
/// verbatim on load, so the numeric suffix is optional for rehydrated values.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Builds the id for a session started at `millis` since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{SESSION_ID_PREFIX}{millis}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of a generated id, if this id follows the generated format.
    #[must_use]
    pub fn sequence(&self) -> Option<i64> {
        self.0
            .strip_prefix(SESSION_ID_PREFIX)
            .and_then(|rest| rest.parse::<i64>().ok())
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid session id: {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for SessionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ParseIdError { raw: s.to_string() });
        }
        Ok(Self(trimmed.to_string()))
    }
}
