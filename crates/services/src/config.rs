use std::time::Duration;

use storage::DEFAULT_SESSIONS_KEY;

use crate::error::ConfigError;

pub const STORAGE_KEY_VAR: &str = "INTERVIEW_STORAGE_KEY";
pub const QUESTION_COUNT_VAR: &str = "INTERVIEW_QUESTION_COUNT";
pub const QUESTION_SECONDS_VAR: &str = "INTERVIEW_QUESTION_SECONDS";

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Key the session collection is stored under.
    pub storage_key: String,
    /// Questions sampled for each new session.
    pub questions_per_session: usize,
    /// Countdown shown per question. The engine never enforces it.
    pub question_time_limit: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_SESSIONS_KEY.to_owned(),
            questions_per_session: 5,
            question_time_limit: Duration::from_secs(180),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `INTERVIEW_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(STORAGE_KEY_VAR) {
            let key = raw.trim();
            if key.is_empty() {
                return Err(ConfigError::Empty {
                    var: STORAGE_KEY_VAR,
                });
            }
            config.storage_key = key.to_owned();
        }
        if let Some(raw) = lookup(QUESTION_COUNT_VAR) {
            config.questions_per_session = positive(QUESTION_COUNT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(QUESTION_SECONDS_VAR) {
            let secs = positive(QUESTION_SECONDS_VAR, &raw)?;
            config.question_time_limit =
                Duration::from_secs(u64::try_from(secs).unwrap_or(u64::MAX));
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Zero is raised to one so a session always has a question.
    #[must_use]
    pub fn with_questions_per_session(mut self, count: usize) -> Self {
        self.questions_per_session = count.max(1);
        self
    }
}

fn positive(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            var,
            raw: raw.to_owned(),
        }),
    }
}
