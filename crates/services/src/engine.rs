use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use interview_core::model::{Category, Session, SessionError, SessionId};
use interview_core::{QuestionBank, RandomSource};
use storage::{KeyValueStore, LoadOutcome, SessionStore};

use crate::Clock;
use crate::access::{self, PresenceCheck};
use crate::config::EngineConfig;
use crate::dashboard::DashboardStats;
use crate::error::EngineError;
use crate::feedback::{Evaluator, MockEvaluator};
use crate::random::ThreadRandom;

/// What happened when the engine read its stored sessions at startup.
#[derive(Debug)]
pub enum LoadReport {
    /// Nothing was stored yet.
    Fresh,
    /// Stored sessions were restored.
    Restored { sessions: usize },
    /// Stored data was unreadable and has been dropped.
    Recovered { reason: String },
    /// The store could not be read; the engine runs in memory only.
    Unavailable(EngineError),
}

/// Collects the engine's collaborators before the first load.
pub struct EngineBuilder {
    config: EngineConfig,
    kv: Arc<dyn KeyValueStore>,
    clock: Clock,
    bank: QuestionBank,
    evaluator: Arc<dyn Evaluator>,
    random: Box<dyn RandomSource + Send + Sync>,
}

impl EngineBuilder {
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_question_bank(mut self, bank: QuestionBank) -> Self {
        self.bank = bank;
        self
    }

    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    #[must_use]
    pub fn with_random(mut self, random: impl RandomSource + Send + Sync + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    /// Load the stored collection and return a ready engine.
    ///
    /// Never fails: unreadable data is dropped and a failing store puts the
    /// engine in memory-only mode. Either case is described by the `LoadReport`.
    pub async fn open(self) -> (InterviewEngine, LoadReport) {
        let store = SessionStore::new(self.kv, self.config.storage_key.clone());

        let (sessions, degraded, report) = match store.load().await {
            Ok(LoadOutcome::Missing) => (Vec::new(), false, LoadReport::Fresh),
            Ok(LoadOutcome::Loaded(sessions)) => {
                let count = sessions.len();
                (sessions, false, LoadReport::Restored { sessions: count })
            }
            Ok(LoadOutcome::Discarded { reason }) => {
                (Vec::new(), false, LoadReport::Recovered { reason })
            }
            Err(err) => {
                warn!(
                    key = %store.key(),
                    error = %err,
                    "session storage unreadable; running in memory only"
                );
                (
                    Vec::new(),
                    true,
                    LoadReport::Unavailable(EngineError::Persistence(err)),
                )
            }
        };

        let last_id = sessions
            .iter()
            .filter_map(|s| s.id().sequence())
            .max()
            .unwrap_or(0);
        info!(
            key = %store.key(),
            sessions = sessions.len(),
            degraded,
            "interview engine ready"
        );

        let engine = InterviewEngine {
            config: self.config,
            clock: self.clock,
            bank: self.bank,
            evaluator: self.evaluator,
            random: self.random,
            store,
            sessions,
            last_id,
            degraded,
        };
        (engine, report)
    }
}

/// Owns the session collection and every transition on it.
///
/// All mutations go through `&mut self` and are written through to the store
/// before returning. After the first storage failure the engine keeps working
/// in memory and stops writing.
pub struct InterviewEngine {
    config: EngineConfig,
    clock: Clock,
    bank: QuestionBank,
    evaluator: Arc<dyn Evaluator>,
    random: Box<dyn RandomSource + Send + Sync>,
    store: SessionStore,
    sessions: Vec<Session>,
    last_id: i64,
    degraded: bool,
}

impl InterviewEngine {
    /// Start configuring an engine over `kv`. Defaults: system clock, built-in
    /// question bank, `MockEvaluator`, thread-local randomness.
    #[must_use]
    pub fn builder(config: EngineConfig, kv: Arc<dyn KeyValueStore>) -> EngineBuilder {
        EngineBuilder {
            config,
            kv,
            clock: Clock::system(),
            bank: QuestionBank::standard(),
            evaluator: Arc::new(MockEvaluator),
            random: Box::new(ThreadRandom),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn question_bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// True once a storage failure has switched the engine to memory-only mode.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Gate access on the caller's presence signal.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UserAbsent` when no user is present.
    pub fn for_present_user(
        &mut self,
        presence: &dyn PresenceCheck,
    ) -> Result<&mut Self, EngineError> {
        access::require_presence(presence)?;
        Ok(self)
    }

    /// Start a new session with freshly sampled questions.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` for a blank role title or a category
    /// with no questions. Returns `EngineError::Persistence` if the write fails;
    /// the session is still kept in memory in that case.
    pub async fn create(
        &mut self,
        category: Category,
        role_title: &str,
    ) -> Result<Session, EngineError> {
        if role_title.trim().is_empty() {
            return Err(EngineError::Validation(SessionError::EmptyRoleTitle));
        }

        let started_at = self.clock.now();
        let id_value = self.next_id_value(started_at);
        let count = self.config.questions_per_session.max(1);
        let questions = self.bank.sample(category, count, &mut *self.random);
        let session = Session::new(
            SessionId::from_millis(id_value),
            category,
            role_title,
            questions,
            started_at,
        )
        .map_err(EngineError::Validation)?;
        self.last_id = id_value;

        info!(
            session_id = %session.id(),
            category = %category,
            questions = session.question_count(),
            "interview session started"
        );
        self.sessions.insert(0, session.clone());
        self.persist().await?;
        Ok(session)
    }

    /// Overwrite the answer at `index`. The text is stored as given.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound`, `EngineError::IndexOutOfRange`,
    /// `EngineError::InvalidState` for a completed session, or
    /// `EngineError::Persistence` if the write fails.
    pub async fn record_answer(
        &mut self,
        id: &SessionId,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EngineError> {
        let session = self.find_mut(id)?;
        session
            .record_answer(index, text)
            .map_err(|err| EngineError::from_session(id, err))?;

        debug!(session_id = %id, index, "answer recorded");
        self.persist().await
    }

    /// Evaluate an in-progress session and mark it completed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound`, `EngineError::InvalidState` if the
    /// session was already completed (its result is left untouched),
    /// `EngineError::Validation` if the evaluator's output does not fit the
    /// session, or `EngineError::Persistence` if the write fails.
    pub async fn complete(&mut self, id: &SessionId) -> Result<Session, EngineError> {
        let pos = self.position(id)?;
        if self.sessions[pos].is_complete() {
            return Err(EngineError::InvalidState(id.clone()));
        }

        let evaluation = self
            .evaluator
            .evaluate(&self.sessions[pos], &mut *self.random);
        let session = &mut self.sessions[pos];
        let ended_at = self.clock.now().max(session.started_at());
        session
            .complete(evaluation, ended_at)
            .map_err(|err| EngineError::from_session(id, err))?;
        let completed = session.clone();

        info!(
            session_id = %id,
            score = completed.score().map(|s| s.value()),
            blank_answers = completed.has_blank_answers(),
            "interview session completed"
        );
        self.persist().await?;
        Ok(completed)
    }

    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// The session only while it can still be answered.
    #[must_use]
    pub fn resumable(&self, id: &SessionId) -> Option<&Session> {
        self.get(id).filter(|s| !s.is_complete())
    }

    /// Remove a session in any state. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Persistence` if the write fails.
    pub async fn delete(&mut self, id: &SessionId) -> Result<bool, EngineError> {
        let Some(pos) = self.sessions.iter().position(|s| s.id() == id) else {
            debug!(session_id = %id, "delete of unknown session ignored");
            return Ok(false);
        };
        self.sessions.remove(pos);

        info!(session_id = %id, "interview session deleted");
        self.persist().await?;
        Ok(true)
    }

    /// All sessions, most recently created first.
    #[must_use]
    pub fn list(&self) -> &[Session] {
        &self.sessions
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::from_sessions(&self.sessions)
    }

    fn next_id_value(&self, started_at: DateTime<Utc>) -> i64 {
        started_at
            .timestamp_millis()
            .max(self.last_id.saturating_add(1))
    }

    fn position(&self, id: &SessionId) -> Result<usize, EngineError> {
        self.sessions
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| EngineError::NotFound(id.clone()))
    }

    fn find_mut(&mut self, id: &SessionId) -> Result<&mut Session, EngineError> {
        let pos = self.position(id)?;
        Ok(&mut self.sessions[pos])
    }

    async fn persist(&mut self) -> Result<(), EngineError> {
        if self.degraded {
            return Ok(());
        }
        if let Err(err) = self.store.save(&self.sessions).await {
            self.degraded = true;
            warn!(
                key = %self.store.key(),
                error = %err,
                "session storage failed; continuing in memory only"
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl fmt::Debug for InterviewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterviewEngine")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("sessions_len", &self.sessions.len())
            .field("last_id", &self.last_id)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}
