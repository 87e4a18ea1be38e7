use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Category, Evaluation, Feedback, Score, SessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("role title cannot be empty")]
    EmptyRoleTitle,

    #[error("session must contain at least one question")]
    NoQuestions,

    #[error("question index {index} is out of range for {len} questions")]
    AnswerIndexOutOfRange { index: usize, len: usize },

    #[error("session already completed")]
    AlreadyCompleted,

    #[error("{answers} answers stored for {questions} questions")]
    AnswerCountMismatch { questions: usize, answers: usize },

    #[error("{entries} detailed feedback entries for {questions} questions")]
    DetailedFeedbackMismatch { questions: usize, entries: usize },

    #[error("ended_at is before started_at")]
    InvalidTimeRange,

    #[error("status {status:?} does not match the stored completion fields")]
    StatusMismatch { status: SessionStatus },
}

/// Lifecycle state of a session. There is no way back from `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

/// Everything a session gains when it is completed.
///
/// Kept as a single optional value on `Session` so feedback, score and end
/// time are always present together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub feedback: Feedback,
    pub score: Score,
    pub ended_at: DateTime<Utc>,
}

/// Aggregated view of answering progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// One interview practice attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    category: Category,
    role_title: String,
    questions: Vec<String>,
    answers: Vec<String>,
    started_at: DateTime<Utc>,
    completion: Option<Completion>,
}

impl Session {
    /// Start a new in-progress session with one empty answer per question.
    ///
    /// The role title is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyRoleTitle` if the title is blank and
    /// `SessionError::NoQuestions` if `questions` is empty.
    pub fn new(
        id: SessionId,
        category: Category,
        role_title: &str,
        questions: Vec<String>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let role_title = role_title.trim();
        if role_title.is_empty() {
            return Err(SessionError::EmptyRoleTitle);
        }
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        let answers = vec![String::new(); questions.len()];
        Ok(Self {
            id,
            category,
            role_title: role_title.to_owned(),
            questions,
            answers,
            started_at,
            completion: None,
        })
    }

    /// Rehydrate a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` when the stored values break a session invariant.
    pub fn from_persisted(
        id: SessionId,
        category: Category,
        role_title: &str,
        questions: Vec<String>,
        answers: Vec<String>,
        started_at: DateTime<Utc>,
        completion: Option<Completion>,
    ) -> Result<Self, SessionError> {
        if answers.len() != questions.len() {
            return Err(SessionError::AnswerCountMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        let mut session = Self::new(id, category, role_title, questions, started_at)?;
        session.answers = answers;
        if let Some(completion) = completion {
            session.check_completion(&completion.feedback, completion.ended_at)?;
            session.completion = Some(completion);
        }
        Ok(session)
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn role_title(&self) -> &str {
        &self.role_title
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.completion.as_ref().map(|c| &c.feedback)
    }

    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.completion.as_ref().map(|c| c.score)
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.completion.as_ref().map(|c| c.ended_at)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.completion.is_some() {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// True if at least one answer is blank after trimming.
    #[must_use]
    pub fn has_blank_answers(&self) -> bool {
        self.answers.iter().any(|a| a.trim().is_empty())
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| !a.trim().is_empty()).count()
    }

    /// Index to continue from: the first blank answer, or 0 when every question is answered.
    #[must_use]
    pub fn resume_index(&self) -> usize {
        self.answers
            .iter()
            .position(|a| a.trim().is_empty())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.question_count(),
            answered,
            remaining: self.question_count().saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }

    /// Overwrite the answer for the question at `index`. Content is stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyCompleted` for a completed session and
    /// `SessionError::AnswerIndexOutOfRange` for an index outside the question list.
    pub fn record_answer(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadyCompleted);
        }
        let len = self.answers.len();
        let slot = self
            .answers
            .get_mut(index)
            .ok_or(SessionError::AnswerIndexOutOfRange { index, len })?;
        *slot = text.into();
        Ok(())
    }

    /// Attach an evaluation and move the session to `Completed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyCompleted` if the session was completed before,
    /// `SessionError::DetailedFeedbackMismatch` if the evaluation does not cover every
    /// question, and `SessionError::InvalidTimeRange` if `ended_at` precedes the start.
    pub fn complete(
        &mut self,
        evaluation: Evaluation,
        ended_at: DateTime<Utc>,
    ) -> Result<&Completion, SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadyCompleted);
        }
        self.check_completion(&evaluation.feedback, ended_at)?;

        let Evaluation { feedback, score } = evaluation;
        Ok(&*self.completion.insert(Completion {
            feedback,
            score,
            ended_at,
        }))
    }

    fn check_completion(
        &self,
        feedback: &Feedback,
        ended_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if feedback.detailed_feedback.len() != self.questions.len() {
            return Err(SessionError::DetailedFeedbackMismatch {
                questions: self.questions.len(),
                entries: feedback.detailed_feedback.len(),
            });
        }
        if ended_at < self.started_at {
            return Err(SessionError::InvalidTimeRange);
        }
        Ok(())
    }
}
