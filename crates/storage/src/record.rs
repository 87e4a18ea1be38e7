//! Persisted JSON shape of the session collection.
//!
//! Field names follow the stored format (`jobTitle`, `startTime`, `endTime`,
//! camelCase feedback keys) so collections written by earlier clients load as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use interview_core::Error as CoreError;
use interview_core::model::{
    Category, Completion, Feedback, Score, Session, SessionError, SessionId, SessionStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub general_feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_feedback: Vec<String>,
}

impl From<&Feedback> for FeedbackRecord {
    fn from(feedback: &Feedback) -> Self {
        Self {
            general_feedback: feedback.general_feedback.clone(),
            strengths: feedback.strengths.clone(),
            improvements: feedback.improvements.clone(),
            detailed_feedback: feedback.detailed_feedback.clone(),
        }
    }
}

impl From<FeedbackRecord> for Feedback {
    fn from(record: FeedbackRecord) -> Self {
        Self {
            general_feedback: record.general_feedback,
            strengths: record.strengths,
            improvements: record.improvements,
            detailed_feedback: record.detailed_feedback,
        }
    }
}

/// Persisted shape for a session.
///
/// Mirrors the domain `Session` with loosely typed fields; `into_session`
/// re-validates everything on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub category: String,
    #[serde(rename = "jobTitle")]
    pub role_title: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    #[serde(default)]
    pub feedback: Option<FeedbackRecord>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(rename = "startTime")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "endTime", default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

impl SessionRecord {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            category: session.category().as_str().to_owned(),
            role_title: session.role_title().to_owned(),
            questions: session.questions().to_vec(),
            answers: session.answers().to_vec(),
            feedback: session.feedback().map(FeedbackRecord::from),
            score: session.score().map(|s| i64::from(s.value())),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            status: session.status(),
        }
    }

    /// Convert the record back into a domain `Session`.
    ///
    /// # Errors
    ///
    /// Returns an `interview_core::Error` if any field fails validation, or if
    /// `status` disagrees with the presence of feedback, score and end time.
    pub fn into_session(self) -> Result<Session, CoreError> {
        let id: SessionId = self.id.parse()?;
        let category: Category = self.category.parse()?;

        let completion = match (self.status, self.feedback, self.score, self.ended_at) {
            (SessionStatus::Completed, Some(feedback), Some(score), Some(ended_at)) => {
                Some(Completion {
                    feedback: feedback.into(),
                    score: Score::try_from(score)?,
                    ended_at,
                })
            }
            (SessionStatus::InProgress, None, None, None) => None,
            (status, ..) => return Err(SessionError::StatusMismatch { status }.into()),
        };

        Ok(Session::from_persisted(
            id,
            category,
            &self.role_title,
            self.questions,
            self.answers,
            self.started_at,
            completion,
        )?)
    }
}
