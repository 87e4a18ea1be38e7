//! Aggregate figures over the session collection.

use chrono::{DateTime, Utc};

use interview_core::model::{Category, Score, Session, SessionId, SessionStatus};

/// Number of sessions shown as recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub technical: usize,
    pub behavioral: usize,
    pub system_design: usize,
}

impl CategoryBreakdown {
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Technical => self.technical,
            Category::Behavioral => self.behavioral,
            Category::SystemDesign => self.system_design,
        }
    }

    fn bump(&mut self, category: Category) {
        match category {
            Category::Technical => self.technical += 1,
            Category::Behavioral => self.behavioral += 1,
            Category::SystemDesign => self.system_design += 1,
        }
    }
}

/// One row of the recent activity list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSession {
    pub id: SessionId,
    pub category: Category,
    pub role_title: String,
    pub started_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub score: Option<Score>,
}

impl RecentSession {
    fn from_session(session: &Session) -> Self {
        Self {
            id: session.id().clone(),
            category: session.category(),
            role_title: session.role_title().to_owned(),
            started_at: session.started_at(),
            status: session.status(),
            score: session.score(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    /// Mean score of completed sessions, rounded half up. Zero when none are completed.
    pub average_score: u8,
    pub categories: CategoryBreakdown,
    /// Newest first by start time, at most `RECENT_ACTIVITY_LIMIT` entries.
    pub recent: Vec<RecentSession>,
}

impl DashboardStats {
    #[must_use]
    pub fn from_sessions(sessions: &[Session]) -> Self {
        let mut categories = CategoryBreakdown::default();
        let mut completed = 0_u32;
        let mut score_sum = 0_u32;

        for session in sessions {
            categories.bump(session.category());
            if let Some(score) = session.score() {
                completed += 1;
                score_sum += u32::from(score.value());
            }
        }

        let average_score = if completed == 0 {
            0
        } else {
            let rounded = (2 * score_sum + completed) / (2 * completed);
            u8::try_from(rounded).unwrap_or(Score::MAX.value())
        };

        let mut ordered: Vec<&Session> = sessions.iter().collect();
        ordered.sort_by(|a, b| b.started_at().cmp(&a.started_at()));
        let recent = ordered
            .into_iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(RecentSession::from_session)
            .collect();

        Self {
            total: sessions.len(),
            completed: completed as usize,
            average_score,
            categories,
            recent,
        }
    }
}
