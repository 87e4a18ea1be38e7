use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score must be between 0 and 100, got {0}")]
    OutOfRange(i64),
}

/// Interview score as a whole percentage.
///
/// Always within `0..=100`; the only way to build one is through a checked
/// constructor, so engines and evaluators cannot emit anything outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(100);
    pub const MIN: Score = Score(0);

    /// Creates a score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` if `value` is above 100.
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        Self::try_from(i64::from(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn band(self) -> ScoreBand {
        ScoreBand::from_score(self)
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ScoreError::OutOfRange(value)),
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Coarse rating shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Great,
    Good,
    NeedsImprovement,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            90..=u8::MAX => ScoreBand::Excellent,
            80..=89 => ScoreBand::Great,
            70..=79 => ScoreBand::Good,
            _ => ScoreBand::NeedsImprovement,
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent!",
            ScoreBand::Great => "Great job!",
            ScoreBand::Good => "Good work!",
            ScoreBand::NeedsImprovement => "Needs improvement",
        }
    }
}
