mod category;
mod feedback;
mod ids;
mod score;
mod session;

pub use category::{Category, CategoryParseError};
pub use feedback::{Evaluation, Feedback};
pub use ids::{ParseIdError, SessionId};
pub use score::{Score, ScoreBand, ScoreError};
pub use session::{Completion, Session, SessionError, SessionProgress, SessionStatus};
