use crate::model::Score;

/// Synthesized assessment attached to a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub general_feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// One entry per question, in question order.
    pub detailed_feedback: Vec<String>,
}

/// Output of an evaluator: the feedback record plus the score it justifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub feedback: Feedback,
    pub score: Score,
}
