//! Feedback and score synthesis for completed sessions.
//!
//! The shipped `MockEvaluator` does not read answer content: it picks a
//! category template, flags blank answers, and draws the score at random. A
//! real evaluator receives the same inputs (category, role, each question and
//! its answer) and must return an `Evaluation` covering every question.

use interview_core::RandomSource;
use interview_core::model::{Category, Evaluation, Feedback, Score, Session};

/// Appended to the general feedback when any answer is blank.
pub const PENALTY_CLAUSE: &str =
    " However, some questions were not fully addressed, which affected the overall assessment.";

/// Prepended to the improvements when any answer is blank.
pub const ANSWER_ALL_IMPROVEMENT: &str = "Ensure all questions are answered completely";

/// Per-question feedback for a blank answer.
pub const NOT_ANSWERED: &str =
    "This question was not answered. Make sure to address all questions in an interview.";

/// Per-question feedback picked at random for answered questions.
pub const DETAIL_POOL: [&str; 5] = [
    "Good answer that covers the main points. Consider adding more specific examples.",
    "Well-structured response. You could elaborate more on the technical details.",
    "Clear explanation. Try to be more concise while maintaining clarity.",
    "Solid answer. Consider the interviewer's perspective and what they're looking to assess.",
    "Good start, but the answer could be more comprehensive. Think about edge cases.",
];

/// Inclusive bounds of the placeholder score.
pub const MOCK_SCORE_RANGE: (u8, u8) = (60, 100);

/// Fixed feedback text for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTemplate {
    pub general: &'static str,
    pub strengths: [&'static str; 3],
    pub improvements: [&'static str; 3],
}

const TECHNICAL: FeedbackTemplate = FeedbackTemplate {
    general: "You demonstrated good technical knowledge in several areas. Your explanations were generally clear and structured.",
    strengths: [
        "Strong understanding of core concepts",
        "Good problem-solving approach",
        "Clear communication of technical ideas",
    ],
    improvements: [
        "Consider providing more real-world examples",
        "Deepen knowledge in advanced topics",
        "Practice explaining complex concepts more concisely",
    ],
};

const BEHAVIORAL: FeedbackTemplate = FeedbackTemplate {
    general: "Your responses showed good self-awareness and ability to reflect on past experiences. You provided structured answers using the STAR method.",
    strengths: [
        "Good storytelling and situation framing",
        "Clear explanation of your specific actions",
        "Effective communication of outcomes",
    ],
    improvements: [
        "Quantify your achievements more specifically",
        "Include more reflection on what you learned",
        "Prepare more diverse examples for common questions",
    ],
};

const SYSTEM_DESIGN: FeedbackTemplate = FeedbackTemplate {
    general: "You demonstrated a solid approach to system design problems. Your solutions considered scalability and reliability aspects.",
    strengths: [
        "Good understanding of system architecture principles",
        "Methodical approach to breaking down problems",
        "Consideration of performance constraints",
    ],
    improvements: [
        "Deepen knowledge of distributed systems concepts",
        "Consider trade-offs more explicitly",
        "Practice drawing system diagrams more clearly",
    ],
};

impl FeedbackTemplate {
    #[must_use]
    pub fn for_category(category: Category) -> &'static FeedbackTemplate {
        match category {
            Category::Technical => &TECHNICAL,
            Category::Behavioral => &BEHAVIORAL,
            Category::SystemDesign => &SYSTEM_DESIGN,
        }
    }
}

/// Builds the feedback record for a session. Randomness only enters through
/// the per-question picks from `DETAIL_POOL`.
pub fn synthesize_feedback(session: &Session, random: &mut dyn RandomSource) -> Feedback {
    let template = FeedbackTemplate::for_category(session.category());

    let mut general_feedback = template.general.to_owned();
    let mut improvements: Vec<String> = template
        .improvements
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    if session.has_blank_answers() {
        general_feedback.push_str(PENALTY_CLAUSE);
        improvements.insert(0, ANSWER_ALL_IMPROVEMENT.to_owned());
    }

    let detailed_feedback = session
        .answers()
        .iter()
        .map(|answer| {
            if answer.trim().is_empty() {
                NOT_ANSWERED.to_owned()
            } else {
                let pick = random.next_index(DETAIL_POOL.len()) % DETAIL_POOL.len();
                DETAIL_POOL[pick].to_owned()
            }
        })
        .collect();

    Feedback {
        general_feedback,
        strengths: template.strengths.iter().map(|s| (*s).to_owned()).collect(),
        improvements,
        detailed_feedback,
    }
}

/// Placeholder score: uniform in `MOCK_SCORE_RANGE`, independent of the answers.
pub fn mock_score(random: &mut dyn RandomSource) -> Score {
    let (low, high) = MOCK_SCORE_RANGE;
    let value = random.next_in_range(low, high);
    Score::new(value).unwrap_or(Score::MAX)
}

/// Scoring backend used by the engine when a session completes.
///
/// Implementations must be pure apart from drawing from `random`, and must
/// return one detailed feedback entry per question.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, session: &Session, random: &mut dyn RandomSource) -> Evaluation;
}

/// Template feedback plus a random score in `[60, 100]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEvaluator;

impl Evaluator for MockEvaluator {
    fn evaluate(&self, session: &Session, random: &mut dyn RandomSource) -> Evaluation {
        let feedback = synthesize_feedback(session, random);
        let score = mock_score(random);
        Evaluation { feedback, score }
    }
}
