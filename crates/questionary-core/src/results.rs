//! Quiz result records.
//!
//! A [`QuizResult`] is produced by an external quiz-session runner and
//! handed to the statistics aggregator. The aggregator validates the shape
//! at its boundary and fails fast rather than corrupting counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StatsError;

/// The outcome of one completed quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    /// Final score, 0–100.
    pub score: u32,
    /// When the session finished.
    pub completed_at: DateTime<Utc>,
    /// Wall-clock time spent, in milliseconds.
    pub time_elapsed_ms: u64,
    /// Number of questions presented.
    pub total_questions: u32,
    /// Number answered correctly.
    pub correct_answers: u32,
    /// Per-question outcomes, in presentation order.
    #[serde(default)]
    pub question_results: Vec<QuestionOutcome>,
}

/// The outcome of a single question within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 0-based index of the question within the session.
    pub question_index: usize,
    /// Topic label the question carried.
    pub topic: String,
    /// Whether the user's answer was correct.
    pub is_correct: bool,
    /// 0-based index of the chosen option, `None` when unanswered.
    #[serde(default)]
    pub user_answer: Option<usize>,
    /// 0-based index of the correct option.
    pub correct_answer: usize,
    /// The option texts, for export projections.
    #[serde(default)]
    pub options: Vec<String>,
}

impl QuizResult {
    /// Check the caller contract before the aggregator touches any state.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.score > 100 {
            return Err(StatsError::InvalidResult(format!(
                "score {} exceeds 100",
                self.score
            )));
        }
        if self.correct_answers > self.total_questions {
            return Err(StatsError::InvalidResult(format!(
                "correct answers {} exceed total questions {}",
                self.correct_answers, self.total_questions
            )));
        }
        if !self.question_results.is_empty()
            && self.question_results.len() != self.total_questions as usize
        {
            return Err(StatsError::InvalidResult(format!(
                "{} question outcomes for {} questions",
                self.question_results.len(),
                self.total_questions
            )));
        }
        Ok(())
    }
}

/// Summary of one completed test, appended to the global statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTest {
    /// Record identifier.
    pub id: Uuid,
    /// Quiz title at completion time.
    pub title: String,
    /// When the session finished.
    pub completed_at: DateTime<Utc>,
    /// Final score, 0–100.
    pub score: u32,
    /// Grade band label derived from the score.
    pub grade: String,
    /// Wall-clock time spent, in milliseconds.
    pub time_elapsed_ms: u64,
    /// Number of questions presented.
    pub total_questions: u32,
    /// Number answered correctly.
    pub correct_answers: u32,
    /// Topic labels from the quiz metadata.
    #[serde(default)]
    pub topics: Vec<String>,
}
