//! Global statistics state and the aggregation fold.
//!
//! [`StatsAggregator`] folds one quiz result at a time into a persistent
//! [`GlobalStats`] record through an injected [`StatsStore`]. Updates are
//! synchronous and single-shot: counters accumulate, the completed-test list
//! is append-only, and a fault anywhere abandons the mutation wholesale so
//! no partial state is ever committed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StatsError;
use crate::model::{GradeBand, Quiz};
use crate::results::{CompletedTest, QuizResult};
use crate::store::StatsStore;

/// A result passes when its score reaches this threshold.
pub const PASS_THRESHOLD: u32 = 70;

/// Milliseconds-per-question ceiling for the speed achievement.
const SPEED_MS_PER_QUESTION: u64 = 30_000;

/// Test-count milestones that earn an achievement.
const MILESTONES: [u32; 5] = [5, 10, 25, 50, 100];

/// Cumulative statistics for one statistics owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_tests: u32,
    pub total_questions: u32,
    pub total_correct_answers: u32,
    pub total_time_spent_ms: u64,
    /// Rounded mean of all completed-test scores. Recomputed on each update.
    pub average_score: u32,
    /// Rounded mean time per test in milliseconds. Recomputed on each update.
    pub average_time_ms: u64,
    /// Rounded `total_correct_answers / total_questions * 100`, 0 when no
    /// questions have been answered. Recomputed on each update.
    pub overall_accuracy: u32,
    pub completed_tests: Vec<CompletedTest>,
    pub topic_performance: BTreeMap<String, TopicPerformance>,
    pub difficulty_performance: BTreeMap<String, DifficultyPerformance>,
    pub streaks: Streaks,
    pub achievements: BTreeMap<String, Achievement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl Default for GlobalStats {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            total_tests: 0,
            total_questions: 0,
            total_correct_answers: 0,
            total_time_spent_ms: 0,
            average_score: 0,
            average_time_ms: 0,
            overall_accuracy: 0,
            completed_tests: Vec::new(),
            topic_performance: BTreeMap::new(),
            difficulty_performance: BTreeMap::new(),
            streaks: Streaks::default(),
            achievements: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            last_activity: None,
        }
    }
}

/// Per-topic answer counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TopicPerformance {
    pub total: u32,
    pub correct: u32,
}

impl TopicPerformance {
    /// Accuracy percentage over the answered questions.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total) * 100.0
        }
    }
}

/// Per-difficulty score accumulation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DifficultyPerformance {
    pub tests: u32,
    pub total_score: u32,
    pub best_score: u32,
    pub average_score: u32,
}

/// Consecutive-pass streak state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Streaks {
    pub current: u32,
    pub best: u32,
    pub last_test_passed: bool,
}

/// An earned achievement. Monotonic: once present, never cleared and never
/// re-stamped with a different `earned_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub earned: bool,
    pub earned_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
}

/// Folds quiz results into persistent global statistics.
pub struct StatsAggregator<S: StatsStore> {
    store: S,
}

impl<S: StatsStore> StatsAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The current state, default-empty when nothing has been persisted.
    pub fn current(&self) -> Result<GlobalStats, StatsError> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    /// Fold one result into the state, best-effort.
    ///
    /// A storage fault abandons the update, is logged, and the previously
    /// persisted state (or the default) is returned unchanged. An invalid
    /// result still fails fast on this channel too.
    pub fn update(&self, quiz: &Quiz, result: &QuizResult) -> Result<GlobalStats, StatsError> {
        match self.try_update(quiz, result) {
            Err(StatsError::Store(e)) => {
                tracing::warn!("statistics update abandoned: {e}");
                Ok(self.store.load().ok().flatten().unwrap_or_default())
            }
            other => other,
        }
    }

    /// Fold one result into the state, propagating storage faults.
    pub fn try_update(&self, quiz: &Quiz, result: &QuizResult) -> Result<GlobalStats, StatsError> {
        result.validate()?;
        let mut stats = self.store.load()?.unwrap_or_default();
        apply(&mut stats, quiz, result);
        self.store.save(&stats)?;
        Ok(stats)
    }

    /// Merge another statistics record into the persisted state.
    pub fn merge_in(&self, imported: &GlobalStats) -> Result<GlobalStats, StatsError> {
        let current = self.store.load()?.unwrap_or_default();
        let merged = merge(&current, imported);
        self.store.save(&merged)?;
        Ok(merged)
    }

    /// Replace the persisted state entirely.
    pub fn replace(&self, stats: &GlobalStats) -> Result<(), StatsError> {
        Ok(self.store.save(stats)?)
    }

    /// Clear all statistics.
    pub fn reset(&self) -> Result<(), StatsError> {
        Ok(self.store.reset()?)
    }
}

/// The ordered update fold. Step order matters: achievements are evaluated
/// against the previous update's derived fields, which are only recomputed
/// afterwards.
fn apply(stats: &mut GlobalStats, quiz: &Quiz, result: &QuizResult) {
    stats.total_tests += 1;
    stats.total_questions += result.total_questions;
    stats.total_correct_answers += result.correct_answers;
    stats.total_time_spent_ms += result.time_elapsed_ms;

    stats.completed_tests.push(CompletedTest {
        id: Uuid::new_v4(),
        title: quiz.title.clone(),
        completed_at: result.completed_at,
        score: result.score,
        grade: GradeBand::from_percentage(f64::from(result.score)).to_string(),
        time_elapsed_ms: result.time_elapsed_ms,
        total_questions: result.total_questions,
        correct_answers: result.correct_answers,
        topics: quiz.metadata.topics.clone(),
    });

    for outcome in &result.question_results {
        let perf = stats
            .topic_performance
            .entry(outcome.topic.clone())
            .or_default();
        perf.total += 1;
        if outcome.is_correct {
            perf.correct += 1;
        }
    }

    let difficulty = quiz.metadata.difficulty().unwrap_or("unknown");
    let diff = stats
        .difficulty_performance
        .entry(difficulty.to_string())
        .or_default();
    diff.tests += 1;
    diff.total_score += result.score;
    diff.best_score = diff.best_score.max(result.score);
    diff.average_score = round_ratio(diff.total_score, diff.tests);

    apply_streak(&mut stats.streaks, result.score);
    update_achievements(stats, result);
    recompute_derived(stats);

    stats.last_activity = Some(result.completed_at);
    stats.updated_at = Utc::now();
}

/// Streak transition for one result.
fn apply_streak(streaks: &mut Streaks, score: u32) {
    let passed = score >= PASS_THRESHOLD;
    if passed {
        if streaks.last_test_passed {
            streaks.current += 1;
        } else {
            streaks.current = 1;
        }
        streaks.best = streaks.best.max(streaks.current);
    } else {
        streaks.current = 0;
    }
    streaks.last_test_passed = passed;
}

/// Evaluate every achievement rule against the current intermediate state.
/// Each rule is idempotent: an already-earned key keeps its `earned_at`.
fn update_achievements(stats: &mut GlobalStats, result: &QuizResult) {
    let at = result.completed_at;

    if stats.total_tests == 1 {
        earn(
            &mut stats.achievements,
            "first_test",
            at,
            "First Test",
            "Completed your first test",
        );
    }

    if result.score == 100 {
        earn(
            &mut stats.achievements,
            "perfect_score",
            at,
            "Perfect Score",
            "Scored 100% on a test",
        );
    }

    for milestone in MILESTONES {
        if stats.total_tests == milestone {
            earn(
                &mut stats.achievements,
                &format!("tests_{milestone}"),
                at,
                &format!("{milestone} Tests"),
                &format!("Completed {milestone} tests"),
            );
        }
    }

    // average_score here is the previous update's value; the recompute
    // happens after achievement evaluation.
    if stats.average_score >= 85 && stats.total_tests >= 5 {
        earn(
            &mut stats.achievements,
            "high_average",
            at,
            "Academic Excellence",
            "Average of 85% or higher across at least 5 tests",
        );
    }

    if result.total_questions > 0
        && result.time_elapsed_ms / u64::from(result.total_questions) < SPEED_MS_PER_QUESTION
        && result.score >= 80
    {
        earn(
            &mut stats.achievements,
            "speed_demon",
            at,
            "Speed Run",
            "Fast test with a good score",
        );
    }

    let mastered: Vec<(String, String)> = stats
        .topic_performance
        .iter()
        .filter(|(_, perf)| perf.accuracy() >= 80.0 && perf.total >= 10)
        .map(|(topic, _)| (topic_slug(topic), topic.clone()))
        .collect();
    for (slug, topic) in mastered {
        earn(
            &mut stats.achievements,
            &format!("master_{slug}"),
            at,
            &format!("Topic Master: {topic}"),
            &format!("80% or higher in {topic} across at least 10 questions"),
        );
    }

    if stats.streaks.current >= 5 {
        earn(
            &mut stats.achievements,
            "consistency",
            at,
            "Consistency",
            "5 passing tests in a row",
        );
    }
}

fn earn(
    achievements: &mut BTreeMap<String, Achievement>,
    key: &str,
    at: DateTime<Utc>,
    title: &str,
    description: &str,
) {
    achievements
        .entry(key.to_string())
        .or_insert_with(|| Achievement {
            earned: true,
            earned_at: at,
            title: title.to_string(),
            description: description.to_string(),
        });
}

/// Normalized achievement key segment for a topic label.
fn topic_slug(topic: &str) -> String {
    topic
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Recompute the derived fields from the accumulated counters.
fn recompute_derived(stats: &mut GlobalStats) {
    stats.average_score = if stats.completed_tests.is_empty() {
        0
    } else {
        let sum: u32 = stats.completed_tests.iter().map(|t| t.score).sum();
        round_ratio(sum, stats.completed_tests.len() as u32)
    };
    stats.average_time_ms = if stats.total_tests == 0 {
        0
    } else {
        (stats.total_time_spent_ms as f64 / f64::from(stats.total_tests)).round() as u64
    };
    stats.overall_accuracy = if stats.total_questions == 0 {
        0
    } else {
        (f64::from(stats.total_correct_answers) / f64::from(stats.total_questions) * 100.0)
            .round() as u32
    };
}

fn round_ratio(numerator: u32, denominator: u32) -> u32 {
    (f64::from(numerator) / f64::from(denominator)).round() as u32
}

/// Merge two statistics records.
///
/// Counters sum, completed tests are unioned in completion order, per-key
/// maps combine additively, streaks are replayed over the unioned scores,
/// and achievements are recomputed over the merged state rather than trusted
/// from either side. Keys earned on either side survive the merge, with the
/// earliest `earned_at` kept.
pub fn merge(current: &GlobalStats, imported: &GlobalStats) -> GlobalStats {
    let mut merged = GlobalStats {
        total_tests: current.total_tests + imported.total_tests,
        total_questions: current.total_questions + imported.total_questions,
        total_correct_answers: current.total_correct_answers + imported.total_correct_answers,
        total_time_spent_ms: current.total_time_spent_ms + imported.total_time_spent_ms,
        created_at: current.created_at.min(imported.created_at),
        last_activity: current.last_activity.max(imported.last_activity),
        ..GlobalStats::default()
    };

    merged.completed_tests = current
        .completed_tests
        .iter()
        .chain(&imported.completed_tests)
        .cloned()
        .collect();
    merged.completed_tests.sort_by_key(|t| t.completed_at);

    for (topic, perf) in current
        .topic_performance
        .iter()
        .chain(&imported.topic_performance)
    {
        let entry = merged.topic_performance.entry(topic.clone()).or_default();
        entry.total += perf.total;
        entry.correct += perf.correct;
    }

    for (difficulty, perf) in current
        .difficulty_performance
        .iter()
        .chain(&imported.difficulty_performance)
    {
        let entry = merged
            .difficulty_performance
            .entry(difficulty.clone())
            .or_default();
        entry.tests += perf.tests;
        entry.total_score += perf.total_score;
        entry.best_score = entry.best_score.max(perf.best_score);
    }
    for perf in merged.difficulty_performance.values_mut() {
        perf.average_score = round_ratio(perf.total_score, perf.tests.max(1));
    }

    let consistency_at = replay_streaks(&mut merged);
    recompute_derived(&mut merged);
    merged.achievements = recompute_achievements(&merged, consistency_at);
    carry_over_earned(&mut merged.achievements, &current.achievements);
    carry_over_earned(&mut merged.achievements, &imported.achievements);

    merged
}

/// Replay the streak transitions over the unioned completed tests. Returns
/// the completion time of the test that first reached a 5-run, if any.
fn replay_streaks(stats: &mut GlobalStats) -> Option<DateTime<Utc>> {
    let mut streaks = Streaks::default();
    let mut consistency_at = None;
    for test in &stats.completed_tests {
        apply_streak(&mut streaks, test.score);
        if streaks.current >= 5 && consistency_at.is_none() {
            consistency_at = Some(test.completed_at);
        }
    }
    stats.streaks = streaks;
    consistency_at
}

/// Re-derive the achievement map from a merged state.
fn recompute_achievements(
    stats: &GlobalStats,
    consistency_at: Option<DateTime<Utc>>,
) -> BTreeMap<String, Achievement> {
    let mut achievements = BTreeMap::new();
    let tests = &stats.completed_tests;
    let last_at = tests.last().map(|t| t.completed_at);

    if let Some(first) = tests.first() {
        earn(
            &mut achievements,
            "first_test",
            first.completed_at,
            "First Test",
            "Completed your first test",
        );
    }

    if let Some(perfect) = tests.iter().find(|t| t.score == 100) {
        earn(
            &mut achievements,
            "perfect_score",
            perfect.completed_at,
            "Perfect Score",
            "Scored 100% on a test",
        );
    }

    for milestone in MILESTONES {
        if stats.total_tests >= milestone {
            let at = tests
                .get(milestone as usize - 1)
                .or(tests.last())
                .map(|t| t.completed_at);
            if let Some(at) = at {
                earn(
                    &mut achievements,
                    &format!("tests_{milestone}"),
                    at,
                    &format!("{milestone} Tests"),
                    &format!("Completed {milestone} tests"),
                );
            }
        }
    }

    if stats.average_score >= 85 && stats.total_tests >= 5 {
        if let Some(at) = last_at {
            earn(
                &mut achievements,
                "high_average",
                at,
                "Academic Excellence",
                "Average of 85% or higher across at least 5 tests",
            );
        }
    }

    if let Some(fast) = tests.iter().find(|t| {
        t.total_questions > 0
            && t.time_elapsed_ms / u64::from(t.total_questions) < SPEED_MS_PER_QUESTION
            && t.score >= 80
    }) {
        earn(
            &mut achievements,
            "speed_demon",
            fast.completed_at,
            "Speed Run",
            "Fast test with a good score",
        );
    }

    for (topic, perf) in &stats.topic_performance {
        if perf.accuracy() >= 80.0 && perf.total >= 10 {
            if let Some(at) = last_at {
                earn(
                    &mut achievements,
                    &format!("master_{}", topic_slug(topic)),
                    at,
                    &format!("Topic Master: {topic}"),
                    &format!("80% or higher in {topic} across at least 10 questions"),
                );
            }
        }
    }

    if let Some(at) = consistency_at {
        earn(
            &mut achievements,
            "consistency",
            at,
            "Consistency",
            "5 passing tests in a row",
        );
    }

    achievements
}

/// Preserve monotonicity across a merge: keys earned in `previous` survive,
/// and a key earned on both sides keeps the earliest `earned_at`.
fn carry_over_earned(
    achievements: &mut BTreeMap<String, Achievement>,
    previous: &BTreeMap<String, Achievement>,
) {
    for (key, old) in previous {
        if !old.earned {
            continue;
        }
        achievements
            .entry(key.clone())
            .and_modify(|a| a.earned_at = a.earned_at.min(old.earned_at))
            .or_insert_with(|| old.clone());
    }
}
