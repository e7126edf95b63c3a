//! Read-only reporting views over the global statistics.
//!
//! Views are pure projections recomputed on demand; nothing here mutates or
//! caches state.

use serde::{Deserialize, Serialize};

use crate::model::GradeBand;
use crate::statistics::{Achievement, GlobalStats};

/// Per-topic accuracy summary row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic: String,
    pub total: u32,
    pub correct: u32,
    /// Rounded accuracy percentage.
    pub accuracy: u32,
    /// Qualitative band for the accuracy.
    pub grade: GradeBand,
}

/// One point of the recent performance trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based position within the returned window.
    pub position: usize,
    pub score: u32,
    /// Completion date, `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
}

/// Per-topic accuracy with grade bands, sorted descending by accuracy.
pub fn topic_summary(stats: &GlobalStats) -> Vec<TopicSummary> {
    let mut rows: Vec<TopicSummary> = stats
        .topic_performance
        .iter()
        .map(|(topic, perf)| TopicSummary {
            topic: topic.clone(),
            total: perf.total,
            correct: perf.correct,
            accuracy: perf.accuracy().round() as u32,
            grade: GradeBand::from_percentage(perf.accuracy()),
        })
        .collect();
    rows.sort_by(|a, b| b.accuracy.cmp(&a.accuracy));
    rows
}

/// The last `limit` completed tests, in original order.
pub fn performance_trend(stats: &GlobalStats, limit: usize) -> Vec<TrendPoint> {
    let tests = &stats.completed_tests;
    let skip = tests.len().saturating_sub(limit);
    tests
        .iter()
        .skip(skip)
        .enumerate()
        .map(|(i, test)| TrendPoint {
            position: i + 1,
            score: test.score,
            date: test.completed_at.format("%Y-%m-%d").to_string(),
            title: test.title.clone(),
        })
        .collect()
}

/// Earned achievements, most recent first, capped to `limit`.
pub fn recent_achievements(stats: &GlobalStats, limit: usize) -> Vec<Achievement> {
    let mut earned: Vec<Achievement> = stats
        .achievements
        .values()
        .filter(|a| a.earned)
        .cloned()
        .collect();
    earned.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
    earned.truncate(limit);
    earned
}
