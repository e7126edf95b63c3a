//! Export projections for results and statistics.
//!
//! Pure read-only renderings: field-for-field JSON, and a flattened tabular
//! format with one row per question outcome.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::results::QuizResult;
use crate::statistics::GlobalStats;

/// Format version stamped into statistics exports.
const EXPORT_VERSION: &str = "1.0";

/// Placeholder answer text for unanswered questions.
const NO_ANSWER: &str = "No answer";

#[derive(Serialize)]
struct StatsExport<'a> {
    #[serde(flatten)]
    stats: &'a GlobalStats,
    exported_at: DateTime<Utc>,
    version: &'static str,
}

/// Render the full statistics state as pretty JSON, stamped with the export
/// time and format version.
pub fn stats_to_json(stats: &GlobalStats) -> Result<String> {
    serde_json::to_string_pretty(&StatsExport {
        stats,
        exported_at: Utc::now(),
        version: EXPORT_VERSION,
    })
    .context("failed to serialize statistics export")
}

/// Render a result record as pretty JSON.
pub fn result_to_json(result: &QuizResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize result export")
}

/// Flatten a result into CSV: one row per question outcome.
///
/// Columns: question number (1-based), topic, user answer text, correct
/// answer text, correctness flag.
pub fn result_to_csv(result: &QuizResult) -> String {
    let mut out = String::from("Question,Topic,User Answer,Correct Answer,Is Correct\n");
    for q in &result.question_results {
        let user_answer = q
            .user_answer
            .and_then(|i| q.options.get(i))
            .map(String::as_str)
            .unwrap_or(NO_ANSWER);
        let correct_answer = q
            .options
            .get(q.correct_answer)
            .map(String::as_str)
            .unwrap_or_default();
        let row = [
            (q.question_index + 1).to_string(),
            csv_field(&q.topic),
            csv_field(user_answer),
            csv_field(correct_answer),
            if q.is_correct { "Yes" } else { "No" }.to_string(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Quote a field when it contains a separator, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
