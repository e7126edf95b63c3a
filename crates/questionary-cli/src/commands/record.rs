//! The `questionary record` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use questionary_core::results::QuizResult;
use questionary_core::statistics::StatsAggregator;
use questionary_core::store::JsonFileStore;
use questionary_core::validator;

use crate::config;

pub fn execute(quiz_path: PathBuf, result_path: PathBuf, stats: Option<PathBuf>) -> Result<()> {
    let cfg = config::load()?;
    let stats_path = config::stats_path(stats, &cfg);

    let content = std::fs::read_to_string(&quiz_path)
        .with_context(|| format!("failed to read quiz file: {}", quiz_path.display()))?;
    let report = validator::validate(&content);
    let Some(quiz) = report.parsed else {
        anyhow::bail!(
            "quiz file is not valid: {}",
            report.errors.join("; ")
        );
    };

    let result_json = std::fs::read_to_string(&result_path)
        .with_context(|| format!("failed to read result file: {}", result_path.display()))?;
    let result: QuizResult =
        serde_json::from_str(&result_json).context("failed to parse result JSON")?;

    let aggregator = StatsAggregator::new(JsonFileStore::new(&stats_path));
    let updated = aggregator.try_update(&quiz, &result)?;

    println!(
        "Recorded \"{}\": score {}, {}/{} correct.",
        quiz.title, result.score, result.correct_answers, result.total_questions
    );
    println!(
        "Totals: {} tests, average score {}, overall accuracy {}%.",
        updated.total_tests, updated.average_score, updated.overall_accuracy
    );

    Ok(())
}
