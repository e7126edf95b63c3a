//! The `questionary stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use questionary_core::report;
use questionary_core::statistics::{GlobalStats, StatsAggregator};
use questionary_core::store::JsonFileStore;

use crate::config;

pub fn execute(stats: Option<PathBuf>, format: String) -> Result<()> {
    let cfg = config::load()?;
    let stats_path = config::stats_path(stats, &cfg);

    let aggregator = StatsAggregator::new(JsonFileStore::new(&stats_path));
    let stats = aggregator.current()?;

    match format.as_str() {
        "json" => {
            println!("{}", questionary_core::export::stats_to_json(&stats)?);
        }
        _ => print_text(&stats, cfg.views.trend_limit, cfg.views.achievements_limit),
    }

    Ok(())
}

fn print_text(stats: &GlobalStats, trend_limit: usize, achievements_limit: usize) {
    if stats.total_tests == 0 {
        println!("No tests recorded yet.");
        return;
    }

    println!(
        "Tests: {}  Questions: {}  Accuracy: {}%  Average score: {}",
        stats.total_tests, stats.total_questions, stats.overall_accuracy, stats.average_score
    );
    println!(
        "Streak: {} (best {})",
        stats.streaks.current, stats.streaks.best
    );

    let topics = report::topic_summary(stats);
    if !topics.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Topic", "Correct", "Total", "Accuracy", "Grade"]);
        for row in &topics {
            table.add_row(vec![
                row.topic.clone(),
                row.correct.to_string(),
                row.total.to_string(),
                format!("{}%", row.accuracy),
                row.grade.to_string(),
            ]);
        }
        println!("\nTopics:\n{table}");
    }

    let trend = report::performance_trend(stats, trend_limit);
    if !trend.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Date", "Title", "Score"]);
        for point in &trend {
            table.add_row(vec![
                point.position.to_string(),
                point.date.clone(),
                point.title.clone(),
                point.score.to_string(),
            ]);
        }
        println!("\nRecent tests:\n{table}");
    }

    let achievements = report::recent_achievements(stats, achievements_limit);
    if !achievements.is_empty() {
        println!("\nAchievements:");
        for a in &achievements {
            println!(
                "  {} — {} ({})",
                a.title,
                a.description,
                a.earned_at.format("%Y-%m-%d")
            );
        }
    }
}
