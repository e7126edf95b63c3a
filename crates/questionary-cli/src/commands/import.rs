//! The `questionary import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use questionary_core::statistics::{GlobalStats, StatsAggregator};
use questionary_core::store::JsonFileStore;

use crate::config;

pub fn execute(file: PathBuf, replace: bool, stats: Option<PathBuf>) -> Result<()> {
    let cfg = config::load()?;
    let stats_path = config::stats_path(stats, &cfg);

    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read statistics file: {}", file.display()))?;
    let imported: GlobalStats =
        serde_json::from_str(&content).context("failed to parse statistics JSON")?;

    if imported.total_tests == 0 && imported.completed_tests.is_empty() {
        anyhow::bail!("invalid statistics file: no tests recorded");
    }

    let imported_tests = imported.total_tests;
    let aggregator = StatsAggregator::new(JsonFileStore::new(&stats_path));
    let merged = if replace {
        aggregator.replace(&imported)?;
        imported
    } else {
        aggregator.merge_in(&imported)?
    };

    println!(
        "Imported {imported_tests} test(s); statistics now hold {} tests.",
        merged.total_tests
    );

    Ok(())
}
