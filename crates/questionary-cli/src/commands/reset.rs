//! The `questionary reset` command.

use std::path::PathBuf;

use anyhow::Result;

use questionary_core::statistics::StatsAggregator;
use questionary_core::store::JsonFileStore;

use crate::config;

pub fn execute(stats: Option<PathBuf>, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to clear statistics without --yes");
    }

    let cfg = config::load()?;
    let stats_path = config::stats_path(stats, &cfg);

    let aggregator = StatsAggregator::new(JsonFileStore::new(&stats_path));
    aggregator.reset()?;

    println!("Statistics cleared.");
    Ok(())
}
