//! The `questionary export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use questionary_core::export;
use questionary_core::results::QuizResult;

pub fn execute(result_path: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let result_json = std::fs::read_to_string(&result_path)
        .with_context(|| format!("failed to read result file: {}", result_path.display()))?;
    let result: QuizResult =
        serde_json::from_str(&result_json).context("failed to parse result JSON")?;

    let rendered = match format.as_str() {
        "csv" => export::result_to_csv(&result),
        "json" => export::result_to_json(&result)?,
        other => anyhow::bail!("unknown export format: {other}"),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
