//! The `questionary validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use questionary_core::model::ValidationReport;
use questionary_core::validator;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let mut total_errors = 0;

    if quiz_path.is_dir() {
        let files = collect_quiz_files(&quiz_path)?;
        if files.is_empty() {
            anyhow::bail!("no .quiz files found in {}", quiz_path.display());
        }
        for file in &files {
            match std::fs::read_to_string(file) {
                Ok(content) => {
                    total_errors += print_report(file, &validator::validate(&content));
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {}", file.display(), e);
                }
            }
        }
    } else {
        let content = std::fs::read_to_string(&quiz_path)
            .with_context(|| format!("failed to read quiz file: {}", quiz_path.display()))?;
        total_errors += print_report(&quiz_path, &validator::validate(&content));
    }

    if total_errors == 0 {
        println!("All quiz files valid.");
        Ok(())
    } else {
        anyhow::bail!("{total_errors} error(s) found")
    }
}

fn print_report(file: &Path, report: &ValidationReport) -> usize {
    match &report.parsed {
        Some(quiz) => println!(
            "{}: {} ({} questions)",
            file.display(),
            quiz.title,
            quiz.questions.len()
        ),
        None => println!("{}:", file.display()),
    }
    for error in &report.errors {
        println!("  ERROR: {error}");
    }
    report.errors.len()
}

/// Recursively collect `.quiz` files from a directory.
fn collect_quiz_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(collect_quiz_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "quiz") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
