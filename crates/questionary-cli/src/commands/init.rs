//! The `questionary init` command.

use anyhow::Result;

use crate::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    if std::path::Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE}");
    }

    std::fs::create_dir_all("quizzes")?;
    let sample_path = std::path::Path::new("quizzes/sample.quiz");
    if sample_path.exists() {
        println!("quizzes/sample.quiz already exists, skipping.");
    } else {
        std::fs::write(sample_path, questionary_core::parser::sample())?;
        println!("Created quizzes/sample.quiz");
    }

    println!("\nNext steps:");
    println!("  1. Run: questionary validate --quiz quizzes/sample.quiz");
    println!("  2. Take the quiz with your runner of choice");
    println!("  3. Run: questionary record --quiz quizzes/sample.quiz --result result.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# questionary configuration

[stats]
path = "stats.json"

[views]
trend_limit = 10
achievements_limit = 5
"#;
