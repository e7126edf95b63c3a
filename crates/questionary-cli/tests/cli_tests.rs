//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn questionary() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("questionary").unwrap()
}

const VALID_QUIZ: &str = "### Networking Basics
## Layer by layer
# Mark only one answer per question
@duration: 10min
@difficulty: easy
@topics: Transport,Routing
1) [Transport]//[Which protocol is connection-oriented?]
1.1) [UDP]
1.2) [TCP]
1.o) [2]//[TCP establishes a connection before sending data]
2) [Routing]//[What does TTL limit?]
2.1) [Hop count]
2.2) [Packet size]
2.o) [1]
";

const INVALID_QUIZ: &str = "### Title only
1) [A]//[Q?]
1.1) [opt]
";

const RESULT_JSON: &str = r#"{
  "score": 100,
  "completed_at": "2025-06-01T12:00:00Z",
  "time_elapsed_ms": 45000,
  "total_questions": 2,
  "correct_answers": 2,
  "question_results": [
    {
      "question_index": 0,
      "topic": "Transport",
      "is_correct": true,
      "user_answer": 1,
      "correct_answer": 1,
      "options": ["UDP", "TCP"]
    },
    {
      "question_index": 1,
      "topic": "Routing",
      "is_correct": true,
      "user_answer": 0,
      "correct_answer": 0,
      "options": ["Hop count", "Packet size"]
    }
  ]
}"#;

#[test]
fn validate_valid_quiz() {
    let dir = TempDir::new().unwrap();
    let quiz = dir.path().join("net.quiz");
    std::fs::write(&quiz, VALID_QUIZ).unwrap();

    questionary()
        .arg("validate")
        .arg("--quiz")
        .arg(&quiz)
        .assert()
        .success()
        .stdout(predicate::str::contains("Networking Basics"))
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("All quiz files valid"));
}

#[test]
fn validate_invalid_quiz_fails() {
    let dir = TempDir::new().unwrap();
    let quiz = dir.path().join("bad.quiz");
    std::fs::write(&quiz, INVALID_QUIZ).unwrap();

    questionary()
        .arg("validate")
        .arg("--quiz")
        .arg(&quiz)
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing subtitle (##)"))
        .stdout(predicate::str::contains("no correct answer specified"))
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_directory_scans_quiz_files() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("a.quiz"), VALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("nested/b.quiz"), VALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("ignored.txt"), "not a quiz").unwrap();

    questionary()
        .arg("validate")
        .arg("--quiz")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.quiz"))
        .stdout(predicate::str::contains("b.quiz"))
        .stdout(predicate::str::contains("ignored.txt").not());
}

#[test]
fn validate_nonexistent_file() {
    questionary()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.quiz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created questionary.toml"))
        .stdout(predicate::str::contains("Created quizzes/sample.quiz"));

    assert!(dir.path().join("questionary.toml").exists());
    assert!(dir.path().join("quizzes/sample.quiz").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    questionary()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_sample_validates_cleanly() {
    let dir = TempDir::new().unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    questionary()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg("quizzes/sample.quiz")
        .assert()
        .success()
        .stdout(predicate::str::contains("All quiz files valid"));
}

#[test]
fn record_updates_statistics() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("net.quiz"), VALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("result.json"), RESULT_JSON).unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("record")
        .arg("--quiz")
        .arg("net.quiz")
        .arg("--result")
        .arg("result.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded \"Networking Basics\""))
        .stdout(predicate::str::contains("1 tests"));

    assert!(dir.path().join("stats.json").exists());
}

#[test]
fn record_rejects_invalid_quiz() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.quiz"), INVALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("result.json"), RESULT_JSON).unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("record")
        .arg("--quiz")
        .arg("bad.quiz")
        .arg("--result")
        .arg("result.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid"));
}

#[test]
fn record_rejects_malformed_result() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("net.quiz"), VALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("result.json"), "{ not json").unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("record")
        .arg("--quiz")
        .arg("net.quiz")
        .arg("--result")
        .arg("result.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("result JSON"));
}

#[test]
fn stats_empty_state() {
    let dir = TempDir::new().unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tests recorded yet"));
}

#[test]
fn stats_json_output_parses() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("net.quiz"), VALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("result.json"), RESULT_JSON).unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("record")
        .arg("--quiz")
        .arg("net.quiz")
        .arg("--result")
        .arg("result.json")
        .assert()
        .success();

    let output = questionary()
        .current_dir(dir.path())
        .arg("stats")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["total_tests"], 1);
    assert_eq!(value["overall_accuracy"], 100);
    assert_eq!(value["version"], "1.0");
}

#[test]
fn export_csv_flattens_outcomes() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("result.json"), RESULT_JSON).unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("export")
        .arg("--result")
        .arg("result.json")
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Question,Topic,User Answer,Correct Answer,Is Correct",
        ))
        .stdout(predicate::str::contains("1,Transport,TCP,TCP,Yes"));
}

#[test]
fn export_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("result.json"), RESULT_JSON).unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("export")
        .arg("--result")
        .arg("result.json")
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();

    questionary()
        .current_dir(dir.path())
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    questionary()
        .current_dir(dir.path())
        .arg("reset")
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Statistics cleared"));
}

#[test]
fn help_output() {
    questionary()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Quiz format parser and statistics tool",
        ));
}

#[test]
fn version_output() {
    questionary()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("questionary"));
}
