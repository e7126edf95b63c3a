//! Structural validation of questionary documents.
//!
//! Runs the parser and checks the result for completeness. All violations
//! are collected into the report; validation is never fatal.

use crate::model::ValidationReport;
use crate::parser;

/// Validate raw questionary text.
///
/// The parsed document is populated only when no errors were found. A
/// parser fault becomes a single-error invalid report rather than
/// propagating, so import collaborators can always present the error list.
pub fn validate(text: &str) -> ValidationReport {
    let parsed = match parser::parse(text) {
        Ok(quiz) => quiz,
        Err(e) => {
            return ValidationReport {
                is_valid: false,
                errors: vec![e.to_string()],
                parsed: None,
            }
        }
    };

    let mut errors = Vec::new();

    if parsed.title.is_empty() {
        errors.push("missing title (###)".to_string());
    }
    if parsed.subtitle.is_empty() {
        errors.push("missing subtitle (##)".to_string());
    }
    if parsed.instructions.is_empty() {
        errors.push("missing instructions (#)".to_string());
    }
    if parsed.questions.is_empty() {
        errors.push("no questions found".to_string());
    }

    for (index, q) in parsed.questions.iter().enumerate() {
        let n = index + 1;
        if q.topic.is_empty() {
            errors.push(format!("question {n}: missing topic"));
        }
        if q.question.is_empty() {
            errors.push(format!("question {n}: missing question text"));
        }
        if q.options.is_empty() {
            errors.push(format!("question {n}: no options provided"));
        }
        match q.correct {
            None => errors.push(format!("question {n}: no correct answer specified")),
            Some(correct) if correct >= q.options.len() => {
                errors.push(format!("question {n}: correct answer index out of range"));
            }
            Some(_) => {}
        }
    }

    let is_valid = errors.is_empty();
    ValidationReport {
        is_valid,
        errors,
        parsed: is_valid.then_some(parsed),
    }
}
