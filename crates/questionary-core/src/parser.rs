//! Questionary text-format parser.
//!
//! The format is line-oriented: header marker lines (`###`, `##`, `#`),
//! `@key: value` metadata directives, and numbered question blocks
//! (`N) [topic]//[text]`, `N.M) [option]`, `N.o) [answer]//[explanation]`).
//!
//! Parsing is a single left-to-right pass: each trimmed non-blank line is
//! classified into a [`Line`] tag by ordered prefix rules, then the tagged
//! sequence is folded with an explicit open-question accumulator. Lines that
//! match no rule are skipped; the parser is deliberately forgiving and only
//! fails when a rule evaluation itself faults.

use crate::error::ParseError;
use crate::model::{Metadata, Question, Quiz};

/// Standalone separator token, dropped entirely.
const SEPARATOR: &str = "---";

/// A classified source line.
///
/// Classification is independent of the fold so the grammar can be tested
/// in isolation from line-splitting and accumulator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A `---` separator, carries no data.
    Separator,
    /// `### title`
    Title(&'a str),
    /// `## subtitle`
    Subtitle(&'a str),
    /// `# instructions`
    Instructions(&'a str),
    /// `@key: value`
    Directive { key: &'a str, value: &'a str },
    /// `N) [topic]//[question text]`
    QuestionOpen {
        id: u32,
        topic: &'a str,
        question: &'a str,
    },
    /// A numeric-open line whose bracket payload did not match.
    MalformedOpen,
    /// `N.M) [option text]`
    Option(&'a str),
    /// `N.o) [answer]//[explanation]`; the answer is 1-based in source.
    CorrectAnswer {
        answer: u32,
        explanation: Option<&'a str>,
    },
    /// Anything else; skipped without error.
    Unrecognized,
}

/// Classify a single trimmed, non-blank line.
///
/// Prefix rules are ordered: the three-marker form is checked before the
/// two-marker form before the one-marker form, and the numeric-open form
/// before the option and correct-answer forms.
pub fn classify(line: &str) -> Result<Line<'_>, ParseError> {
    if line == SEPARATOR {
        return Ok(Line::Separator);
    }
    if let Some(rest) = line.strip_prefix("###") {
        return Ok(Line::Title(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix("##") {
        return Ok(Line::Subtitle(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix('#') {
        return Ok(Line::Instructions(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix('@') {
        // Split on the first colon; a directive without one is malformed.
        return Ok(match rest.split_once(':') {
            Some((key, value)) => Line::Directive {
                key: key.trim(),
                value: value.trim(),
            },
            None => Line::Unrecognized,
        });
    }

    let Some((digits, rest)) = leading_digits(line) else {
        return Ok(Line::Unrecognized);
    };

    if let Some(rest) = rest.strip_prefix(')') {
        // N) [topic]//[question text]
        let Some((topic, rest)) = bracketed(rest.trim_start()) else {
            return Ok(Line::MalformedOpen);
        };
        let Some((question, _)) = rest.strip_prefix("//").and_then(bracketed) else {
            return Ok(Line::MalformedOpen);
        };
        let id = parse_number(digits)?;
        return Ok(Line::QuestionOpen {
            id,
            topic,
            question,
        });
    }

    let Some(rest) = rest.strip_prefix('.') else {
        return Ok(Line::Unrecognized);
    };

    if let Some(rest) = rest.strip_prefix("o)") {
        // N.o) [answer]//[explanation]
        let Some((answer, rest)) = bracketed(rest.trim_start()) else {
            return Ok(Line::Unrecognized);
        };
        if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Line::Unrecognized);
        }
        let answer = parse_number(answer)?;
        let explanation = rest
            .strip_prefix("//")
            .and_then(bracketed)
            .map(|(text, _)| text);
        return Ok(Line::CorrectAnswer {
            answer,
            explanation,
        });
    }

    if let Some((_, rest)) = leading_digits(rest) {
        if let Some(rest) = rest.strip_prefix(')') {
            // N.M) [option text]
            if let Some((option, _)) = bracketed(rest.trim_start()) {
                return Ok(Line::Option(option));
            }
        }
    }

    Ok(Line::Unrecognized)
}

/// Parse raw questionary text into a [`Quiz`].
///
/// Never fails on malformed input: unclassifiable lines are skipped and a
/// question block that collects no options is dropped. The only error path
/// is an internal rule fault, reported once with the underlying message.
pub fn parse(text: &str) -> Result<Quiz, ParseError> {
    let mut quiz = Quiz::default();
    let mut current: Option<Question> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match classify(line)? {
            Line::Separator => {}
            Line::Title(t) => quiz.title = t.to_string(),
            Line::Subtitle(s) => quiz.subtitle = s.to_string(),
            Line::Instructions(i) => quiz.instructions = i.to_string(),
            Line::Directive { key, value } => {
                if key == "topics" {
                    quiz.metadata.topics =
                        value.split(',').map(|t| t.trim().to_string()).collect();
                } else {
                    quiz.metadata
                        .values
                        .insert(key.to_string(), value.to_string());
                }
            }
            Line::QuestionOpen {
                id,
                topic,
                question,
            } => {
                flush(&mut quiz, current.take());
                current = Some(Question {
                    id,
                    topic: topic.to_string(),
                    question: question.to_string(),
                    options: Vec::new(),
                    correct: None,
                    explanation: String::new(),
                });
            }
            Line::MalformedOpen => {
                tracing::debug!("skipping malformed question-open line: {line}");
                flush(&mut quiz, current.take());
            }
            Line::Option(option) => {
                if let Some(q) = current.as_mut() {
                    q.options.push(option.to_string());
                }
            }
            Line::CorrectAnswer {
                answer,
                explanation,
            } => {
                if let Some(q) = current.as_mut() {
                    // The answer is 1-based in source; `[0]` has no 0-based
                    // representation and the line is skipped.
                    match answer.checked_sub(1) {
                        Some(index) => {
                            q.correct = Some(index as usize);
                            q.explanation = explanation.unwrap_or_default().to_string();
                        }
                        None => tracing::debug!("skipping zero correct-answer index: {line}"),
                    }
                }
            }
            Line::Unrecognized => tracing::debug!("skipping unrecognized line: {line}"),
        }
    }

    flush(&mut quiz, current.take());
    Ok(quiz)
}

/// Push a pending question if it collected at least one option.
fn flush(quiz: &mut Quiz, question: Option<Question>) {
    if let Some(q) = question {
        if !q.options.is_empty() {
            quiz.questions.push(q);
        }
    }
}

/// Split off a leading run of ASCII digits. `None` if the line starts with
/// anything else.
fn leading_digits(s: &str) -> Option<(&str, &str)> {
    let end = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        None
    } else {
        Some(s.split_at(end))
    }
}

/// Match `[content]` at the start of `s`, where content is non-empty and
/// contains no `]`. Returns the content and the text after the closing
/// bracket.
fn bracketed(s: &str) -> Option<(&str, &str)> {
    let rest = s.strip_prefix('[')?;
    let close = rest.find(']')?;
    if close == 0 {
        return None;
    }
    Some((&rest[..close], &rest[close + 1..]))
}

/// Numeric field parse; an overflow is an internal rule fault, not a
/// malformed line.
fn parse_number(digits: &str) -> Result<u32, ParseError> {
    digits.parse().map_err(|e: std::num::ParseIntError| {
        ParseError::Internal {
            message: e.to_string(),
        }
    })
}

/// The canonical sample questionary document.
pub fn sample() -> &'static str {
    "---
### Sample Quiz Title
## Sample Subtitle
# Mark only one answer per question
@duration: 15min
@difficulty: medium
@topics: Topic1,Topic2
1) [Topic 1 - Sample Topic]//[What is the sample question?]
1.1) [First option]
1.2) [Second option]
1.3) [Third option]
1.4) [Fourth option]
1.o) [2]//[This is the explanation for the correct answer]
---
"
}
