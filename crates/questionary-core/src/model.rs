//! Core data model for parsed quiz documents.
//!
//! These are the structured types the parser produces and the rest of the
//! system consumes: the quiz document, its questions and metadata, and the
//! validation report handed to import collaborators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed quiz document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quiz {
    /// Document title (`###` line). Empty if absent.
    #[serde(default)]
    pub title: String,
    /// Document subtitle (`##` line). Empty if absent.
    #[serde(default)]
    pub subtitle: String,
    /// Instructions line (`#` line). Empty if absent.
    #[serde(default)]
    pub instructions: String,
    /// Metadata directives (`@key: value` lines).
    #[serde(default)]
    pub metadata: Metadata,
    /// Questions in source order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Metadata directives accumulated from `@key: value` lines.
///
/// The `topics` directive is split on commas into an ordered sequence;
/// every other key is stored as an opaque trimmed string. A repeated key
/// overwrites the previous value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Ordered topic labels from the `@topics:` directive.
    #[serde(default)]
    pub topics: Vec<String>,
    /// All other directives, keyed by directive name.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Metadata {
    /// The `@difficulty:` directive, if present.
    pub fn difficulty(&self) -> Option<&str> {
        self.values.get("difficulty").map(String::as_str)
    }

    /// The `@duration:` directive, if present.
    pub fn duration(&self) -> Option<&str> {
        self.values.get("duration").map(String::as_str)
    }
}

/// A single quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question number as declared in the source (not necessarily contiguous).
    pub id: u32,
    /// Free-text topic label.
    pub topic: String,
    /// Question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// 0-based index of the correct option, if declared.
    #[serde(default)]
    pub correct: Option<usize>,
    /// Explanation shown after answering. Empty if absent.
    #[serde(default)]
    pub explanation: String,
}

/// Outcome of validating a questionary document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no errors were found.
    pub is_valid: bool,
    /// Human-readable error messages, in document order.
    pub errors: Vec<String>,
    /// The parsed document, populated only when valid.
    pub parsed: Option<Quiz>,
}

/// Qualitative grade band derived from an accuracy or score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeBand {
    Excellent,
    Good,
    Satisfactory,
    Pass,
    Fail,
}

impl GradeBand {
    /// Band a percentage value into the five-tier scale.
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            GradeBand::Excellent
        } else if pct >= 80.0 {
            GradeBand::Good
        } else if pct >= 70.0 {
            GradeBand::Satisfactory
        } else if pct >= 60.0 {
            GradeBand::Pass
        } else {
            GradeBand::Fail
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeBand::Excellent => write!(f, "Excellent"),
            GradeBand::Good => write!(f, "Good"),
            GradeBand::Satisfactory => write!(f, "Satisfactory"),
            GradeBand::Pass => write!(f, "Pass"),
            GradeBand::Fail => write!(f, "Fail"),
        }
    }
}
