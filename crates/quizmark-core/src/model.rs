//! Core data model types for quizmark.
//!
//! These are the fundamental types the evaluator operates on: the canonical
//! answer key for a question, the learner's submission, and the verdicts
//! produced for the UI. All of them are transient values constructed right
//! before an evaluation call and discarded after it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The outcome applied to a single answer option or numeric submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The option/value matches the answer key.
    Correct,
    /// The option/value contradicts the answer key.
    Incorrect,
    /// A correct pick inside an incomplete multi-select attempt.
    Partial,
    /// Not implicated by the attempt; rendered unstyled.
    Neutral,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect => write!(f, "incorrect"),
            Verdict::Partial => write!(f, "partial"),
            Verdict::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" => Ok(Verdict::Correct),
            "incorrect" | "wrong" => Ok(Verdict::Incorrect),
            "partial" => Ok(Verdict::Partial),
            "neutral" => Ok(Verdict::Neutral),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}

/// Inclusive acceptance bounds for a numeric answer.
///
/// When present on a key, the bounds supersede the exact-match tolerance:
/// any submitted value inside `[min, max]` is correct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Returns `true` if `value` falls within the inclusive bounds.
    /// Non-finite values never match.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && self.min <= value && value <= self.max
    }
}

/// A numeric answer payload: a single value, or one expected value per blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Scalar(f64),
    Sequence(Vec<f64>),
}

/// The canonical, normalized description of a question's correct answer.
///
/// Construction invariants (enforced by the `quizmark-bank` normalizer, not
/// re-checked here): `correct_index` and every member of `correct_indices`
/// lie in `[0, option_count)`, `option_count >= 1`, and `correct_indices`
/// is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnswerKey {
    /// Exactly one of `option_count` options is correct.
    #[serde(rename_all = "camelCase")]
    SingleChoice {
        option_count: usize,
        correct_index: usize,
    },
    /// A non-empty subset of the options is correct.
    #[serde(rename_all = "camelCase")]
    MultiChoice {
        option_count: usize,
        correct_indices: BTreeSet<usize>,
    },
    /// A value (or one value per blank), matched by tolerance or range.
    Numeric {
        expected: NumericValue,
        #[serde(default)]
        range: Option<NumericRange>,
    },
}

impl AnswerKey {
    /// Number of options for choice questions, `None` for numeric ones.
    pub fn option_count(&self) -> Option<usize> {
        match self {
            AnswerKey::SingleChoice { option_count, .. }
            | AnswerKey::MultiChoice { option_count, .. } => Some(*option_count),
            AnswerKey::Numeric { .. } => None,
        }
    }
}

/// A learner's answer, already shape-matched to the key's kind by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Submission {
    /// Chosen option index for a single-choice question.
    Choice(usize),
    /// Chosen option indices for a multi-choice question.
    Choices(BTreeSet<usize>),
    /// A single numeric value.
    Number(f64),
    /// One value per blank of a multi-value numeric question.
    Numbers(Vec<f64>),
}

/// The evaluation output consumed by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    /// One verdict per option, in option order (choice questions).
    PerOption(Vec<Verdict>),
    /// A single verdict for the whole submission (numeric questions).
    Overall(Verdict),
}
