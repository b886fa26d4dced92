//! Question-document normalization.
//!
//! Raw documents were written by three different pages over time, so the
//! same concept hides under several field names (`answer` / `correctAnswer`
//! / `answerIndex`, `options` / `choices`, ...) and older documents store
//! 1-based indices behind an `indexBase` field. This module folds all of
//! that into the canonical [`AnswerKey`], enforcing its construction
//! invariants, so the evaluator never validates anything.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use quizmark_core::model::{AnswerKey, NumericRange, NumericValue};

use crate::error::BankError;

/// A question document as fetched, before normalization.
///
/// Every answer-bearing field is optional because no single page writes all
/// of them; `normalize` decides which combination is required once the kind
/// is resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    /// Document id; the loader falls back to the array position.
    #[serde(default)]
    pub id: Option<String>,
    /// Declared kind. Older documents omit it and rely on answer shape.
    #[serde(default, alias = "type", alias = "questionType")]
    pub kind: Option<String>,
    /// Option texts. Only the count matters at this layer.
    #[serde(default, alias = "choices")]
    pub options: Option<Vec<Value>>,
    /// Explicit option count, for documents that store options elsewhere.
    #[serde(default, alias = "numOptions")]
    pub option_count: Option<usize>,
    /// Single correct answer: an index for choice questions, a number or
    /// numeric string (or array of them) for numeric questions.
    #[serde(default, alias = "correctAnswer", alias = "answerIndex")]
    pub answer: Option<Value>,
    /// Correct indices for multi-select questions.
    #[serde(default, alias = "correctIndices", alias = "answerIndices")]
    pub correct_answers: Option<Vec<Value>>,
    /// Base the stored indices count from: 0 (default) or 1 (legacy pages).
    #[serde(default)]
    pub index_base: u32,
    #[serde(default, alias = "min")]
    pub range_min: Option<f64>,
    #[serde(default, alias = "max")]
    pub range_max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Single,
    Multi,
    Numeric,
}

/// Parse a user-entered numeric submission.
///
/// This is the guard the evaluator requires of its callers: empty,
/// unparsable, or non-finite input is rejected here so the evaluator never
/// sees NaN from the input path.
pub fn parse_numeric_submission(text: &str) -> Result<f64, BankError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BankError::UnparsableNumber(text.to_string()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| BankError::UnparsableNumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(BankError::UnparsableNumber(text.to_string()));
    }
    Ok(value)
}

/// Normalize a raw document into a canonical answer key.
pub fn normalize(raw: &RawQuestion) -> Result<AnswerKey, BankError> {
    match resolve_kind(raw)? {
        Kind::Single => normalize_single(raw),
        Kind::Multi => normalize_multi(raw),
        Kind::Numeric => normalize_numeric(raw),
    }
}

fn resolve_kind(raw: &RawQuestion) -> Result<Kind, BankError> {
    if let Some(kind) = &raw.kind {
        let folded = kind.to_lowercase().replace(['-', '_'], "");
        return match folded.as_str() {
            "singlechoice" | "single" | "choice" => Ok(Kind::Single),
            "multichoice" | "multiplechoice" | "multi" | "multiple" => Ok(Kind::Multi),
            "numeric" | "number" | "value" => Ok(Kind::Numeric),
            _ => Err(BankError::UnknownKind(kind.clone())),
        };
    }

    // Undeclared kind: infer from which answer fields the page wrote.
    if raw.correct_answers.is_some() {
        Ok(Kind::Multi)
    } else if raw.options.is_some() || raw.option_count.is_some() {
        Ok(Kind::Single)
    } else if raw.answer.is_some() {
        Ok(Kind::Numeric)
    } else {
        Err(BankError::MissingField("kind"))
    }
}

fn resolve_option_count(raw: &RawQuestion) -> Result<usize, BankError> {
    let count = raw
        .option_count
        .or_else(|| raw.options.as_ref().map(Vec::len))
        .ok_or(BankError::MissingField("options"))?;
    if count == 0 {
        return Err(BankError::InvalidOptionCount(0));
    }
    Ok(count)
}

fn normalize_single(raw: &RawQuestion) -> Result<AnswerKey, BankError> {
    let option_count = resolve_option_count(raw)?;
    let answer = raw.answer.as_ref().ok_or(BankError::MissingField("answer"))?;
    let correct_index = shift_index(raw_index(answer)?, raw.index_base, option_count)?;
    Ok(AnswerKey::SingleChoice {
        option_count,
        correct_index,
    })
}

fn normalize_multi(raw: &RawQuestion) -> Result<AnswerKey, BankError> {
    let option_count = resolve_option_count(raw)?;
    let answers = raw
        .correct_answers
        .as_ref()
        .ok_or(BankError::MissingField("correctAnswers"))?;
    if answers.is_empty() {
        return Err(BankError::EmptyCorrectSet);
    }
    let correct_indices = answers
        .iter()
        .map(|value| shift_index(raw_index(value)?, raw.index_base, option_count))
        .collect::<Result<BTreeSet<usize>, BankError>>()?;
    Ok(AnswerKey::MultiChoice {
        option_count,
        correct_indices,
    })
}

fn normalize_numeric(raw: &RawQuestion) -> Result<AnswerKey, BankError> {
    let answer = raw.answer.as_ref().ok_or(BankError::MissingField("answer"))?;
    let expected = numeric_value(answer)?;
    let range = match (raw.range_min, raw.range_max) {
        (Some(min), Some(max)) => {
            if min > max {
                return Err(BankError::InvertedRange { min, max });
            }
            Some(NumericRange { min, max })
        }
        (None, None) => None,
        (Some(_), None) => return Err(BankError::MissingField("rangeMax")),
        (None, Some(_)) => return Err(BankError::MissingField("rangeMin")),
    };
    Ok(AnswerKey::Numeric { expected, range })
}

/// Extract an answer index from a JSON value; legacy documents store
/// indices as strings.
fn raw_index(value: &Value) -> Result<i64, BankError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| BankError::UnparsableNumber(number.to_string())),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| BankError::UnparsableNumber(text.clone())),
        other => Err(BankError::UnparsableNumber(other.to_string())),
    }
}

fn shift_index(index: i64, base: u32, option_count: usize) -> Result<usize, BankError> {
    let shifted = index - i64::from(base);
    if shifted < 0 || shifted as usize >= option_count {
        return Err(BankError::IndexOutOfRange {
            index,
            option_count,
        });
    }
    Ok(shifted as usize)
}

fn numeric_scalar(value: &Value) -> Result<f64, BankError> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| BankError::UnparsableNumber(number.to_string())),
        Value::String(text) => parse_numeric_submission(text),
        other => Err(BankError::UnparsableNumber(other.to_string())),
    }
}

fn numeric_value(value: &Value) -> Result<NumericValue, BankError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(numeric_scalar)
            .collect::<Result<Vec<f64>, BankError>>()
            .map(NumericValue::Sequence),
        scalar => numeric_scalar(scalar).map(NumericValue::Scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawQuestion {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn single_choice_zero_based() {
        let key = normalize(&raw(
            r#"{"kind": "single-choice", "options": ["a", "b", "c", "d"], "answer": 2}"#,
        ))
        .unwrap();
        assert_eq!(
            key,
            AnswerKey::SingleChoice {
                option_count: 4,
                correct_index: 2
            }
        );
    }

    #[test]
    fn single_choice_one_based_legacy() {
        let key = normalize(&raw(
            r#"{"type": "single", "optionCount": 4, "correctAnswer": 3, "indexBase": 1}"#,
        ))
        .unwrap();
        assert_eq!(
            key,
            AnswerKey::SingleChoice {
                option_count: 4,
                correct_index: 2
            }
        );
    }

    #[test]
    fn single_choice_index_as_string() {
        let key = normalize(&raw(
            r#"{"kind": "choice", "numOptions": 5, "answerIndex": " 4 "}"#,
        ))
        .unwrap();
        assert_eq!(
            key,
            AnswerKey::SingleChoice {
                option_count: 5,
                correct_index: 4
            }
        );
    }

    #[test]
    fn multi_choice_with_aliases() {
        let key = normalize(&raw(
            r#"{"questionType": "multipleChoice", "choices": ["a", "b", "c", "d"],
                "correctIndices": [1, 3, 1]}"#,
        ))
        .unwrap();
        assert_eq!(
            key,
            AnswerKey::MultiChoice {
                option_count: 4,
                correct_indices: [1, 3].into_iter().collect()
            }
        );
    }

    #[test]
    fn multi_choice_inferred_from_fields() {
        let key = normalize(&raw(
            r#"{"options": ["a", "b", "c"], "correctAnswers": [0, 2]}"#,
        ))
        .unwrap();
        assert!(matches!(key, AnswerKey::MultiChoice { option_count: 3, .. }));
    }

    #[test]
    fn numeric_scalar_and_string_forms() {
        let key = normalize(&raw(r#"{"kind": "numeric", "answer": 9.81}"#)).unwrap();
        assert_eq!(
            key,
            AnswerKey::Numeric {
                expected: NumericValue::Scalar(9.81),
                range: None
            }
        );

        let key = normalize(&raw(r#"{"kind": "numeric", "answer": "9.81"}"#)).unwrap();
        assert_eq!(
            key,
            AnswerKey::Numeric {
                expected: NumericValue::Scalar(9.81),
                range: None
            }
        );
    }

    #[test]
    fn numeric_sequence_and_range() {
        let key = normalize(&raw(
            r#"{"kind": "numeric", "answer": [0.2, 0.98], "rangeMin": 0, "rangeMax": 1}"#,
        ))
        .unwrap();
        assert_eq!(
            key,
            AnswerKey::Numeric {
                expected: NumericValue::Sequence(vec![0.2, 0.98]),
                range: Some(NumericRange { min: 0.0, max: 1.0 })
            }
        );
    }

    #[test]
    fn numeric_inferred_from_bare_answer() {
        let key = normalize(&raw(r#"{"answer": 42}"#)).unwrap();
        assert!(matches!(key, AnswerKey::Numeric { .. }));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = normalize(&raw(r#"{"kind": "essay", "answer": "free text"}"#)).unwrap_err();
        assert!(matches!(err, BankError::UnknownKind(_)));
        assert!(!err.is_answer_error());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = normalize(&raw(
            r#"{"kind": "single", "optionCount": 4, "answer": 4}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            BankError::IndexOutOfRange {
                index: 4,
                option_count: 4
            }
        ));
        assert!(err.is_answer_error());
    }

    #[test]
    fn one_based_zero_index_is_rejected() {
        // With indexBase 1, a stored 0 shifts below the range.
        let err = normalize(&raw(
            r#"{"kind": "single", "optionCount": 4, "answer": 0, "indexBase": 1}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, BankError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn empty_correct_set_is_rejected() {
        let err = normalize(&raw(
            r#"{"kind": "multi", "optionCount": 4, "correctAnswers": []}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, BankError::EmptyCorrectSet));
    }

    #[test]
    fn zero_options_is_rejected() {
        let err = normalize(&raw(
            r#"{"kind": "single", "options": [], "answer": 0}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidOptionCount(0)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = normalize(&raw(
            r#"{"kind": "numeric", "answer": 5, "rangeMin": 10, "rangeMax": 1}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, BankError::InvertedRange { .. }));
    }

    #[test]
    fn half_open_range_is_rejected() {
        let err = normalize(&raw(
            r#"{"kind": "numeric", "answer": 5, "rangeMin": 0}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, BankError::MissingField("rangeMax")));
    }

    #[test]
    fn submission_parsing_guards_the_evaluator() {
        assert_eq!(parse_numeric_submission(" 0.205 ").unwrap(), 0.205);
        assert!(parse_numeric_submission("").is_err());
        assert!(parse_numeric_submission("  ").is_err());
        assert!(parse_numeric_submission("12,5").is_err());
        assert!(parse_numeric_submission("NaN").is_err());
        assert!(parse_numeric_submission("inf").is_err());
    }
}
