//! Answer evaluation.
//!
//! Pure, total functions mapping an answer key plus a submission to verdicts.
//! Nothing here errors or panics on documented input: malformed or ambiguous
//! submissions degrade to `Incorrect`, because the surrounding UI always
//! wants a renderable verdict rather than an exception.

use std::collections::BTreeSet;

use crate::model::{AnswerKey, Evaluation, NumericRange, NumericValue, Submission, Verdict};

/// Absolute-difference threshold under which two numeric values count as
/// equal when the key carries no explicit range.
pub const NUMERIC_TOLERANCE: f64 = 0.01;

/// Returns `true` if `a` and `b` differ by less than [`NUMERIC_TOLERANCE`].
/// Non-finite values never match.
fn within_tolerance(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && (a - b).abs() < NUMERIC_TOLERANCE
}

/// Evaluate a single-choice attempt.
///
/// Callers must not invoke this for an unanswered question; there is no
/// "unanswered" verdict at this layer.
pub fn evaluate_single_choice(correct_index: usize, chosen_index: usize) -> Verdict {
    if chosen_index == correct_index {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Evaluate a multi-choice attempt, producing one verdict per option.
///
/// Decision policy, in precedence order:
/// 1. Any wrong pick: every chosen option is `Incorrect`, everything else is
///    `Neutral`. Correct-but-unchosen options are not revealed in this
///    branch; the answer only shows once the attempt is fully right.
/// 2. Chosen set equals the correct set exactly: correct options are
///    `Correct`, the rest `Neutral`.
/// 3. A proper non-empty subset of the correct set was chosen: those picks
///    are `Partial`, unchosen correct options stay `Neutral`.
///
/// The result always has length `option_count`. Out-of-range picks are a
/// caller error; they are ignored rather than panicking.
pub fn evaluate_multi_choice(
    correct_indices: &BTreeSet<usize>,
    chosen_indices: &BTreeSet<usize>,
    option_count: usize,
) -> Vec<Verdict> {
    let mut verdicts = vec![Verdict::Neutral; option_count];

    let has_wrong_pick = chosen_indices
        .iter()
        .any(|index| !correct_indices.contains(index));

    if has_wrong_pick {
        for &index in chosen_indices {
            if index < option_count {
                verdicts[index] = Verdict::Incorrect;
            }
        }
        return verdicts;
    }

    // No wrong picks, so chosen ⊆ correct: equal sizes means an exact match.
    if chosen_indices.len() == correct_indices.len() && !chosen_indices.is_empty() {
        for &index in correct_indices {
            if index < option_count {
                verdicts[index] = Verdict::Correct;
            }
        }
        return verdicts;
    }

    for index in 0..option_count {
        let correct = correct_indices.contains(&index);
        let chosen = chosen_indices.contains(&index);
        verdicts[index] = match (correct, chosen) {
            (true, true) => Verdict::Partial,
            // Unreachable given the wrong-pick branch above; kept as a
            // fallback so the match stays total.
            (false, true) => Verdict::Incorrect,
            _ => Verdict::Neutral,
        };
    }
    verdicts
}

/// Evaluate a numeric attempt.
///
/// When the key carries an inclusive `range`, every submitted value must
/// fall inside it — a single scalar, or each element of a sequence. Without
/// a range, values match under the [`NUMERIC_TOLERANCE`] exact check,
/// pairwise for equal-length sequences. Any shape mismatch, length mismatch,
/// or non-finite value (NaN from an unparsable submission included) is
/// `Incorrect`.
pub fn evaluate_numeric(
    expected: &NumericValue,
    submitted: &NumericValue,
    range: Option<&NumericRange>,
) -> Verdict {
    let matched = match (expected, submitted) {
        (NumericValue::Scalar(expected), NumericValue::Scalar(submitted)) => match range {
            Some(range) => range.contains(*submitted),
            None => within_tolerance(*expected, *submitted),
        },
        (NumericValue::Sequence(expected), NumericValue::Sequence(submitted)) => {
            expected.len() == submitted.len()
                && match range {
                    Some(range) => submitted.iter().all(|s| range.contains(*s)),
                    None => expected
                        .iter()
                        .zip(submitted)
                        .all(|(e, s)| within_tolerance(*e, *s)),
                }
        }
        // Sequence vs scalar (either direction) is a shape mismatch.
        _ => false,
    };

    if matched {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

impl AnswerKey {
    /// Evaluate a submission against this key.
    ///
    /// Choice questions yield a per-option verdict row sized to the real
    /// option count; numeric questions yield a single verdict. A submission
    /// whose shape does not match the key degrades to `Incorrect` instead of
    /// erroring.
    pub fn evaluate(&self, submission: &Submission) -> Evaluation {
        match (self, submission) {
            (
                AnswerKey::SingleChoice {
                    option_count,
                    correct_index,
                },
                Submission::Choice(chosen),
            ) => {
                let mut verdicts = vec![Verdict::Neutral; *option_count];
                if *chosen < *option_count {
                    verdicts[*chosen] = evaluate_single_choice(*correct_index, *chosen);
                }
                Evaluation::PerOption(verdicts)
            }
            (
                AnswerKey::MultiChoice {
                    option_count,
                    correct_indices,
                },
                Submission::Choices(chosen),
            ) => Evaluation::PerOption(evaluate_multi_choice(
                correct_indices,
                chosen,
                *option_count,
            )),
            (AnswerKey::Numeric { expected, range }, Submission::Number(value)) => {
                Evaluation::Overall(evaluate_numeric(
                    expected,
                    &NumericValue::Scalar(*value),
                    range.as_ref(),
                ))
            }
            (AnswerKey::Numeric { expected, range }, Submission::Numbers(values)) => {
                Evaluation::Overall(evaluate_numeric(
                    expected,
                    &NumericValue::Sequence(values.clone()),
                    range.as_ref(),
                ))
            }
            // Shape mismatch between key and submission: safest renderable
            // verdict rather than an error.
            _ => Evaluation::Overall(Verdict::Incorrect),
        }
    }
}
