//! Session score aggregation.
//!
//! Mock tests and diagnostics reduce a batch of per-question evaluations to
//! one summary for the results screen.

use serde::{Deserialize, Serialize};

use crate::model::{Evaluation, Verdict};

impl Evaluation {
    /// Collapse a per-option verdict row to a single per-question verdict.
    ///
    /// Any `Incorrect` dominates, then any `Partial`, then any `Correct`;
    /// a row with no marks at all (unanswered) collapses to `Neutral`.
    pub fn overall(&self) -> Verdict {
        match self {
            Evaluation::Overall(verdict) => *verdict,
            Evaluation::PerOption(verdicts) => {
                if verdicts.contains(&Verdict::Incorrect) {
                    Verdict::Incorrect
                } else if verdicts.contains(&Verdict::Partial) {
                    Verdict::Partial
                } else if verdicts.contains(&Verdict::Correct) {
                    Verdict::Correct
                } else {
                    Verdict::Neutral
                }
            }
        }
    }
}

/// Aggregate counts for one practice or mock-test session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Questions evaluated.
    pub total: usize,
    pub correct: usize,
    pub partial: usize,
    pub incorrect: usize,
    /// Unanswered questions (collapsed to `Neutral`).
    pub neutral: usize,
    /// Score in `[0, 100]`; a partial counts half a correct.
    pub score_percent: f64,
}

impl SessionStats {
    /// Compute session statistics from per-question verdicts.
    pub fn compute(verdicts: &[Verdict]) -> Self {
        let mut correct = 0usize;
        let mut partial = 0usize;
        let mut incorrect = 0usize;
        let mut neutral = 0usize;

        for verdict in verdicts {
            match verdict {
                Verdict::Correct => correct += 1,
                Verdict::Partial => partial += 1,
                Verdict::Incorrect => incorrect += 1,
                Verdict::Neutral => neutral += 1,
            }
        }

        let total = verdicts.len();
        let score_percent = if total == 0 {
            0.0
        } else {
            (correct as f64 + partial as f64 * 0.5) / total as f64 * 100.0
        };

        SessionStats {
            total,
            correct,
            partial,
            incorrect,
            neutral,
            score_percent,
        }
    }
}
