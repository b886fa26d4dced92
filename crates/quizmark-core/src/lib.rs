//! quizmark-core — Answer evaluation, option shuffling, and session scoring.
//!
//! This crate defines the canonical answer-key data model and the pure
//! evaluation functions that turn a learner's submission into per-option
//! verdicts for the UI to render.

pub mod evaluator;
pub mod model;
pub mod shuffle;
pub mod statistics;
