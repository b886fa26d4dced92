//! quizmark-bank — Question-bank normalization and loading.
//!
//! The boundary between raw question documents (as stored by the various
//! pages, with inconsistent field names and index bases) and the canonical
//! `AnswerKey` shape the evaluator consumes. All field-name fallbacks and
//! 1-based/0-based handling live here and nowhere else.

pub mod error;
pub mod loader;
pub mod normalize;
