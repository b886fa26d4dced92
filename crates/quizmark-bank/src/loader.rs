//! JSON question-bank loading.
//!
//! Loads bank files (a JSON array of raw question documents) and whole
//! directories of them. Malformed questions and unreadable files are skipped
//! with a warning instead of failing the load; a practice page should render
//! every question it can.

use std::path::Path;

use anyhow::{Context, Result};

use quizmark_core::model::AnswerKey;

use crate::normalize::{normalize, RawQuestion};

/// A normalized question ready for evaluation, keyed by its document id.
#[derive(Debug, Clone, PartialEq)]
pub struct BankEntry {
    pub id: String,
    pub key: AnswerKey,
}

/// Parse a JSON question-bank string (useful for testing).
pub fn parse_question_bank_str(content: &str, source: &Path) -> Result<Vec<BankEntry>> {
    let raw: Vec<RawQuestion> = serde_json::from_str(content)
        .with_context(|| format!("failed to parse question bank: {}", source.display()))?;

    let mut entries = Vec::with_capacity(raw.len());
    for (position, question) in raw.iter().enumerate() {
        let id = question
            .id
            .clone()
            .unwrap_or_else(|| format!("q{position}"));
        match normalize(question) {
            Ok(key) => entries.push(BankEntry { id, key }),
            Err(e) if e.is_answer_error() => {
                tracing::warn!(
                    "skipping question {id} in {}: bad answer payload: {e}",
                    source.display()
                );
            }
            Err(e) => {
                tracing::warn!(
                    "skipping question {id} in {}: malformed document: {e}",
                    source.display()
                );
            }
        }
    }
    Ok(entries)
}

/// Load a single question-bank file.
pub fn load_question_file(path: &Path) -> Result<Vec<BankEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;
    parse_question_bank_str(&content, path)
}

/// Recursively load all `.json` question banks from a directory.
pub fn load_question_dir(dir: &Path) -> Result<Vec<BankEntry>> {
    let mut entries = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for dir_entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();

        if path.is_dir() {
            entries.extend(load_question_dir(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match load_question_file(&path) {
                Ok(bank) => entries.extend(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                }
            }
        }
    }

    Ok(entries)
}
