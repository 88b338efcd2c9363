// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Loads the vocab.txt shipped next to the model: one token per
// line, line number (from 0) = token id. The result is wrapped
// in an `Arc` so every pipeline stage shares one copy.

use anyhow::{Context, Result};
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
};

use crate::tokenization::Vocabulary;

pub struct VocabStore {
    path: PathBuf,
}

impl VocabStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the vocabulary file.
    pub fn load(&self) -> Result<Arc<Vocabulary>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", self.path.display()))?;

        let vocab = parse_vocab(&text);
        if vocab.is_empty() {
            anyhow::bail!("Vocabulary '{}' is empty", self.path.display());
        }

        tracing::info!(
            "Loaded {} vocabulary entries from '{}'",
            vocab.len(),
            self.path.display()
        );
        Ok(Arc::new(vocab))
    }
}

/// `lines()` already strips a trailing "\r", so CRLF files load the same.
pub fn parse_vocab(text: &str) -> Vocabulary {
    Vocabulary::from_tokens(text.lines())
}
