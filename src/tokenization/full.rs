// ============================================================
// Tokenization — Tokenizer facade
// ============================================================
// Basic tokenization followed by wordpiece segmentation, plus
// token → id lookup. Id lookup never shortens the sequence: a
// token missing from the vocabulary comes back as
// `TokenId::Unmapped` in its own slot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::basic::BasicTokenizer;
use super::vocab::Vocabulary;
use super::wordpiece::{LongWordPolicy, WordpieceSegmenter};
use crate::error::{QaError, QaResult};

/// Outcome of looking one token up in the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenId {
    Mapped(u32),
    Unmapped,
}

impl TokenId {
    pub fn mapped(self) -> Option<u32> {
        match self {
            TokenId::Mapped(id) => Some(id),
            TokenId::Unmapped   => None,
        }
    }

    /// The id, or `placeholder` when unmapped.
    pub fn or(self, placeholder: u32) -> u32 {
        self.mapped().unwrap_or(placeholder)
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    vocab:     Arc<Vocabulary>,
    basic:     BasicTokenizer,
    wordpiece: WordpieceSegmenter,
}

impl Tokenizer {
    pub fn new(vocab: Arc<Vocabulary>, lowercase: bool) -> Self {
        Self {
            basic:     BasicTokenizer::new(lowercase),
            wordpiece: WordpieceSegmenter::new(Arc::clone(&vocab)),
            vocab,
        }
    }

    pub fn with_long_word_policy(mut self, policy: LongWordPolicy) -> Self {
        self.wordpiece = self.wordpiece.with_long_word_policy(policy);
        self
    }

    /// Text → ordered subword sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.basic
            .tokenize(text)
            .iter()
            .flat_map(|token| self.wordpiece.tokenize(token))
            .collect()
    }

    /// One `TokenId` per input token, same length as `tokens`.
    pub fn to_ids<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<TokenId> {
        tokens
            .iter()
            .map(|t| match self.vocab.id(t.as_ref()) {
                Some(id) => TokenId::Mapped(id),
                None     => TokenId::Unmapped,
            })
            .collect()
    }

    /// Like `to_ids`, but fails on the first token with no id.
    pub fn to_ids_strict<S: AsRef<str>>(&self, tokens: &[S]) -> QaResult<Vec<u32>> {
        tokens
            .iter()
            .map(|t| {
                self.vocab
                    .id(t.as_ref())
                    .ok_or_else(|| QaError::UnmappedToken(t.as_ref().to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenizer() -> Tokenizer {
        let vocab = Vocabulary::from_tokens([
            "[PAD]", "[UNK]", "[CLS]", "[SEP]", "the", "run", "##ning", "dog", ".", "?",
        ]);
        Tokenizer::new(Arc::new(vocab), true)
    }

    #[test]
    fn test_tokenize_combines_both_stages() {
        let t = tokenizer();
        assert_eq!(
            t.tokenize("The dog, running."),
            vec!["the", "dog", "[UNK]", "run", "##ning", "."]
        );
    }

    #[test]
    fn test_to_ids_keeps_length() {
        let t = tokenizer();
        let ids = t.to_ids(&["the", "missing", "dog"]);
        assert_eq!(
            ids,
            vec![TokenId::Mapped(4), TokenId::Unmapped, TokenId::Mapped(7)]
        );
        assert_eq!(ids[1].or(1), 1);
    }

    #[test]
    fn test_to_ids_strict_reports_token() {
        let t = tokenizer();
        assert_eq!(t.to_ids_strict(&["the", "dog"]).ok(), Some(vec![4, 7]));
        match t.to_ids_strict(&["the", "cat"]) {
            Err(QaError::UnmappedToken(tok)) => assert_eq!(tok, "cat"),
            other => panic!("expected UnmappedToken, got {other:?}"),
        }
    }

    #[test]
    fn test_long_word_passes_through_unmapped() {
        let t = tokenizer();
        let long = "x".repeat(250);
        let tokens = t.tokenize(&long);
        assert_eq!(tokens, vec![long]);
        assert_eq!(t.to_ids(&tokens), vec![TokenId::Unmapped]);
    }
}
