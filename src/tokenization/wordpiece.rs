// ============================================================
// Tokenization — Wordpiece Segmenter
// ============================================================
// Greedy longest-match-first subword segmentation.
//
// Example with vocab {"un", "##aff", "##able"}:
//   "unaffable" → ["un", "##aff", "##able"]
//
// At each start position the longest substring present in the
// vocabulary wins. Non-initial pieces carry the "##" prefix.
// If some start position has no match of any length, the whole
// word becomes a single [UNK]; there is no backtracking.
//
// Reference: Wu et al. (2016) Google NMT wordpiece model
//            Devlin et al. (2019) BERT

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::basic::BasicTokenizer;
use super::vocab::{Vocabulary, UNKNOWN_TOKEN};

pub const CONTINUATION_PREFIX: &str = "##";
pub const MAX_CHARS_PER_WORD: usize = 200;

/// What to emit for a word longer than `MAX_CHARS_PER_WORD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongWordPolicy {
    /// Emit the word unchanged, without a vocabulary lookup.
    #[default]
    PassThrough,
    /// Emit a single `[UNK]`.
    Unknown,
}

#[derive(Debug, Clone)]
pub struct WordpieceSegmenter {
    vocab:            Arc<Vocabulary>,
    long_word_policy: LongWordPolicy,
}

impl WordpieceSegmenter {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab, long_word_policy: LongWordPolicy::default() }
    }

    pub fn with_long_word_policy(mut self, policy: LongWordPolicy) -> Self {
        self.long_word_policy = policy;
        self
    }

    /// Segment every space-separated word of `text`.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut output = Vec::new();
        for word in BasicTokenizer::split_whitespace(text) {
            self.segment_word(word, &mut output);
        }
        output
    }

    fn segment_word(&self, word: &str, output: &mut Vec<String>) {
        let chars: Vec<char> = word.chars().collect();

        if chars.len() > MAX_CHARS_PER_WORD {
            match self.long_word_policy {
                LongWordPolicy::PassThrough => output.push(word.to_string()),
                LongWordPolicy::Unknown     => output.push(UNKNOWN_TOKEN.to_string()),
            }
            return;
        }

        let mut pieces = Vec::new();
        let mut start  = 0usize;

        while start < chars.len() {
            let mut end   = chars.len();
            let mut found = None;

            while start < end {
                let body: String = chars[start..end].iter().collect();
                let candidate = if start == 0 {
                    body
                } else {
                    format!("{CONTINUATION_PREFIX}{body}")
                };
                if self.vocab.contains(&candidate) {
                    found = Some(candidate);
                    break;
                }
                end -= 1;
            }

            match found {
                Some(piece) => {
                    pieces.push(piece);
                    start = end;
                }
                None => {
                    output.push(UNKNOWN_TOKEN.to_string());
                    return;
                }
            }
        }

        output.extend(pieces);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segmenter(tokens: &[&str]) -> WordpieceSegmenter {
        WordpieceSegmenter::new(Arc::new(Vocabulary::from_tokens(tokens.iter().copied())))
    }

    #[test]
    fn test_whole_word_match() {
        let s = segmenter(&["context"]);
        assert_eq!(s.tokenize("context"), vec!["context"]);
    }

    #[test]
    fn test_longest_match_first() {
        let s = segmenter(&["un", "una", "##aff", "##ff", "##able", "##a"]);
        // "una" is longer than "un" and is tried first
        assert_eq!(s.tokenize("unaffable"), vec!["una", "##ff", "##able"]);
    }

    #[test]
    fn test_unsegmentable_word_is_unknown() {
        let s = segmenter(&["un", "##aff"]);
        assert_eq!(s.tokenize("unaffable"), vec!["[UNK]"]);
    }

    #[test]
    fn test_failure_is_per_word() {
        let s = segmenter(&["a", "b"]);
        assert_eq!(s.tokenize("a zz b"), vec!["a", "[UNK]", "b"]);
    }

    #[test]
    fn test_continuation_requires_prefix() {
        // "b" exists but "##b" does not, so "ab" cannot be segmented
        let s = segmenter(&["a", "b"]);
        assert_eq!(s.tokenize("ab"), vec!["[UNK]"]);
    }

    #[test]
    fn test_long_word_pass_through() {
        let s = segmenter(&["a"]);
        let long = "a".repeat(MAX_CHARS_PER_WORD + 1);
        assert_eq!(s.tokenize(&long), vec![long.clone()]);
    }

    #[test]
    fn test_long_word_unknown_policy() {
        let s = segmenter(&["a"]).with_long_word_policy(LongWordPolicy::Unknown);
        let long = "a".repeat(MAX_CHARS_PER_WORD + 1);
        assert_eq!(s.tokenize(&long), vec!["[UNK]"]);
    }

    #[test]
    fn test_word_at_cap_is_segmented() {
        let s = segmenter(&["a", "##a"]);
        let word = "a".repeat(MAX_CHARS_PER_WORD);
        let pieces = s.tokenize(&word);
        assert_eq!(pieces.len(), MAX_CHARS_PER_WORD);
        assert_eq!(pieces[0], "a");
        assert_eq!(pieces[1], "##a");
    }

    #[test]
    fn test_multibyte_word() {
        let s = segmenter(&["caf", "##é"]);
        assert_eq!(s.tokenize("café"), vec!["caf", "##é"]);
    }
}
