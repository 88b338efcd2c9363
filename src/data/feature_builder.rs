// ============================================================
// Layer 4 — Feature Builder
// ============================================================
// Turns a raw (question, passage) pair into a `Feature`:
//
//   question ──tokenize──► query subwords (first max_query_len)
//   passage  ──split on whitespace runs──► original words
//            ──tokenize each word──► passage subwords + word index
//
//   [CLS] passage… [SEP] query… [SEP] → ids, mask, segments,
//   padded with 0 to max_seq_len
//
// Over-long input is never an error. Both the query and the
// passage keep their prefix and drop the tail, so the output
// always has exactly max_seq_len positions.
//
// Reference: Devlin et al. (2019) BERT, SQuAD input format

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::config::{QaConfig, OUTPUT_OFFSET, RESERVED_MARKERS};
use crate::domain::feature::Feature;
use crate::error::QaResult;
use crate::tokenization::vocab::{CLS_TOKEN, PAD_ID, SEP_TOKEN};
use crate::tokenization::{TokenId, Tokenizer, Vocabulary};

const PASSAGE_SEGMENT: u32 = 0;
const QUERY_SEGMENT: u32 = 1;

#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    tokenizer:     Tokenizer,
    max_query_len: usize,
    max_seq_len:   usize,
    /// Id written for a subword the vocabulary does not know
    unmapped_id:   u32,
}

impl FeatureBuilder {
    pub fn new(vocab: Arc<Vocabulary>, config: &QaConfig) -> QaResult<Self> {
        config.validate()?;
        let unmapped_id = vocab.unknown_id().unwrap_or(PAD_ID);
        let tokenizer = Tokenizer::new(vocab, config.lowercase)
            .with_long_word_policy(config.long_word_policy);
        Ok(Self {
            tokenizer,
            max_query_len: config.query_cap(),
            max_seq_len:   config.max_seq_len,
            unmapped_id,
        })
    }

    pub fn build(&self, query: &str, context: &str) -> Feature {
        // ── Step 1: Query subwords, tail dropped ─────────────────────────────
        let mut query_tokens = self.tokenizer.tokenize(query);
        query_tokens.truncate(self.max_query_len);

        // ── Step 2: Original passage words ───────────────────────────────────
        let orig_tokens = split_context(context);

        // ── Step 3: Passage subwords with their source word ──────────────────
        let mut doc_tokens: Vec<String> = Vec::new();
        let mut doc_origin: Vec<usize>  = Vec::new();
        for (word_idx, word) in orig_tokens.iter().enumerate() {
            for sub in self.tokenizer.tokenize(word) {
                doc_tokens.push(sub);
                doc_origin.push(word_idx);
            }
        }

        // ── Step 4: Fit the passage into what the query leaves over ──────────
        let max_context_len = self.max_seq_len - query_tokens.len() - RESERVED_MARKERS;
        if doc_tokens.len() > max_context_len {
            tracing::debug!(
                "Passage truncated from {} to {} subwords",
                doc_tokens.len(),
                max_context_len
            );
            doc_tokens.truncate(max_context_len);
            doc_origin.truncate(max_context_len);
        }

        // ── Step 5: Assemble [CLS] passage [SEP] query [SEP] ─────────────────
        let real_len = doc_tokens.len() + query_tokens.len() + RESERVED_MARKERS;
        let mut tokens: Vec<&str>   = Vec::with_capacity(real_len);
        let mut segment_ids: Vec<u32> = Vec::with_capacity(self.max_seq_len);
        let mut token_to_origin = BTreeMap::new();

        tokens.push(CLS_TOKEN);
        segment_ids.push(PASSAGE_SEGMENT);

        for (sub, &origin) in doc_tokens.iter().zip(&doc_origin) {
            token_to_origin.insert(tokens.len() + OUTPUT_OFFSET, origin);
            tokens.push(sub);
            segment_ids.push(PASSAGE_SEGMENT);
        }

        tokens.push(SEP_TOKEN);
        segment_ids.push(PASSAGE_SEGMENT);

        for sub in &query_tokens {
            tokens.push(sub);
            segment_ids.push(QUERY_SEGMENT);
        }

        tokens.push(SEP_TOKEN);
        segment_ids.push(QUERY_SEGMENT);

        // ── Step 6: Ids, mask, padding ───────────────────────────────────────
        let mut input_ids: Vec<u32> = self
            .tokenizer
            .to_ids(&tokens)
            .into_iter()
            .zip(&tokens)
            .map(|(id, token)| {
                if id == TokenId::Unmapped {
                    tracing::warn!("Subword '{}' has no vocabulary id, using {}", token, self.unmapped_id);
                }
                id.or(self.unmapped_id)
            })
            .collect();
        let mut input_mask = vec![1u32; input_ids.len()];

        input_ids.resize(self.max_seq_len, PAD_ID);
        input_mask.resize(self.max_seq_len, 0);
        segment_ids.resize(self.max_seq_len, 0);

        tracing::debug!(
            "Built feature: {} query + {} passage subwords, {} words",
            query_tokens.len(),
            doc_tokens.len(),
            orig_tokens.len()
        );

        Feature {
            input_ids,
            input_mask,
            segment_ids,
            orig_tokens,
            token_to_origin,
        }
    }
}

/// Trim, then split on runs of ASCII whitespace.
fn split_context(context: &str) -> Vec<String> {
    context
        .trim_matches(|c: char| c <= ' ')
        .split(|c: char| matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vocab() -> Arc<Vocabulary> {
        Arc::new(Vocabulary::from_tokens([
            "[CLS]", "[SEP]", "what", "is", "context", "this", "the", ".", "?",
        ]))
    }

    fn builder(max_seq_len: usize) -> FeatureBuilder {
        let cfg = QaConfig { max_seq_len, ..QaConfig::default() };
        FeatureBuilder::new(vocab(), &cfg).unwrap()
    }

    #[test]
    fn test_layout_and_segments() {
        let f = builder(20).build("What is context?", "This is the context.");

        // [CLS] this is the context . [SEP] what is context ? [SEP]
        assert_eq!(
            &f.input_ids[..12],
            &[0, 5, 3, 6, 4, 7, 1, 2, 3, 4, 8, 1]
        );
        assert_eq!(&f.segment_ids[..12], &[0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        assert_eq!(f.real_len(), 12);
        assert!(f.input_ids[12..].iter().all(|&id| id == 0));
        assert!(f.segment_ids[12..].iter().all(|&s| s == 0));
        assert_eq!(f.orig_tokens, vec!["This", "is", "the", "context."]);
    }

    #[test]
    fn test_origin_keys_are_shifted_by_one() {
        let f = builder(20).build("What is context?", "This is the context.");
        // passage subwords sit at positions 1..=5, keys are 2..=6
        let expected = BTreeMap::from([(2, 0), (3, 1), (4, 2), (5, 3), (6, 3)]);
        assert_eq!(f.token_to_origin, expected);
    }

    #[test]
    fn test_rows_have_fixed_length() {
        let b = builder(20);
        let long_context = "the ".repeat(100);
        for (q, c) in [("", ""), ("what", "this"), ("what", long_context.as_str())] {
            let f = b.build(q, c);
            assert_eq!(f.input_ids.len(), 20);
            assert_eq!(f.input_mask.len(), 20);
            assert_eq!(f.segment_ids.len(), 20);
        }
    }

    #[test]
    fn test_passage_truncation_keeps_prefix() {
        let f = builder(10).build("what", "this is the context this is the context");
        // 10 - 1 query subword - 3 markers = 6 passage subwords
        assert_eq!(f.real_len(), 10);
        assert_eq!(f.token_to_origin.len(), 6);
        assert_eq!(f.token_to_origin.values().max(), Some(&5));
        assert_eq!(f.orig_tokens.len(), 8);
    }

    #[test]
    fn test_query_truncation() {
        let cfg = QaConfig { max_seq_len: 20, max_query_len: 2, ..QaConfig::default() };
        let f = FeatureBuilder::new(vocab(), &cfg).unwrap().build("what is this", "the");
        // [CLS] the [SEP] what is [SEP]
        assert_eq!(&f.input_ids[..6], &[0, 6, 1, 2, 3, 1]);
        assert_eq!(f.real_len(), 6);
    }

    #[test]
    fn test_unmapped_subword_keeps_alignment() {
        // "zebra" has no id and the vocabulary has no [UNK]: pad id stands in
        let f = builder(20).build("what", "zebra context");
        assert_eq!(&f.input_ids[..6], &[0, 0, 4, 1, 2, 1]);
        assert_eq!(f.real_len(), 6);
        assert_eq!(f.token_to_origin, BTreeMap::from([(2, 0), (3, 1)]));
    }

    #[test]
    fn test_context_split_on_any_whitespace_run() {
        let f = builder(20).build("what", "  this\tis\n\nthe  context ");
        assert_eq!(f.orig_tokens, vec!["this", "is", "the", "context"]);
    }

    #[test]
    fn test_empty_context() {
        let f = builder(20).build("what", "");
        assert!(f.orig_tokens.is_empty());
        assert!(f.token_to_origin.is_empty());
        // [CLS] [SEP] what [SEP]
        assert_eq!(&f.input_ids[..4], &[0, 1, 2, 1]);
    }

    #[test]
    fn test_query_cut_to_fit_short_sequence() {
        let f = builder(5).build("what is this ?", "");
        // 5 - 3 markers leaves room for two query subwords
        assert_eq!(&f.input_ids[..], &[0, 1, 2, 3, 1]);
        assert_eq!(f.real_len(), 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = QaConfig { max_seq_len: 2, ..QaConfig::default() };
        assert!(FeatureBuilder::new(vocab(), &cfg).is_err());
    }
}
