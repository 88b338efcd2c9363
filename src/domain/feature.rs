// ============================================================
// Layer 3 — Feature Domain Type
// ============================================================
// The fixed-shape model input for one (question, passage) pair,
// plus the bookkeeping needed to turn subword positions back
// into passage words.
//
// Layout of the subword sequence (L = max_seq_len):
//
//   pos:  0     1 .. n      n+1    n+2 .. n+q+1   n+q+2   .. L-1
//         [CLS] passage     [SEP]  query          [SEP]   padding
//   seg:  0     0           0      1              1       0
//   mask: 1     1           1      1              1       0
//
// `token_to_origin` is keyed by the sequence length right after
// each passage subword was appended, i.e. the subword at
// position p is stored under key p + 1. The ranker undoes the
// shift with `OUTPUT_OFFSET`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub input_ids:   Vec<u32>,
    pub input_mask:  Vec<u32>,
    pub segment_ids: Vec<u32>,

    /// Passage split on whitespace runs
    pub orig_tokens: Vec<String>,

    /// Shifted subword position → index into `orig_tokens`
    pub token_to_origin: BTreeMap<usize, usize>,
}

impl Feature {
    /// Length L shared by the three numeric rows
    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }

    /// Number of non-padding positions
    pub fn real_len(&self) -> usize {
        self.input_mask.iter().take_while(|&&m| m == 1).count()
    }

    /// Original word for a shifted subword position.
    pub fn origin_of(&self, key: usize) -> Option<usize> {
        self.token_to_origin.get(&key).copied()
    }
}
