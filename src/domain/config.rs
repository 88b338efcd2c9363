// ============================================================
// Layer 3 — Pipeline Configuration
// ============================================================
// Fixed constants the QA model was exported with. The query
// budget is a ceiling: when max_seq_len is too small to hold a
// full query plus the three markers, FeatureBuilder cuts the
// query further so the feature still has max_seq_len positions.

use serde::{Deserialize, Serialize};

use crate::error::{QaError, QaResult};
use crate::tokenization::LongWordPolicy;

/// [CLS] + two [SEP]
pub const RESERVED_MARKERS: usize = 3;

/// Shift between a logit index and its key in the origin map.
/// FeatureBuilder writes keys with it and AnswerRanker reads them
/// back with it; the two must agree.
pub const OUTPUT_OFFSET: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Query subwords kept after tokenization
    pub max_query_len: usize,

    /// Length L of every input row fed to the model
    pub max_seq_len: usize,

    /// Longest accepted answer span, in subwords
    pub max_answer_len: usize,

    /// Candidates kept per boundary and answers returned
    pub top_k: usize,

    pub lowercase: bool,

    pub long_word_policy: LongWordPolicy,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            max_query_len:    64,
            max_seq_len:      512,
            max_answer_len:   32,
            top_k:            5,
            lowercase:        true,
            long_word_policy: LongWordPolicy::PassThrough,
        }
    }
}

impl QaConfig {
    /// Reject settings under which the markers alone overflow
    /// `max_seq_len` or the ranker could never return anything.
    pub fn validate(&self) -> QaResult<()> {
        if self.max_seq_len < RESERVED_MARKERS {
            return Err(QaError::InvalidConfig(format!(
                "max_seq_len ({}) cannot hold the {} marker tokens",
                self.max_seq_len, RESERVED_MARKERS
            )));
        }
        if self.top_k == 0 {
            return Err(QaError::InvalidConfig("top_k must be positive".into()));
        }
        if self.max_answer_len == 0 {
            return Err(QaError::InvalidConfig("max_answer_len must be positive".into()));
        }
        Ok(())
    }

    /// Query subwords that actually fit: `max_query_len`, or less when
    /// `max_seq_len` leaves no room for the markers.
    pub fn query_cap(&self) -> usize {
        self.max_query_len
            .min(self.max_seq_len.saturating_sub(RESERVED_MARKERS))
    }
}
