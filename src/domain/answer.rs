// ============================================================
// Layer 3 — Span / Answer Domain Types
// ============================================================
// A span is a closed interval [start, end] of logit positions
// with the summed start+end logit as its score. An answer pairs
// a span with the passage words it covers.
//
// Example:
//   Passage: "This is the context."
//   Span:    start=4, end=4, score=9.5
//   Answer:  "context."

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    /// Inclusive
    pub end:   usize,
    pub score: f32,
}

impl Span {
    pub fn new(start: usize, end: usize, score: f32) -> Self {
        Self { start, end, score }
    }

    /// Number of subwords covered; zero for an inverted span.
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Recovered passage text; empty means "no answer"
    pub text: String,
    #[serde(flatten)]
    pub span: Span,
}

impl Answer {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self { text: text.into(), span }
    }

    pub fn is_no_answer(&self) -> bool {
        self.text.is_empty()
    }
}
