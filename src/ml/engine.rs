// ============================================================
// Layer 5 — Inference Engine seam
// ============================================================
// The transformer itself lives outside this crate. All the
// pipeline assumes is the tensor contract it was exported with:
//
//   in:  input_ids, input_mask, segment_ids   int   [1, L]
//   out: start_logits, end_logits             float [1, L]
//
// `ModelInput` borrows the rows straight out of a `Feature`;
// an engine copies them into whatever buffers its runtime uses.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::feature::Feature;
use crate::error::{QaError, QaResult};

/// Batch-of-one model input, each row of length L.
#[derive(Debug, Clone, Copy)]
pub struct ModelInput<'a> {
    pub input_ids:   &'a [u32],
    pub input_mask:  &'a [u32],
    pub segment_ids: &'a [u32],
}

impl<'a> From<&'a Feature> for ModelInput<'a> {
    fn from(f: &'a Feature) -> Self {
        Self {
            input_ids:   &f.input_ids,
            input_mask:  &f.input_mask,
            segment_ids: &f.segment_ids,
        }
    }
}

impl ModelInput<'_> {
    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub start_logits: Vec<f32>,
    pub end_logits:   Vec<f32>,
}

impl ModelOutput {
    /// Both rows must have exactly `seq_len` entries.
    pub fn check_shape(&self, seq_len: usize) -> QaResult<()> {
        for (name, row) in [("start_logits", &self.start_logits), ("end_logits", &self.end_logits)] {
            if row.len() != seq_len {
                return Err(QaError::ShapeMismatch {
                    name,
                    expected: seq_len,
                    found:    row.len(),
                });
            }
        }
        Ok(())
    }
}

/// Any runtime that maps the three input rows to the two logit rows.
pub trait InferenceEngine {
    fn infer(&self, input: &ModelInput<'_>) -> Result<ModelOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_check() {
        let out = ModelOutput { start_logits: vec![0.0; 4], end_logits: vec![0.0; 3] };
        match out.check_shape(4) {
            Err(QaError::ShapeMismatch { name, expected, found }) => {
                assert_eq!(name, "end_logits");
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
        assert!(out.check_shape(3).is_err());
    }

    #[test]
    fn test_input_borrows_feature_rows() {
        let f = Feature {
            input_ids:       vec![101, 7, 102],
            input_mask:      vec![1, 1, 1],
            segment_ids:     vec![0, 0, 1],
            orig_tokens:     vec!["x".into()],
            token_to_origin: Default::default(),
        };
        let input = ModelInput::from(&f);
        assert_eq!(input.seq_len(), 3);
        assert_eq!(input.segment_ids, &[0, 0, 1]);
    }

    #[test]
    fn test_output_from_json() {
        let out: ModelOutput =
            serde_json::from_str(r#"{"start_logits":[0.5,1.0],"end_logits":[2.0,-1.0]}"#).unwrap();
        assert!(out.check_shape(2).is_ok());
        assert_eq!(out.end_logits[1], -1.0);
    }
}
