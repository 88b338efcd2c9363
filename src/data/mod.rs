// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From a raw (question, passage) pair to model-ready rows:
//
//   question, passage
//       │
//       ▼
//   Tokenizer        → subwords (tokenization layer)
//       │
//       ▼
//   FeatureBuilder   → ids / mask / segments + origin map
//       │
//       ▼
//   InferenceEngine  → start / end logits (ml layer)

/// Assembles the fixed-length model input
pub mod feature_builder;
