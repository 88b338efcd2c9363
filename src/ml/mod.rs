// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything on either side of the model call:
//
//   engine.rs — the tensor contract an external runtime
//               implements (three int rows in, two float
//               rows out) plus a shape check on its output
//
//   ranker.rs — logit rows → ranked answer spans with their
//               recovered passage text
//
// The network itself is not part of this crate.
//
// Reference: Devlin et al. (2019) BERT, §4.2 SQuAD span scoring

/// Model input/output contract
pub mod engine;

/// Top-k span search over start/end logits
pub mod ranker;
