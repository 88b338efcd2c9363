// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Filesystem access, kept out of the pipeline itself:
//
//   vocab_store.rs  — reads vocab.txt into a shared Vocabulary
//   config_store.rs — reads / writes QaConfig as JSON

/// Vocabulary file loading
pub mod vocab_store;

/// JSON config persistence
pub mod config_store;
