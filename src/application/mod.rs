// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers: encode, call the model, rank.
// No tokenization rules or span math live here, only the order
// in which the pieces run and the error context around them.

// Question + passage → ranked answers through an inference engine
pub mod ask_use_case;
