// ============================================================
// Tokenization Layer
// ============================================================
// Reproduces the subword tokenization the QA model was trained
// against. Any drift here silently changes the ids the model
// sees, so every stage is small and separately tested.
//
//   char_class  → per-character predicates
//   basic       → cleaning, case folding, punctuation split
//   wordpiece   → greedy longest-match subword segmentation
//   full        → basic + wordpiece facade, id lookup
//   vocab       → immutable token ↔ id table

pub mod basic;
pub mod char_class;
pub mod full;
pub mod vocab;
pub mod wordpiece;

pub use basic::BasicTokenizer;
pub use full::{TokenId, Tokenizer};
pub use vocab::Vocabulary;
pub use wordpiece::{LongWordPolicy, WordpieceSegmenter};
