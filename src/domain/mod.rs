// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs and traits describing what the pipeline passes
// around. Nothing here tokenizes, touches the filesystem or
// knows about a model runtime.

// Fixed pipeline constants and their validation
pub mod config;

// The encoded model input plus subword → word bookkeeping
pub mod feature;

// Candidate spans and the text recovered for them
pub mod answer;

// Abstractions the application layer depends on
pub mod traits;
