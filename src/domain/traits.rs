// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these, so a test can
// swap the real model for a canned one.

use anyhow::Result;

use crate::domain::answer::Answer;

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Anything that answers a question about a passage.
///
/// Implementations:
///   - QaClient → encode, run the model, rank spans
pub trait QuestionAnswerer {
    /// Ranked answers, best first. May be empty.
    fn answer(&self, question: &str, context: &str) -> Result<Vec<Answer>>;
}
