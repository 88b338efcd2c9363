// ============================================================
// Typed errors for the encode/decode pipeline
// ============================================================
// Library components return `QaError`; the CLI and application
// layers wrap it in `anyhow` with path context, the same split
// the rest of the crate uses.

use thiserror::Error;

pub type QaResult<T> = Result<T, QaError>;

#[derive(Debug, Error)]
pub enum QaError {
    /// A configuration value makes a fixed-shape feature impossible
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A subword has no id in the vocabulary
    #[error("token '{0}' is not in the vocabulary")]
    UnmappedToken(String),

    /// A span position has no entry in the subword → word index map
    #[error("position {position} has no original-word mapping")]
    IndexMapping { position: usize },

    /// A model output row does not have the configured sequence length
    #[error("{name} has length {found}, expected {expected}")]
    ShapeMismatch {
        name:     &'static str,
        expected: usize,
        found:    usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
