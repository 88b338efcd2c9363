// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands, one per pipeline stage that runs without
// a model:
//   tokenize — show the subwords and ids for a string
//   encode   — write the feature for a (question, passage) pair
//   decode   — rank answers from a saved feature + model output

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::domain::config::QaConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the subword tokens (and ids) for some text
    Tokenize(TokenizeArgs),

    /// Encode a question and passage into model input JSON
    Encode(EncodeArgs),

    /// Rank answers from model logits for an encoded feature
    Decode(DecodeArgs),
}

/// Flags shared by every subcommand. Each one overrides the
/// matching field of the config file when given.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON file with pipeline constants
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum query subwords kept
    #[arg(long, global = true)]
    pub max_query_len: Option<usize>,

    /// Length of every model input row
    #[arg(long, global = true)]
    pub max_seq_len: Option<usize>,

    /// Longest answer span, in subwords
    #[arg(long, global = true)]
    pub max_answer_len: Option<usize>,

    /// Number of answers returned
    #[arg(long, global = true)]
    pub top_k: Option<usize>,

    /// Keep letter case instead of lowercasing
    #[arg(long, global = true)]
    pub cased: bool,
}

impl ConfigArgs {
    /// Apply command-line overrides on top of `base`.
    pub fn apply(&self, mut base: QaConfig) -> QaConfig {
        if let Some(v) = self.max_query_len  { base.max_query_len = v; }
        if let Some(v) = self.max_seq_len    { base.max_seq_len = v; }
        if let Some(v) = self.max_answer_len { base.max_answer_len = v; }
        if let Some(v) = self.top_k          { base.top_k = v; }
        if self.cased {
            base.lowercase = false;
        }
        base
    }
}

#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Text to tokenize
    #[arg(long)]
    pub text: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// The question
    #[arg(long)]
    pub question: String,

    /// Passage text
    #[arg(long, conflicts_with = "context_file", required_unless_present = "context_file")]
    pub context: Option<String>,

    /// File holding the passage text
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    /// Where to write the feature JSON (stdout if absent)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Feature JSON written by `encode`
    #[arg(long)]
    pub feature: PathBuf,

    /// Model output JSON: {"start_logits": [...], "end_logits": [...]}
    #[arg(long)]
    pub logits: PathBuf,

    /// Print answers as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let args = ConfigArgs { top_k: Some(3), cased: true, ..ConfigArgs::default() };
        let cfg = args.apply(QaConfig::default());
        assert_eq!(cfg.top_k, 3);
        assert!(!cfg.lowercase);
        assert_eq!(cfg.max_seq_len, 512);
    }
}
