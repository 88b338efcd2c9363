// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, loads the vocabulary and config,
// and hands off to the pipeline. Output formatting lives here;
// everything else is delegated.

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs,
    path::{Path, PathBuf},
};

use commands::{Commands, ConfigArgs, DecodeArgs, EncodeArgs, TokenizeArgs};

use crate::data::feature_builder::FeatureBuilder;
use crate::domain::answer::Answer;
use crate::domain::config::QaConfig;
use crate::domain::feature::Feature;
use crate::infra::{config_store, vocab_store::VocabStore};
use crate::ml::engine::ModelOutput;
use crate::ml::ranker::AnswerRanker;
use crate::tokenization::{TokenId, Tokenizer};

#[derive(Parser, Debug)]
#[command(
    name = "bert-qa",
    version,
    about = "Encode questions for a BERT-style QA model and decode its logits into answers."
)]
pub struct Cli {
    /// vocab.txt the model was trained with
    #[arg(long, global = true, default_value = "vocab.txt")]
    pub vocab: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        match &self.command {
            Commands::Tokenize(args) => self.run_tokenize(&cfg, args),
            Commands::Encode(args)   => self.run_encode(&cfg, args),
            Commands::Decode(args)   => self.run_decode(&cfg, args),
        }
    }

    fn load_config(&self) -> Result<QaConfig> {
        let base = match &self.config.config {
            Some(path) => config_store::load_config(path)?,
            None       => QaConfig::default(),
        };
        let cfg = self.config.apply(base);
        cfg.validate()?;
        Ok(cfg)
    }

    fn run_tokenize(&self, cfg: &QaConfig, args: &TokenizeArgs) -> Result<()> {
        let vocab = VocabStore::new(&self.vocab).load()?;
        let tokenizer = Tokenizer::new(vocab, cfg.lowercase)
            .with_long_word_policy(cfg.long_word_policy);

        let tokens = tokenizer.tokenize(&args.text);
        for (token, id) in tokens.iter().zip(tokenizer.to_ids(&tokens)) {
            match id {
                TokenId::Mapped(id) => println!("{token}\t{id}"),
                TokenId::Unmapped   => println!("{token}\t<unmapped>"),
            }
        }
        Ok(())
    }

    fn run_encode(&self, cfg: &QaConfig, args: &EncodeArgs) -> Result<()> {
        let context = match (&args.context, &args.context_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Cannot read passage from '{}'", path.display()))?,
            (None, None) => anyhow::bail!("Either --context or --context-file is required"),
        };

        let vocab   = VocabStore::new(&self.vocab).load()?;
        let builder = FeatureBuilder::new(vocab, cfg)?;
        let feature = builder.build(&args.question, &context);
        let json    = serde_json::to_string_pretty(&feature)?;

        match &args.out {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("Cannot write feature to '{}'", path.display()))?;
                tracing::info!("Feature written to '{}'", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }

    fn run_decode(&self, cfg: &QaConfig, args: &DecodeArgs) -> Result<()> {
        let feature: Feature = read_json(&args.feature)?;
        let output: ModelOutput = read_json(&args.logits)?;
        let answers = decode_answers(cfg, &feature, &output)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&answers)?);
            return Ok(());
        }
        if answers.is_empty() {
            println!("No answer found.");
        }
        for (rank, a) in answers.iter().enumerate() {
            let text = if a.is_no_answer() { "<no answer>" } else { a.text.as_str() };
            println!("{}. [{},{}] {:.4} {}", rank + 1, a.span.start, a.span.end, a.span.score, text);
        }
        Ok(())
    }
}

/// Rank `output` against a feature encoded earlier. The feature's own
/// length wins over `--max-seq-len`, which may differ from the run
/// that produced it.
fn decode_answers(cfg: &QaConfig, feature: &Feature, output: &ModelOutput) -> Result<Vec<Answer>> {
    output.check_shape(feature.seq_len())?;
    if feature.seq_len() != cfg.max_seq_len {
        tracing::debug!(
            "Feature has {} positions, config says {}; using the feature's",
            feature.seq_len(),
            cfg.max_seq_len
        );
    }
    let cfg = QaConfig { max_seq_len: feature.seq_len(), ..cfg.clone() };
    Ok(AnswerRanker::new(&cfg).rank(&output.start_logits, &output.end_logits, feature))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::tokenization::Vocabulary;

    #[test]
    fn test_decode_scans_the_whole_feature() {
        let vocab = Arc::new(Vocabulary::from_tokens([
            "[CLS]", "[SEP]", "what", "is", "context", "this", "the", ".", "?",
        ]));
        let encode_cfg = QaConfig { max_seq_len: 20, ..QaConfig::default() };
        let feature = FeatureBuilder::new(vocab, &encode_cfg)
            .unwrap()
            .build("what", "this is the context");

        let mut output = ModelOutput { start_logits: vec![0.0; 20], end_logits: vec![0.0; 20] };
        output.start_logits[4] = 10.0;
        output.end_logits[4]   = 10.0;

        // A shorter --max-seq-len must not hide position 4
        let decode_cfg = QaConfig { max_seq_len: 3, ..QaConfig::default() };
        let answers = decode_answers(&decode_cfg, &feature, &output).unwrap();
        assert_eq!(answers[0].text, "context");
    }

    #[test]
    fn test_vocab_defaults_to_working_directory() {
        let cli = Cli::try_parse_from(["bert-qa", "tokenize", "--text", "hi"]).unwrap();
        assert_eq!(cli.vocab, PathBuf::from("vocab.txt"));

        let cli = Cli::try_parse_from(["bert-qa", "tokenize", "--text", "hi", "--vocab", "m/v.txt"])
            .unwrap();
        assert_eq!(cli.vocab, PathBuf::from("m/v.txt"));
    }

    #[test]
    fn test_decode_rejects_wrong_logit_length() {
        let feature = Feature {
            input_ids:       vec![0; 8],
            input_mask:      vec![0; 8],
            segment_ids:     vec![0; 8],
            orig_tokens:     Vec::new(),
            token_to_origin: Default::default(),
        };
        let output = ModelOutput { start_logits: vec![0.0; 7], end_logits: vec![0.0; 8] };
        assert!(decode_answers(&QaConfig::default(), &feature, &output).is_err());
    }
}
