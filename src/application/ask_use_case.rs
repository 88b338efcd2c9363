// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// One question about one passage, end to end:
//   1. Encode the pair into a fixed-length feature
//   2. Run the model on the feature's three rows
//   3. Check the logit rows have the feature's length
//   4. Rank spans and recover their passage text
//
// The client holds no per-call state, so one instance can serve
// concurrent callers as long as the engine can.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::feature_builder::FeatureBuilder;
use crate::domain::answer::Answer;
use crate::domain::config::QaConfig;
use crate::domain::feature::Feature;
use crate::domain::traits::QuestionAnswerer;
use crate::ml::engine::{InferenceEngine, ModelInput, ModelOutput};
use crate::ml::ranker::AnswerRanker;
use crate::tokenization::Vocabulary;

pub struct QaClient<E> {
    builder: FeatureBuilder,
    ranker:  AnswerRanker,
    engine:  E,
}

impl<E: InferenceEngine> QaClient<E> {
    pub fn new(vocab: Arc<Vocabulary>, config: &QaConfig, engine: E) -> Result<Self> {
        let builder = FeatureBuilder::new(vocab, config)
            .context("Cannot build feature converter from config")?;
        let ranker = AnswerRanker::new(config);
        tracing::info!(
            "QA client ready (max_seq_len={}, top_k={})",
            config.max_seq_len,
            config.top_k
        );
        Ok(Self { builder, ranker, engine })
    }

    pub fn predict(&self, question: &str, context: &str) -> Result<Vec<Answer>> {
        tracing::debug!("Convert feature...");
        let feature = self.builder.build(question, context);

        tracing::debug!("Run inference...");
        let output = self
            .engine
            .infer(&ModelInput::from(&feature))
            .context("Inference engine failed")?;

        tracing::debug!("Convert answers...");
        let answers = self.decode(&feature, &output)?;

        tracing::debug!("Finished with {} answers", answers.len());
        Ok(answers)
    }

    /// Rank a model output that was produced for `feature`.
    pub fn decode(&self, feature: &Feature, output: &ModelOutput) -> Result<Vec<Answer>> {
        output.check_shape(feature.seq_len())?;
        Ok(self.ranker.rank(&output.start_logits, &output.end_logits, feature))
    }
}

impl<E: InferenceEngine> QuestionAnswerer for QaClient<E> {
    fn answer(&self, question: &str, context: &str) -> Result<Vec<Answer>> {
        self.predict(question, context)
    }
}
