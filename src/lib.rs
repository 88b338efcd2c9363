//! Extractive question answering around a BERT-style model.
//!
//! [`FeatureBuilder::build`] encodes a question and passage into the
//! fixed-length rows the model expects; [`AnswerRanker::rank`] turns
//! the model's start/end logits back into ranked passage spans. The
//! model itself is reached through [`InferenceEngine`].

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;
pub mod tokenization;

pub use application::ask_use_case::QaClient;
pub use data::feature_builder::FeatureBuilder;
pub use domain::answer::{Answer, Span};
pub use domain::config::QaConfig;
pub use domain::feature::Feature;
pub use error::{QaError, QaResult};
pub use ml::engine::{InferenceEngine, ModelInput, ModelOutput};
pub use ml::ranker::AnswerRanker;
pub use tokenization::{Tokenizer, Vocabulary};
