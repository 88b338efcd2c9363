// ============================================================
// Layer 5 — Answer Ranker
// ============================================================
// Turns the model's start/end logit rows into ranked answers.
//
//   1. Keep the top_k start positions and top_k end positions,
//      considering only positions that map to a passage word.
//   2. Score every (start, end) pair with start ≤ end and
//      length ≤ max_answer_len as start_logit + end_logit.
//   3. Keep the top_k pairs and recover their passage text.
//
// Both selections go through `top_k`, a bounded insertion
// selection. Equal scores keep scan order, so the output is a
// pure function of the inputs. NaN scores rank below every
// number.

use std::cmp::Ordering;

use crate::domain::answer::{Answer, Span};
use crate::domain::config::{QaConfig, OUTPUT_OFFSET};
use crate::domain::feature::Feature;
use crate::error::{QaError, QaResult};

#[derive(Debug, Clone)]
pub struct AnswerRanker {
    max_answer_len: usize,
    top_k:          usize,
    max_seq_len:    usize,
}

impl AnswerRanker {
    pub fn new(config: &QaConfig) -> Self {
        Self {
            max_answer_len: config.max_answer_len,
            top_k:          config.top_k,
            max_seq_len:    config.max_seq_len,
        }
    }

    /// Up to `top_k` logit positions that map to a passage word,
    /// best score first.
    pub fn best_positions(&self, logits: &[f32], feature: &Feature) -> Vec<usize> {
        let scan_len = logits.len().min(self.max_seq_len);
        let candidates = (0..scan_len)
            .filter(|&i| feature.token_to_origin.contains_key(&(i + OUTPUT_OFFSET)))
            .map(|i| (i, logits[i]));

        top_k(candidates, self.top_k)
            .into_iter()
            .map(|(i, _)| i)
            .collect()
    }

    /// Ranked answers, at most `top_k`, highest score first.
    ///
    /// A candidate whose text cannot be recovered is logged and left
    /// out; the rest of the ranking is unaffected.
    pub fn rank(&self, start_logits: &[f32], end_logits: &[f32], feature: &Feature) -> Vec<Answer> {
        let starts = self.best_positions(start_logits, feature);
        let ends   = self.best_positions(end_logits, feature);

        let mut spans = Vec::with_capacity(starts.len() * ends.len());
        for &s in &starts {
            for &e in &ends {
                if e < s {
                    continue;
                }
                if e - s + 1 > self.max_answer_len {
                    continue;
                }
                spans.push(Span::new(s, e, start_logits[s] + end_logits[e]));
            }
        }

        let total = spans.len();
        let best = top_k(spans.into_iter().map(|span| (span, span.score)), self.top_k);
        tracing::debug!("Kept {} of {} candidate spans", best.len(), total);

        best.into_iter()
            .filter_map(|(span, _)| match self.answer_text(feature, &span) {
                Ok(text) => Some(Answer::new(text, span)),
                Err(e) => {
                    tracing::warn!("Dropping span [{}, {}]: {}", span.start, span.end, e);
                    None
                }
            })
            .collect()
    }

    /// Passage words covered by `span`. A span starting at position 0
    /// points at [CLS] and means "no answer", so its text is empty.
    pub fn answer_text(&self, feature: &Feature, span: &Span) -> QaResult<String> {
        if span.start == 0 {
            return Ok(String::new());
        }
        convert_back(feature, span)
    }
}

/// Join the original words from the start position's word to the end
/// position's word, inclusive, with single spaces.
pub fn convert_back(feature: &Feature, span: &Span) -> QaResult<String> {
    let lookup = |pos: usize| {
        let key = pos + OUTPUT_OFFSET;
        feature
            .origin_of(key)
            .ok_or(QaError::IndexMapping { position: key })
    };
    let orig_start = lookup(span.start)?;
    let orig_end   = lookup(span.end)?;

    let words = feature
        .orig_tokens
        .get(orig_start..=orig_end)
        .filter(|_| orig_start <= orig_end)
        .ok_or(QaError::IndexMapping { position: span.end + OUTPUT_OFFSET })?;
    Ok(words.join(" "))
}

/// At most `k` items with the highest scores, best first. Among equal
/// scores the item seen first comes first.
fn top_k<T>(items: impl IntoIterator<Item = (T, f32)>, k: usize) -> Vec<(T, f32)> {
    let mut best: Vec<(T, f32)> = Vec::with_capacity(k + 1);
    if k == 0 {
        return best;
    }
    for (item, score) in items {
        // First slot whose score is strictly lower; ties stay behind earlier items
        let at = best
            .iter()
            .position(|(_, s)| descending(score, *s) == Ordering::Less)
            .unwrap_or(best.len());
        if at < k {
            best.insert(at, (item, score));
            best.truncate(k);
        }
    }
    best
}

// `Less` when `a` should rank before `b`.
fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true)   => Ordering::Equal,
        (true, false)  => Ordering::Greater,
        (false, true)  => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
