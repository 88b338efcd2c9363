// ============================================================
// Tokenization — Vocabulary
// ============================================================
// Closed set of subword strings with stable integer ids.
// Built once from an ordered token list (index = id) and then
// only read, so it is shared between pipeline stages as an
// `Arc<Vocabulary>` without any locking.

use std::collections::HashMap;

pub const UNKNOWN_TOKEN: &str = "[UNK]";
pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";
pub const PAD_ID: u32 = 0;

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids:    HashMap<String, u32>,
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Build from tokens in id order. A token listed twice keeps the
    /// id of its last occurrence.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut ids = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if ids.insert(token.clone(), id as u32).is_some() {
                tracing::debug!("Duplicate vocabulary entry '{}' now maps to {}", token, id);
            }
        }
        Self { ids, tokens }
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Id of `[UNK]`, if the vocabulary has one.
    pub fn unknown_id(&self) -> Option<u32> {
        self.id(UNKNOWN_TOKEN)
    }

    /// Number of lines the vocabulary was built from.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
