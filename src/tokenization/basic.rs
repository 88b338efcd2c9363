// ============================================================
// Tokenization — Basic Tokenizer
// ============================================================
// First pass over raw text, before any vocabulary lookup:
//
//   raw text
//       │  clean            drop control / invalid characters
//       ▼
//   split on ' '          literal space only (see below)
//       │  lowercase        optional, per piece
//       ▼
//   split punctuation     every punctuation char is its own token
//       │
//       ▼
//   rejoin with ' ' and split on ' ' again
//
// The whitespace split is deliberately narrow: only U+0020
// separates words here. Tabs and newlines survive `clean` and
// stay inside a token. FeatureBuilder splits the passage on
// every whitespace run before it reaches this code, so the
// narrow rule only shows on query text.

use super::char_class;

#[derive(Debug, Clone)]
pub struct BasicTokenizer {
    lowercase: bool,
}

impl BasicTokenizer {
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }

    /// Remove every control or invalid character; whitespace is kept as-is.
    pub fn clean(text: &str) -> String {
        text.chars()
            .filter(|&c| !char_class::is_control(c) && !char_class::is_invalid(c))
            .collect()
    }

    /// Split on the literal space character. Empty pieces from
    /// consecutive spaces are dropped.
    pub fn split_whitespace(text: &str) -> Vec<&str> {
        text.split(' ').filter(|piece| !piece.is_empty()).collect()
    }

    /// Break a token around punctuation, keeping order.
    ///
    /// `"don't!"` → `["don", "'", "t", "!"]`
    pub fn split_punctuation(token: &str) -> Vec<String> {
        let mut pieces: Vec<String> = Vec::new();
        let mut start_new_word = true;

        for c in token.chars() {
            if char_class::is_punctuation(c) {
                pieces.push(c.to_string());
                start_new_word = true;
            } else {
                if start_new_word {
                    pieces.push(String::new());
                    start_new_word = false;
                }
                if let Some(last) = pieces.last_mut() {
                    last.push(c);
                }
            }
        }

        pieces
    }

    /// Full basic tokenization. No returned token contains a space.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = Self::clean(text);

        let mut joined = String::with_capacity(cleaned.len() * 2);
        for piece in Self::split_whitespace(&cleaned) {
            let piece = if self.lowercase {
                piece.to_lowercase()
            } else {
                piece.to_string()
            };
            for sub in Self::split_punctuation(&piece) {
                joined.push_str(&sub);
                joined.push(' ');
            }
        }

        Self::split_whitespace(&joined)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
