// ============================================================
// Tokenization — Character Classifier
// ============================================================
// Per-character predicates driven by the Unicode general
// category. Every tokenizer decision about "is this a word
// boundary / junk / punctuation" goes through these four
// functions, so they have to match the vocabulary's training
// tokenizer exactly.

use unicode_general_category::{get_general_category, GeneralCategory};

/// NUL and U+FFFD (the replacement character) are never kept.
pub fn is_invalid(c: char) -> bool {
    c == '\0' || c == '\u{FFFD}'
}

/// Control (Cc) or Format (Cf), except characters that count as whitespace.
///
/// Tab, newline and carriage return are Cc but are whitespace, so
/// `clean` keeps them.
pub fn is_control(c: char) -> bool {
    if is_whitespace(c) {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::Control | GeneralCategory::Format
    )
}

/// Standard whitespace, or any Space / Line / Paragraph separator.
pub fn is_whitespace(c: char) -> bool {
    if is_standard_whitespace(c) {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Any of the seven punctuation (P*) categories.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

// The ASCII layout characters plus the four information separators
// (U+001C..U+001F), which the model's tokenizer treats as whitespace.
fn is_standard_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{1C}'..='\u{1F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_chars() {
        assert!(is_invalid('\0'));
        assert!(is_invalid('\u{FFFD}'));
        assert!(!is_invalid('a'));
    }

    #[test]
    fn test_layout_chars_are_whitespace_not_control() {
        for c in ['\t', '\n', '\r', ' '] {
            assert!(is_whitespace(c), "{c:?} should be whitespace");
            assert!(!is_control(c), "{c:?} should not be control");
        }
    }

    #[test]
    fn test_control_and_format_chars() {
        // U+0001 is Cc, U+200B (zero width space) is Cf
        assert!(is_control('\u{01}'));
        assert!(is_control('\u{200B}'));
        assert!(!is_control('a'));
    }

    #[test]
    fn test_separators_are_whitespace() {
        assert!(is_whitespace('\u{00A0}')); // no-break space, Zs
        assert!(is_whitespace('\u{2028}')); // line separator, Zl
        assert!(is_whitespace('\u{2029}')); // paragraph separator, Zp
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn test_punctuation_categories() {
        for c in ['_', '-', '(', ')', '\u{AB}', '\u{BB}', '!', '?', '.', ','] {
            assert!(is_punctuation(c), "{c:?} should be punctuation");
        }
        // Symbols (S*) are not punctuation
        for c in ['$', '+', '^', '`'] {
            assert!(!is_punctuation(c), "{c:?} should not be punctuation");
        }
    }
}
