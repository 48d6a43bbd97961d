//! Live word/character counting for the status bar.

/// Word and character totals for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextCounts {
    pub words: usize,
    pub chars: usize,
}

/// Returns true for the characters that separate words.
///
/// Only space, carriage return and line feed split words. Tab is
/// deliberately not a delimiter, so tab-indented text counts the
/// indentation as part of the first word on the line.
fn is_word_delimiter(c: char) -> bool {
    c == ' ' || c == '\r' || c == '\n'
}

/// Compute word and character counts for `text`.
///
/// Characters are counted as Unicode scalar values. Words are maximal
/// runs of non-delimiter characters.
pub fn count_text(text: &str) -> TextCounts {
    let chars = text.chars().count();
    let words = text.split(is_word_delimiter).filter(|w| !w.is_empty()).count();

    TextCounts { words, chars }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_zero() {
        assert_eq!(count_text(""), TextCounts { words: 0, chars: 0 });
    }

    #[test]
    fn consecutive_spaces_do_not_create_words() {
        assert_eq!(count_text("a b  c"), TextCounts { words: 3, chars: 6 });
    }

    #[test]
    fn tab_is_not_a_delimiter() {
        assert_eq!(count_text("a\tb"), TextCounts { words: 1, chars: 3 });
    }

    #[test]
    fn newlines_split_words() {
        assert_eq!(count_text("one\ntwo\r\nthree"), TextCounts { words: 3, chars: 14 });
    }

    #[test]
    fn chars_count_unicode_scalars() {
        assert_eq!(count_text("héllo"), TextCounts { words: 1, chars: 5 });
    }
}
