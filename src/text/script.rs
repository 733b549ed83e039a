//! Character classification for two-script (Hebrew/Latin) text.
//!
//! The reordering engine only needs to know whether a character is a Hebrew
//! letter, a Latin letter, or one of the explicit bidi control characters.
//! Everything else (digits, punctuation, symbols) is neutral.

/// LEFT-TO-RIGHT MARK: forces the following run to be read LTR.
pub const LRM: char = '\u{200E}';

/// RIGHT-TO-LEFT MARK: forces the following run to be read RTL.
pub const RLM: char = '\u{200F}';

/// Every bidi formatting character removed by [`strip_direction_marks`].
pub const DIRECTION_CONTROLS: [char; 11] = [
    '\u{200E}', '\u{200F}', // marks
    '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}', // embeddings, overrides
    '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}', // isolates
];

/// Quote variants OCR emits for a plain double quote.
const QUOTE_VARIANTS: [char; 16] = [
    '«', '»', '“', '”', '„', '‟', '❝', '❞', '❠', '〞', '〟', '＂', '🙶', '🙷', '🙸', '״',
];

/// True for Hebrew letters, final forms included (U+05D0..=U+05EA).
///
/// Points and cantillation marks are not letters.
pub fn is_rtl_letter(c: char) -> bool {
    ('\u{05D0}'..='\u{05EA}').contains(&c)
}

/// True for Latin letters `A-Z` and `a-z`.
pub fn is_ltr_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True when `c` is one of [`DIRECTION_CONTROLS`].
pub fn is_direction_control(c: char) -> bool {
    DIRECTION_CONTROLS.contains(&c)
}

/// True if any character of `text` is a Hebrew letter.
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_letter)
}

/// True if any character of `text` is a Latin letter.
pub fn contains_ltr(text: &str) -> bool {
    text.chars().any(is_ltr_letter)
}

/// Remove all bidi formatting characters from `text`.
pub fn strip_direction_marks(text: &str) -> String {
    text.chars().filter(|c| !is_direction_control(*c)).collect()
}

/// Replace typographic quote variants with a plain `"`.
pub fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| if QUOTE_VARIANTS.contains(&c) { '"' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hebrew_letters() {
        assert!(is_rtl_letter('א'));
        assert!(is_rtl_letter('ת'));
        assert!(is_rtl_letter('ך'));
        assert!(!is_rtl_letter('\u{05B0}')); // sheva
        assert!(!is_rtl_letter('a'));
        assert!(!is_rtl_letter('5'));
    }

    #[test]
    fn test_latin_letters() {
        assert!(is_ltr_letter('a'));
        assert!(is_ltr_letter('Z'));
        assert!(!is_ltr_letter('é'));
        assert!(!is_ltr_letter('ש'));
        assert!(!is_ltr_letter('('));
    }

    #[test]
    fn test_contains() {
        assert!(contains_rtl("(שלום)"));
        assert!(!contains_rtl("(Introduction)"));
        assert!(contains_ltr("p. 12"));
        assert!(!contains_ltr("12-14"));
    }

    #[test]
    fn test_strip_direction_marks() {
        let text = format!("{}abc{}\u{2067}ד\u{2069}", LRM, RLM);
        assert_eq!(strip_direction_marks(&text), "abcד");
        assert_eq!(strip_direction_marks("plain"), "plain");
    }

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(normalize_quotes("«שלום»"), "\"שלום\"");
        assert_eq!(normalize_quotes("צה״ל"), "צה\"ל");
        assert_eq!(normalize_quotes("“quoted”"), "\"quoted\"");
        assert_eq!(normalize_quotes("it's"), "it's");
    }
}
