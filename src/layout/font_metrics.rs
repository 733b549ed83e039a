//! Font size estimation from OCR word boxes.
//!
//! An OCR box spans from the highest ascender to the lowest descender of the
//! word, so raw box height overstates the font size of words like "לקח" or
//! "Typography". The estimator corrects for that by looking at which glyph
//! classes the word contains.

use crate::layout::token::WordToken;

/// Glyphs that rise above the x-height: Hebrew lamed, Latin capitals and
/// the tall Latin lowercase letters.
fn is_ascender(c: char) -> bool {
    c == 'ל' || c.is_ascii_uppercase() || matches!(c, 'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't')
}

/// Glyphs that drop below the baseline: Hebrew final forms, qof and the
/// Latin descenders.
fn is_descender(c: char) -> bool {
    matches!(c, 'ך' | 'ן' | 'ף' | 'ץ' | 'ק' | 'g' | 'j' | 'p' | 'q' | 'y')
}

/// Height and text of one word, the two inputs of the estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSample {
    /// Box height in raster pixels
    pub height: f64,
    /// Recognized text
    pub text: String,
}

impl GlyphSample {
    /// Create a sample.
    pub fn new(height: f64, text: impl Into<String>) -> Self {
        Self {
            height,
            text: text.into(),
        }
    }
}

impl From<&WordToken> for GlyphSample {
    fn from(token: &WordToken) -> Self {
        Self::new(token.height, token.text.clone())
    }
}

/// Estimate the font size of a word from its box height.
///
/// - no ascender and no descender: `height`, or `height - 3` when the text
///   contains a comma
/// - both: `height / 2`
/// - exactly one: `height * 2 / 3`
///
/// Results are truncated toward zero.
///
/// ```
/// use folio_oxide::layout::estimate_font_size;
///
/// assert_eq!(estimate_font_size(20.0, "שמש"), 20);
/// assert_eq!(estimate_font_size(20.0, "של"), 13);
/// assert_eq!(estimate_font_size(20.0, "לק"), 10);
/// ```
pub fn estimate_font_size(height: f64, text: &str) -> i64 {
    let has_ascender = text.chars().any(is_ascender);
    let has_descender = text.chars().any(is_descender);

    let size = match (has_ascender, has_descender) {
        (false, false) if text.contains(',') => height - 3.0,
        (false, false) => height,
        (true, true) => height / 2.0,
        _ => height * 2.0 / 3.0,
    };
    size as i64
}

/// True when the box height of `text` can be trusted as its font size.
///
/// Requires no ascender, no descender and at least one glyph other than
/// yod, whose short stroke makes a yod-only box unreliable.
pub fn is_full_height_word(text: &str) -> bool {
    !text.chars().any(is_ascender)
        && !text.chars().any(is_descender)
        && text.chars().any(|c| c != 'י')
}

/// Font size used when aggregating paragraph statistics.
///
/// Full-height words report their raw height, everything else the
/// estimate from [`estimate_font_size`].
pub fn adjusted_font_size(sample: GlyphSample) -> f64 {
    if is_full_height_word(&sample.text) {
        sample.height
    } else {
        estimate_font_size(sample.height, &sample.text) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ascender_no_descender() {
        assert_eq!(estimate_font_size(20.0, "שמש"), 20);
        assert_eq!(estimate_font_size(20.0, "aceo"), 20);
    }

    #[test]
    fn test_comma_lowers_estimate() {
        assert_eq!(estimate_font_size(20.0, "שמ,ש"), 17);
    }

    #[test]
    fn test_single_class() {
        // lamed rises above the line
        assert_eq!(estimate_font_size(20.0, "של"), 13);
        // final nun drops below it
        assert_eq!(estimate_font_size(20.0, "אמן"), 13);
        assert_eq!(estimate_font_size(30.0, "Word"), 20);
    }

    #[test]
    fn test_both_classes() {
        assert_eq!(estimate_font_size(20.0, "לק"), 10);
        assert_eq!(estimate_font_size(21.0, "Typography"), 10);
    }

    #[test]
    fn test_comma_ignored_when_classified() {
        assert_eq!(estimate_font_size(30.0, "של,"), 20);
    }

    #[test]
    fn test_full_height_word() {
        assert!(is_full_height_word("שמש"));
        assert!(is_full_height_word("יש"));
        assert!(!is_full_height_word("יי"));
        assert!(!is_full_height_word("של"));
        assert!(!is_full_height_word(""));
        assert!(is_full_height_word("12"));
    }

    #[test]
    fn test_adjusted_font_size() {
        assert_eq!(adjusted_font_size(GlyphSample::new(24.0, "שמש")), 24.0);
        assert_eq!(adjusted_font_size(GlyphSample::new(24.0, "לק")), 12.0);
        // yod-only falls back to the estimate, which is the height here
        assert_eq!(adjusted_font_size(GlyphSample::new(24.5, "י")), 24.0);
    }
}
