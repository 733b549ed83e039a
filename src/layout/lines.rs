//! Physical line grouping and text assembly.

use crate::layout::token::WordToken;
use crate::text::bidi::{dominant_direction, reorder, Direction};
use crate::text::script::{normalize_quotes, strip_direction_marks};
use crate::utils::safe_float_cmp;

/// Maximum `top` difference between consecutive words of one line.
pub const LINE_TOLERANCE: f64 = 10.0;

/// Separator placed between physical lines of one paragraph or footnote.
pub const LINE_SEPARATOR: &str = " | ";

/// Separator placed between paragraphs of body text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Words sharing one physical line, in top order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Words of the line, not yet reordered
    pub tokens: Vec<WordToken>,
}

impl Line {
    /// Top of the first word.
    pub fn top(&self) -> f64 {
        self.tokens.first().map_or(0.0, |t| t.top)
    }

    /// Dominant direction of the line.
    pub fn direction(&self) -> Direction {
        dominant_direction(&self.tokens)
    }

    /// Reordered text of the line, words joined by one space.
    pub fn text(&self, carried_rtl_state: bool) -> String {
        let words: Vec<String> = reorder(&self.tokens, carried_rtl_state)
            .into_iter()
            .filter(|t| t.has_text())
            .map(|t| normalize_quotes(&t.text))
            .collect();
        words.join(" ").trim().to_string()
    }
}

/// Group text-bearing tokens into physical lines.
///
/// Tokens are stably sorted by `top`; a new line starts whenever a token's
/// `top` differs from the previous token's by more than [`LINE_TOLERANCE`].
/// Structural records and blank words are skipped.
pub fn group_lines(tokens: &[WordToken]) -> Vec<Line> {
    let mut words: Vec<&WordToken> = tokens
        .iter()
        .filter(|t| !t.is_structural() && t.has_text())
        .collect();
    words.sort_by(|a, b| safe_float_cmp(a.top, b.top));

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<WordToken> = Vec::new();
    let mut previous_top: Option<f64> = None;

    for word in words {
        if let Some(prev) = previous_top {
            if (word.top - prev).abs() > LINE_TOLERANCE && !current.is_empty() {
                lines.push(Line {
                    tokens: std::mem::take(&mut current),
                });
            }
        }
        current.push(word.clone());
        previous_top = Some(word.top);
    }
    if !current.is_empty() {
        lines.push(Line { tokens: current });
    }

    lines
}

/// Assemble the text of one paragraph or footnote.
///
/// Lines are reordered individually and joined with [`LINE_SEPARATOR`]. Once
/// an RTL line has been seen, following lines are reordered with the carried
/// RTL state set.
pub fn assemble_text(tokens: &[WordToken], strip_marks: bool) -> String {
    let mut carried_rtl = false;
    let mut parts: Vec<String> = Vec::new();

    for line in group_lines(tokens) {
        let text = line.text(carried_rtl);
        if line.direction() == Direction::Rtl {
            carried_rtl = true;
        }
        if !text.is_empty() {
            parts.push(text);
        }
    }

    let joined = parts.join(LINE_SEPARATOR);
    if strip_marks {
        strip_direction_marks(&joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::script::LRM;

    fn word(left: f64, top: f64, text: &str) -> WordToken {
        WordToken::new(left, top, 50.0, 25.0, 90.0, text)
    }

    #[test]
    fn test_group_lines_tolerance() {
        let tokens = vec![
            word(100.0, 100.0, "a"),
            word(200.0, 108.0, "b"),
            word(300.0, 117.0, "c"),
            word(100.0, 140.0, "d"),
        ];
        let lines = group_lines(&tokens);
        // 100 -> 108 -> 117 chains into one line
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tokens.len(), 3);
        assert_eq!(lines[1].top(), 140.0);
    }

    #[test]
    fn test_group_lines_skips_structure() {
        let tokens = vec![
            WordToken::structural(0.0, 0.0, 900.0, 300.0),
            word(100.0, 100.0, "a"),
            word(200.0, 100.0, "  "),
        ];
        let lines = group_lines(&tokens);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].tokens.len(), 1);
    }

    #[test]
    fn test_group_lines_sorts_by_top() {
        let tokens = vec![word(100.0, 200.0, "second"), word(100.0, 100.0, "first")];
        let lines = group_lines(&tokens);
        assert_eq!(lines[0].tokens[0].text, "first");
        assert_eq!(lines[1].tokens[0].text, "second");
    }

    #[test]
    fn test_assemble_text_joins_lines() {
        let tokens = vec![
            word(900.0, 100.0, "שורה"),
            word(800.0, 100.0, "ראשונה"),
            word(900.0, 140.0, "שורה"),
            word(800.0, 140.0, "שנייה"),
        ];
        assert_eq!(assemble_text(&tokens, true), "שורה ראשונה | שורה שנייה");
    }

    #[test]
    fn test_assemble_text_normalizes_quotes() {
        let tokens = vec![word(900.0, 100.0, "«ספר»"), word(800.0, 100.0, "צה״ל")];
        assert_eq!(assemble_text(&tokens, true), "\"ספר\" צה\"ל");
    }

    #[test]
    fn test_assemble_text_strip_marks() {
        let marked = format!("abc{}", LRM);
        let tokens = vec![word(100.0, 100.0, &marked), word(200.0, 100.0, "def")];
        assert_eq!(assemble_text(&tokens, true), "abc def");
        assert_eq!(assemble_text(&tokens, false), format!("abc{} def", LRM));
    }

    #[test]
    fn test_assemble_text_empty() {
        assert_eq!(assemble_text(&[], true), "");
    }
}
