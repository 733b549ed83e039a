//! Script-driven reordering of one physical line of OCR words.
//!
//! This is not the Unicode Bidirectional Algorithm. A line is sorted by
//! horizontal position in the direction of its dominant script, then runs of
//! the other script are collected in a side buffer and spliced back in
//! reverse. Direction changes are detected from the script of the next word
//! or from an explicit LRM/RLM at the end of a word.

use crate::layout::token::WordToken;
use crate::text::script::{contains_ltr, contains_rtl, LRM, RLM};
use crate::utils::safe_float_cmp;
use lazy_static::lazy_static;
use regex::Regex;

/// Number of leading words inspected to pick the dominant direction.
const DOMINANCE_WINDOW: usize = 3;

lazy_static! {
    /// Closing cluster at the end of a run's last word, with an optional direction mark
    static ref RE_CLOSING_CLUSTER: Regex =
        Regex::new(r"[\p{P}\p{S}]*[)\]][\x{200E}\x{200F}]?$").unwrap();

    /// Opening cluster at the start of a run's first word
    static ref RE_OPENING_CLUSTER: Regex = Regex::new(r"^[(\[][\p{P}\p{S}]*").unwrap();
}

/// Reading direction of a run or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right (Latin)
    Ltr,
    /// Right to left (Hebrew)
    Rtl,
}

/// Dominant direction of a line: RTL if one of its first three words, in
/// input order, contains a Hebrew letter.
pub fn dominant_direction(tokens: &[WordToken]) -> Direction {
    if tokens
        .iter()
        .take(DOMINANCE_WINDOW)
        .any(|t| contains_rtl(&t.text))
    {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

/// Direction that applies after `text`, given the word that follows it.
///
/// `None` means no signal; the current direction continues.
fn direction_after(text: &str, next: Option<&WordToken>) -> Option<Direction> {
    if text.ends_with(LRM) {
        return Some(Direction::Ltr);
    }
    if text.ends_with(RLM) {
        return Some(Direction::Rtl);
    }
    let next = next?;
    if contains_rtl(&next.text) {
        Some(Direction::Rtl)
    } else if contains_ltr(&next.text) {
        Some(Direction::Ltr)
    } else {
        None
    }
}

fn mirror(c: char) -> char {
    match c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        other => other,
    }
}

/// Mirror every bracket of a cluster and reverse it.
fn flip_cluster(cluster: &str) -> String {
    cluster
        .chars()
        .filter(|&c| c != LRM && c != RLM)
        .rev()
        .map(mirror)
        .collect()
}

/// Move the brackets at the outer edges of a reversed run to the opposite end.
///
/// OCR of a Latin phrase inside Hebrew reports `The Book)` for what reads
/// `(The Book` once the run is reversed. A closing cluster at the end of the
/// last word becomes an opening cluster at the start of the first word, and
/// an opening cluster at the start of the first word becomes a closing
/// cluster at the end of the last. Both clusters are taken from the words as
/// they were before either move, so a run bracketed on both sides comes out
/// unchanged. A direction mark after the closing cluster is dropped.
fn repair_brackets(run: &mut [WordToken]) {
    if run.len() < 2 {
        return;
    }
    let last = run.len() - 1;

    let closing = RE_CLOSING_CLUSTER.find(&run[last].text).map(|m| m.start());
    let opening = RE_OPENING_CLUSTER.find(&run[0].text).map(|m| m.end());
    if closing.is_none() && opening.is_none() {
        return;
    }

    let (prefix, first_base) = match opening {
        Some(end) => (flip_cluster(&run[0].text[..end]), run[0].text[end..].to_string()),
        None => (String::new(), run[0].text.clone()),
    };
    let (suffix, last_base) = match closing {
        Some(start) => (
            flip_cluster(&run[last].text[start..]),
            run[last].text[..start].to_string(),
        ),
        None => (String::new(), run[last].text.clone()),
    };

    // the cluster taken from the last word opens the first, and vice versa
    run[0].text = format!("{}{}", suffix, first_base);
    run[last].text = format!("{}{}", last_base, prefix);
}

/// Splice a reversed side run into the output.
fn flush(
    output: &mut Vec<WordToken>,
    side: &mut Vec<WordToken>,
    main: Direction,
    repair: bool,
) {
    if side.is_empty() {
        return;
    }
    let mut run: Vec<WordToken> = side.drain(..).rev().collect();
    if repair {
        repair_brackets(&mut run);
    }
    match main {
        Direction::Rtl => output.extend(run),
        Direction::Ltr => {
            run.append(output);
            *output = run;
        },
    }
}

/// Reorder the words of one physical line into logical reading order.
///
/// Words are sorted by descending `left` when the line is RTL-dominant and by
/// ascending `left` otherwise (stable, so ties keep input order). Runs in the
/// other script are reversed and spliced back: appended at the point where
/// they end on RTL lines, prepended to everything read so far on LTR lines.
/// Words with blank text are dropped.
///
/// `carried_rtl_state` marks a line that follows an RTL line of the same
/// paragraph; it enables bracket repair on LTR-dominant lines but never
/// changes the dominant direction. Geometry is never modified.
///
/// ```
/// use folio_oxide::layout::WordToken;
/// use folio_oxide::text::reorder;
///
/// let line = vec![
///     WordToken::new(100.0, 0.0, 80.0, 20.0, 90.0, "לספר"),
///     WordToken::new(900.0, 0.0, 80.0, 20.0, 90.0, "מבוא"),
///     WordToken::new(500.0, 0.0, 200.0, 20.0, 90.0, "(Introduction)"),
/// ];
/// let texts: Vec<String> = reorder(&line, false).into_iter().map(|t| t.text).collect();
/// assert_eq!(texts, ["מבוא", "(Introduction)", "לספר"]);
/// ```
pub fn reorder(tokens: &[WordToken], carried_rtl_state: bool) -> Vec<WordToken> {
    if tokens.len() <= 1 {
        return tokens.to_vec();
    }

    let main = dominant_direction(tokens);
    let mut sorted: Vec<&WordToken> = tokens.iter().collect();
    match main {
        Direction::Rtl => sorted.sort_by(|a, b| safe_float_cmp(b.left, a.left)),
        Direction::Ltr => sorted.sort_by(|a, b| safe_float_cmp(a.left, b.left)),
    }
    let repair = main == Direction::Rtl || carried_rtl_state;

    let mut output: Vec<WordToken> = Vec::with_capacity(tokens.len());
    let mut side: Vec<WordToken> = Vec::new();
    let mut dir = main;

    for (i, token) in sorted.iter().enumerate() {
        if !token.has_text() {
            continue;
        }
        let prev_dir = dir;
        if dir == main {
            output.push((*token).clone());
        } else {
            side.push((*token).clone());
        }

        if let Some(next_dir) = direction_after(&token.text, sorted.get(i + 1).copied()) {
            dir = next_dir;
        }

        if dir != prev_dir && prev_dir != main {
            flush(&mut output, &mut side, main, repair);
        }
    }
    flush(&mut output, &mut side, main, repair);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(left: f64, text: &str) -> WordToken {
        WordToken::new(left, 100.0, 60.0, 30.0, 95.0, text)
    }

    fn texts(tokens: &[WordToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(reorder(&[], false).is_empty());
        let single = vec![word(10.0, "")];
        assert_eq!(reorder(&single, true), single);
    }

    #[test]
    fn test_dominant_direction_window() {
        let line = vec![word(0.0, "a"), word(10.0, "b"), word(20.0, "c"), word(30.0, "ד")];
        assert_eq!(dominant_direction(&line), Direction::Ltr);
        let line = vec![word(0.0, "a"), word(10.0, "12"), word(20.0, "ג")];
        assert_eq!(dominant_direction(&line), Direction::Rtl);
    }

    #[test]
    fn test_pure_hebrew_sorted_right_to_left() {
        let line = vec![word(100.0, "ג"), word(300.0, "א"), word(200.0, "ב")];
        assert_eq!(texts(&reorder(&line, false)), ["א", "ב", "ג"]);
    }

    #[test]
    fn test_pure_latin_sorted_left_to_right() {
        let line = vec![word(300.0, "c"), word(100.0, "a"), word(200.0, "b")];
        assert_eq!(texts(&reorder(&line, false)), ["a", "b", "c"]);
    }

    #[test]
    fn test_latin_run_inside_hebrew_is_reversed() {
        // "The" sits left of "Book" on the page
        let line = vec![
            word(900.0, "ראה"),
            word(500.0, "The"),
            word(650.0, "Book"),
            word(100.0, "ספר"),
        ];
        assert_eq!(texts(&reorder(&line, false)), ["ראה", "The", "Book", "ספר"]);
    }

    #[test]
    fn test_hebrew_run_inside_latin_is_prepended() {
        let line = vec![
            word(100.0, "see"),
            word(400.0, "here"),
            word(500.0, "now"),
            word(300.0, "בית"),
            word(200.0, "ספר"),
        ];
        // the reversed Hebrew run goes in front of everything read so far
        assert_eq!(texts(&reorder(&line, false)), ["בית", "ספר", "see", "here", "now"]);
    }

    #[test]
    fn test_explicit_marks_switch_direction() {
        let ltr_forced = format!("12{}", LRM);
        let line = vec![
            word(900.0, "אבג"),
            word(700.0, &ltr_forced),
            word(500.0, "34"),
            word(300.0, "דהו"),
        ];
        // the LRM opens an LTR run holding only "34"
        let out = reorder(&line, false);
        assert_eq!(texts(&out), ["אבג", ltr_forced.as_str(), "34", "דהו"]);
    }

    #[test]
    fn test_blank_tokens_dropped() {
        let line = vec![word(300.0, "א"), word(200.0, " "), word(100.0, "ב")];
        assert_eq!(texts(&reorder(&line, false)), ["א", "ב"]);
    }

    #[test]
    fn test_closing_bracket_moves_to_run_start() {
        let line = vec![
            word(900.0, "מבוא"),
            word(500.0, "Introduction"),
            word(650.0, "Book)"),
            word(100.0, "לספר"),
        ];
        assert_eq!(
            texts(&reorder(&line, false)),
            ["מבוא", "(Introduction", "Book", "לספר"]
        );
    }

    #[test]
    fn test_opening_bracket_moves_to_run_end() {
        let line = vec![
            word(900.0, "מבוא"),
            word(500.0, "(Introduction"),
            word(650.0, "Book"),
            word(100.0, "לספר"),
        ];
        assert_eq!(
            texts(&reorder(&line, false)),
            ["מבוא", "Introduction", "Book)", "לספר"]
        );
    }

    #[test]
    fn test_outward_brackets_untouched() {
        let line = vec![
            word(900.0, "מבוא"),
            word(500.0, "(The"),
            word(650.0, "Book)"),
            word(100.0, "לספר"),
        ];
        assert_eq!(texts(&reorder(&line, false)), ["מבוא", "(The", "Book)", "לספר"]);
    }

    #[test]
    fn test_closing_cluster_flipped_and_mark_dropped() {
        let mut run = vec![word(0.0, "x"), word(0.0, &format!("y.]){}", RLM))];
        repair_brackets(&mut run);
        assert_eq!(run[0].text, "([.x");
        assert_eq!(run[1].text, "y");
    }

    #[test]
    fn test_both_clusters_leave_run_unchanged() {
        let mut run = vec![word(0.0, "([x"), word(0.0, "y])")];
        repair_brackets(&mut run);
        assert_eq!(texts(&run), ["([x", "y])"]);
    }

    #[test]
    fn test_single_word_run_untouched() {
        let mut run = vec![word(0.0, "x)")];
        repair_brackets(&mut run);
        assert_eq!(run[0].text, "x)");
    }

    #[test]
    fn test_ltr_line_repairs_only_with_carried_state() {
        let line = vec![
            word(100.0, "see"),
            word(400.0, "here"),
            word(500.0, "now"),
            word(200.0, "ב"),
            word(300.0, "(א"),
        ];
        let plain = reorder(&line, false);
        assert_eq!(texts(&plain), ["(א", "ב", "see", "here", "now"]);
        let carried = reorder(&line, true);
        assert_eq!(texts(&carried), ["א", "ב)", "see", "here", "now"]);
    }

    #[test]
    fn test_geometry_untouched() {
        let line = vec![word(900.0, "מבוא"), word(500.0, ")The"), word(650.0, "Book(")];
        let out = reorder(&line, false);
        let mut lefts: Vec<f64> = out.iter().map(|t| t.left).collect();
        lefts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(lefts, vec![500.0, 650.0, 900.0]);
    }
}
