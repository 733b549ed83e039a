//! Paragraph segmentation tests
//!
//! Boundary detection on structural record runs and paragraph validation on
//! whole pages.

use folio_oxide::config::ThresholdConfig;
use folio_oxide::layout::{PageId, ParagraphSegmenter, WordToken, PARAGRAPH_GAP};

fn marker(top: f64) -> WordToken {
    WordToken::structural(120.0, top, 960.0, 36.0)
}

fn word(left: f64, top: f64, text: &str) -> WordToken {
    WordToken::new(left, top, 120.0, 36.0, 90.0, text)
}

/// A block record triple followed by one line of words.
fn block(top: f64, texts: &[&str]) -> Vec<WordToken> {
    let mut rows = vec![marker(top), marker(top), marker(top)];
    rows.extend(
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| word(1000.0 - 150.0 * i as f64, top, t)),
    );
    rows
}

fn two_blocks(gap: f64) -> Vec<WordToken> {
    let mut rows = block(200.0, &["אבג", "דהו", "זחט", "מנס"]);
    rows.extend(block(200.0 + gap, &["עפצ", "שתא", "בגד", "הוז"]));
    rows
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_gap_at_threshold_splits() {
    let candidates = ParagraphSegmenter::split_rows(&two_blocks(PARAGRAPH_GAP));
    assert_eq!(candidates.len(), 2);
}

#[test]
fn test_gap_below_threshold_does_not_split() {
    let candidates = ParagraphSegmenter::split_rows(&two_blocks(PARAGRAPH_GAP - 1.0));
    assert_eq!(candidates.len(), 1);
}

#[test]
fn test_every_row_lands_in_one_candidate() {
    let rows = two_blocks(300.0);
    let candidates = ParagraphSegmenter::split_rows(&rows);
    let flattened: Vec<WordToken> = candidates.into_iter().flatten().collect();
    assert_eq!(flattened, rows);
}

#[test]
fn test_noise_markers_inside_paragraph_are_ignored() {
    let mut rows = block(200.0, &["אבג", "דהו"]);
    // a single low-confidence record in the middle of a line
    rows.push(marker(260.0));
    rows.push(word(1000.0, 260.0, "זחט"));
    rows.push(marker(300.0));
    rows.push(marker(300.0));
    rows.push(word(1000.0, 300.0, "מנס"));
    assert_eq!(ParagraphSegmenter::split_rows(&rows).len(), 1);
}

// ============================================================================
// Validation on whole pages
// ============================================================================

#[test]
fn test_segment_drops_invalid_candidates() {
    let config = ThresholdConfig::default();
    let segmenter = ParagraphSegmenter::new(&config);

    let mut rows = block(200.0, &["אבג", "דהו", "זחט", "מנס"]);
    rows.extend(block(500.0, &["עפצ"]));
    rows.extend(block(800.0, &["This", "content", "https://about.jstor.org/terms"]));
    rows.extend(block(1100.0, &["שתא", "בגד", "הוז"]));

    let paragraphs = segmenter.segment(&rows, &PageId::new("p007"));
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].index, 0);
    assert_eq!(paragraphs[1].index, 3);
    assert!(paragraphs.iter().all(|p| p.total_count_in_page == 4));
    assert_eq!(paragraphs[1].text(true), "שתא בגד הוז");
}

#[test]
fn test_min_words_is_configurable() {
    let config = ThresholdConfig::default().with_min_words(5);
    let segmenter = ParagraphSegmenter::new(&config);
    let rows = block(200.0, &["אבג", "דהו", "זחט", "מנס"]);
    assert!(segmenter.segment(&rows, &PageId::new("p007")).is_empty());
}

#[test]
fn test_short_masthead_is_not_a_header() {
    let config = ThresholdConfig::default();
    let segmenter = ParagraphSegmenter::new(&config);

    let mut rows = block(200.0, &["אבג", "דהו", "זחט", "מנס"]);
    rows.extend(block(1300.0, &["לשוננו", "עג"]));
    rows.extend(block(1400.0, &["עפצ", "שתא", "בגד"]));

    // word count is checked before any phrase, so no header is captured
    let result = segmenter.segment_page(&rows, &PageId::new("p001"));
    assert_eq!(result.paragraphs.len(), 2);
    assert!(result.headers.is_empty());
    assert_eq!(result.rejected, 1);
}

#[test]
fn test_stats_of_retained_paragraph() {
    let config = ThresholdConfig::default();
    let segmenter = ParagraphSegmenter::new(&config);
    let rows = block(200.0, &["אבג", "דהו", "זחט"]);
    let paragraphs = segmenter.segment(&rows, &PageId::new("p004"));
    let stats = &paragraphs[0].stats;
    assert_eq!(stats.avg_height, 36.0);
    assert_eq!(stats.mean_height, Some(36.0));
    assert_eq!(stats.median_adjusted_font_size, Some(36.0));
    assert_eq!(stats.std_adjusted_font_size, Some(0.0));
}
