//! Paragraph segmentation of one OCR page.
//!
//! OCR engines emit a run of structural records (block, paragraph, line)
//! before each new text block. Three structural records in a row whose first
//! is well below the record three positions back mark a paragraph break;
//! shorter runs show up inside paragraphs around noise and are ignored.

use crate::config::ThresholdConfig;
use crate::layout::font_metrics::estimate_font_size;
use crate::layout::lines::assemble_text;
use crate::layout::token::{PageId, WordToken};

/// Minimum vertical jump, in pixels, for a structural run to break a paragraph.
pub const PARAGRAPH_GAP: f64 = 35.0;

/// Vertical span above which a paragraph needs more than a few words.
pub const TALL_SPAN: f64 = 60.0;

/// Word count below which a tall paragraph is treated as decoration.
pub const TALL_SPARSE_MAX_WORDS: usize = 4;

/// Derived statistics of one paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphStats {
    /// Mean raw height over all rows
    pub avg_height: f64,
    /// Mean raw width over all rows
    pub avg_width: f64,
    /// Mean height of recognized words
    pub mean_height: Option<f64>,
    /// Sample standard deviation of recognized word heights
    pub std_height: Option<f64>,
    /// Mean estimated font size of recognized words
    pub median_adjusted_font_size: Option<f64>,
    /// Population standard deviation of estimated font sizes
    pub std_adjusted_font_size: Option<f64>,
}

impl ParagraphStats {
    /// Compute statistics over a paragraph's rows.
    pub fn from_rows(rows: &[WordToken]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let n = rows.len() as f64;
        let avg_height = rows.iter().map(|r| r.height).sum::<f64>() / n;
        let avg_width = rows.iter().map(|r| r.width).sum::<f64>() / n;

        let heights: Vec<f64> = rows
            .iter()
            .filter(|r| !r.is_structural())
            .map(|r| r.height)
            .collect();
        let sizes: Vec<f64> = rows
            .iter()
            .filter(|r| !r.is_structural() && r.has_text())
            .map(|r| estimate_font_size(r.height, &r.text) as f64)
            .collect();

        Self {
            avg_height,
            avg_width,
            mean_height: mean(&heights),
            std_height: sample_std(&heights),
            median_adjusted_font_size: mean(&sizes),
            std_adjusted_font_size: population_std(&sizes),
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// A retained paragraph of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Rows in input order
    pub rows: Vec<WordToken>,
    /// Position among the page's candidate paragraphs
    pub index: usize,
    /// Number of candidate paragraphs on the page
    pub total_count_in_page: usize,
    /// Derived statistics
    pub stats: ParagraphStats,
}

impl Paragraph {
    /// Create a paragraph and compute its statistics.
    pub fn new(rows: Vec<WordToken>, index: usize, total_count_in_page: usize) -> Self {
        let stats = ParagraphStats::from_rows(&rows);
        Self {
            rows,
            index,
            total_count_in_page,
            stats,
        }
    }

    /// Whitespace-separated word count over all row texts.
    pub fn word_count(&self) -> usize {
        word_count(&self.rows)
    }

    /// Reading-order text, lines joined by the line separator.
    pub fn text(&self, strip_marks: bool) -> String {
        assemble_text(&self.rows, strip_marks)
    }
}

fn word_count(rows: &[WordToken]) -> usize {
    rows.iter().map(|r| r.text.split_whitespace().count()).sum()
}

/// Why a candidate paragraph was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Fewer words than `min_words`
    TooFewWords(usize),
    /// Tall paragraph with very few words (decoration, drop caps)
    TallSparse {
        /// Vertical span of row tops
        span: f64,
        /// Word count
        words: usize,
    },
    /// Contains a configured exclusion phrase
    ExcludedPhrase(String),
    /// Journal title on the first page
    FirstPageTitle(String),
    /// Masthead just above the footnotes of the first page
    Masthead(String),
}

/// Candidate paragraphs of one page after validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    /// Retained paragraphs in page order
    pub paragraphs: Vec<Paragraph>,
    /// Text of rejected masthead paragraphs
    pub headers: Vec<String>,
    /// Number of rejected candidates
    pub rejected: usize,
}

/// Splits a page's rows into validated paragraphs.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSegmenter<'a> {
    config: &'a ThresholdConfig,
}

impl<'a> ParagraphSegmenter<'a> {
    /// Create a segmenter for `config`.
    pub fn new(config: &'a ThresholdConfig) -> Self {
        Self { config }
    }

    /// Split rows into candidate paragraphs at structural gaps.
    ///
    /// A boundary is declared at row `i` when rows `i`, `i-1` and `i-2` are
    /// structural and `rows[i].top - rows[i-3].top >= PARAGRAPH_GAP`. The
    /// boundary row opens the new paragraph. Every row lands in exactly one
    /// candidate, in input order.
    pub fn split_rows(rows: &[WordToken]) -> Vec<Vec<WordToken>> {
        let mut candidates: Vec<Vec<WordToken>> = Vec::new();
        let mut current: Vec<WordToken> = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let boundary = i >= 3
                && row.is_structural()
                && rows[i - 1].is_structural()
                && rows[i - 2].is_structural()
                && row.top - rows[i - 3].top >= PARAGRAPH_GAP;

            if boundary && !current.is_empty() {
                candidates.push(std::mem::take(&mut current));
            }
            current.push(row.clone());
        }
        if !current.is_empty() {
            candidates.push(current);
        }

        candidates
    }

    /// Check a candidate; `None` means it is retained.
    pub fn check(
        &self,
        rows: &[WordToken],
        index: usize,
        total: usize,
        page_id: &PageId,
    ) -> Option<RejectReason> {
        let words = word_count(rows);
        if words < self.config.min_words {
            return Some(RejectReason::TooFewWords(words));
        }

        let first_page = page_id.is_first_page();
        let masthead_slot = first_page && total >= 2 && index == total - 2;
        let (min_top, max_top) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.top), hi.max(r.top))
        });
        let span = max_top - min_top;

        for row in rows.iter().filter(|r| !r.text.is_empty()) {
            let text = row.text.to_lowercase();
            if first_page {
                if let Some(p) = find_phrase(&text, &self.config.first_page_title_phrases) {
                    return Some(RejectReason::FirstPageTitle(p.to_string()));
                }
            }
            if masthead_slot {
                if let Some(p) = find_phrase(&text, &self.config.masthead_phrases) {
                    return Some(RejectReason::Masthead(p.to_string()));
                }
            }
            if let Some(p) = find_phrase(&text, &self.config.exclusion_phrases) {
                return Some(RejectReason::ExcludedPhrase(p.to_string()));
            }
            if span >= TALL_SPAN && words < TALL_SPARSE_MAX_WORDS {
                return Some(RejectReason::TallSparse { span, words });
            }
        }

        None
    }

    /// True when a candidate paragraph is retained.
    pub fn is_valid(&self, rows: &[WordToken], index: usize, total: usize, page_id: &PageId) -> bool {
        self.check(rows, index, total, page_id).is_none()
    }

    /// Segment rows into retained paragraphs.
    pub fn segment(&self, rows: &[WordToken], page_id: &PageId) -> Vec<Paragraph> {
        self.segment_page(rows, page_id).paragraphs
    }

    /// Segment rows, keeping masthead text and the rejection count.
    pub fn segment_page(&self, rows: &[WordToken], page_id: &PageId) -> Segmentation {
        let candidates = Self::split_rows(rows);
        let total = candidates.len();
        let mut result = Segmentation::default();

        for (index, candidate) in candidates.into_iter().enumerate() {
            match self.check(&candidate, index, total, page_id) {
                None => result.paragraphs.push(Paragraph::new(candidate, index, total)),
                Some(reason) => {
                    crate::layout_log_debug!(
                        "{}: paragraph {}/{} rejected: {:?}",
                        page_id,
                        index + 1,
                        total,
                        reason
                    );
                    if let RejectReason::Masthead(_) = reason {
                        result
                            .headers
                            .push(assemble_text(&candidate, self.config.strip_direction_marks));
                    }
                    result.rejected += 1;
                },
            }
        }

        result
    }
}

fn find_phrase<'p>(lowered_text: &str, phrases: &'p [String]) -> Option<&'p str> {
    phrases
        .iter()
        .find(|p| !p.is_empty() && lowered_text.contains(&p.to_lowercase()))
        .map(String::as_str)
}
