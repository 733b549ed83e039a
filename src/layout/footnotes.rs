//! Footnote segmentation of a page's trailing paragraph.
//!
//! A footnote block is split in three stages:
//!
//! 1. **Coarse split**: two consecutive structural records (paragraph and
//!    line start) separate footnotes.
//! 2. **Merge**: a segment is glued back onto the previous one unless it has
//!    a word right of the parity's merge threshold. On RTL pages the footnote
//!    number hangs at the right margin, so a segment without one is the
//!    continuation of a footnote that OCR cut into paragraphs.
//! 3. **Left-threshold split**, run twice: words right of the split threshold
//!    are footnote numbers that stage 2 merged into a neighbour.

use crate::config::{Parity, ThresholdConfig};
use crate::layout::lines::assemble_text;
use crate::layout::paragraph::Paragraph;
use crate::layout::token::{PageId, WordToken};
use serde::Serialize;

/// Consecutive structural records that separate two footnotes.
const FOOTNOTE_BREAK_MARKERS: usize = 2;

/// One logical footnote on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootnoteRun {
    /// Page the footnote is attributed to
    pub page_id: PageId,
    /// Words of the footnote, in input order
    #[serde(skip)]
    pub tokens: Vec<WordToken>,
    /// Reading-order text, lines joined by the line separator
    pub text: String,
}

impl FootnoteRun {
    /// Build a run and assemble its text.
    pub fn new(page_id: PageId, tokens: Vec<WordToken>, strip_marks: bool) -> Self {
        let text = assemble_text(&tokens, strip_marks);
        Self {
            page_id,
            tokens,
            text,
        }
    }
}

/// Footnotes found in one paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootnoteSegmentation {
    /// Final runs, in page order
    pub runs: Vec<FootnoteRun>,
    /// Words of the first footnote before any trimming, used by the
    /// previous page's continuation lookahead
    pub first_footnote_tokens: Vec<WordToken>,
    /// An asterisk note was dropped from the first page
    pub dropped_asterisk_note: bool,
}

/// Splits a footnote paragraph into runs.
#[derive(Debug, Clone, Copy)]
pub struct FootnoteSegmenter<'a> {
    config: &'a ThresholdConfig,
}

impl<'a> FootnoteSegmenter<'a> {
    /// Create a segmenter for `config`.
    pub fn new(config: &'a ThresholdConfig) -> Self {
        Self { config }
    }

    /// Stage 1: split at every pair of consecutive structural records.
    ///
    /// Only words with visible text are kept; empty segments are dropped.
    pub fn coarse_split(rows: &[WordToken]) -> Vec<Vec<WordToken>> {
        let mut segments = Vec::new();
        let mut current: Vec<WordToken> = Vec::new();
        let mut markers = 0;

        for row in rows {
            if row.is_structural() {
                markers += 1;
                if markers == FOOTNOTE_BREAK_MARKERS {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                    markers = 0;
                }
            } else {
                markers = 0;
                if row.has_text() {
                    current.push(row.clone());
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Stage 2: merge each segment into its predecessor unless one of its
    /// words lies right of the merge threshold.
    pub fn merge_segments(
        &self,
        segments: Vec<Vec<WordToken>>,
        parity: Parity,
    ) -> Vec<Vec<WordToken>> {
        let threshold = self.config.merge_threshold(parity);
        let mut merged: Vec<Vec<WordToken>> = Vec::with_capacity(segments.len());

        for segment in segments {
            let opens_footnote = segment
                .iter()
                .any(|t| !t.is_structural() && t.left > threshold);
            match merged.last_mut() {
                Some(previous) if !opens_footnote => previous.extend(segment),
                _ => merged.push(segment),
            }
        }

        merged
    }

    /// Stage 3: split a segment at words right of the split threshold.
    ///
    /// With fewer than two such words the segment is returned whole.
    /// Otherwise the parts are `[0, p1)`, `[p1, p2)`, ..., `[pk, end]`; the
    /// first marker stays with the text before the second.
    pub fn split_by_left_threshold(
        &self,
        segment: Vec<WordToken>,
        parity: Parity,
    ) -> Vec<Vec<WordToken>> {
        let threshold = self.config.split_threshold(parity);
        let positions: Vec<usize> = segment
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_structural() && t.left > threshold)
            .map(|(i, _)| i)
            .collect();

        if positions.len() < 2 {
            return vec![segment];
        }

        let mut bounds = vec![0];
        bounds.extend_from_slice(&positions[1..]);
        bounds.push(segment.len());

        bounds
            .windows(2)
            .map(|w| segment[w[0]..w[1]].to_vec())
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// Stages 1 to 3 over a paragraph's rows.
    pub fn split_segments(&self, rows: &[WordToken], parity: Parity) -> Vec<Vec<WordToken>> {
        let coarse = Self::coarse_split(rows);
        let merged = self.merge_segments(coarse, parity);

        let split_once: Vec<Vec<WordToken>> = merged
            .into_iter()
            .flat_map(|s| self.split_by_left_threshold(s, parity))
            .collect();

        split_once
            .into_iter()
            .flat_map(|s| self.split_by_left_threshold(s, parity))
            .collect()
    }

    /// Segment a footnote paragraph of `page_id` into runs.
    ///
    /// After the three stages, an asterisk note opening the first page is
    /// dropped, and a short first line is split off as a leading fragment.
    pub fn segment(&self, paragraph: &Paragraph, page_id: &PageId) -> FootnoteSegmentation {
        let strip = self.config.strip_direction_marks;
        let parity = page_id.parity();

        let mut runs: Vec<FootnoteRun> = self
            .split_segments(&paragraph.rows, parity)
            .into_iter()
            .map(|tokens| FootnoteRun::new(page_id.clone(), tokens, strip))
            .collect();

        let first_footnote_tokens = runs.first().map(|r| r.tokens.clone()).unwrap_or_default();

        let mut dropped_asterisk_note = false;
        if self.config.drop_first_page_asterisk_note
            && page_id.is_first_page()
            && runs.first().is_some_and(|r| r.text.contains('*'))
        {
            crate::layout_log_debug!("{}: dropping asterisk note", page_id);
            runs.remove(0);
            dropped_asterisk_note = true;
        }

        if let Some(limit) = self.config.leading_fragment_left_sum {
            self.split_leading_fragment(&mut runs, paragraph, page_id, limit);
        }

        FootnoteSegmentation {
            runs,
            first_footnote_tokens,
            dropped_asterisk_note,
        }
    }

    /// Split the paragraph's first line off the first run when its words'
    /// summed `left` is at most `limit`.
    fn split_leading_fragment(
        &self,
        runs: &mut Vec<FootnoteRun>,
        paragraph: &Paragraph,
        page_id: &PageId,
        limit: f64,
    ) {
        let first_line: Vec<&WordToken> = paragraph
            .rows
            .iter()
            .skip(1)
            .take_while(|r| !r.is_structural())
            .collect();
        if first_line.is_empty() {
            return;
        }
        let left_sum: f64 = first_line.iter().map(|t| t.left).sum();
        if left_sum > limit {
            return;
        }

        let fragment: Vec<WordToken> = first_line
            .into_iter()
            .filter(|t| t.has_text())
            .cloned()
            .collect();
        let Some(first) = runs.first() else {
            return;
        };
        if fragment.is_empty() || !first.tokens.starts_with(&fragment) {
            return;
        }

        crate::layout_log_debug!(
            "{}: leading fragment of {} words (left sum {:.0} <= {:.0})",
            page_id,
            fragment.len(),
            left_sum,
            limit
        );

        let strip = self.config.strip_direction_marks;
        let remainder: Vec<WordToken> = first.tokens[fragment.len()..].to_vec();
        let fragment_run = FootnoteRun::new(page_id.clone(), fragment, strip);

        if remainder.is_empty() {
            runs[0] = fragment_run;
        } else {
            runs[0] = FootnoteRun::new(page_id.clone(), remainder, strip);
            runs.insert(0, fragment_run);
        }
    }
}
