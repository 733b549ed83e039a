//! Cross-page footnote continuation.
//!
//! The second pipeline pass walks the analyzed pages in order and threads a
//! [`ContinuationState`] through them. The state is a plain value: each step
//! consumes the previous state and returns the next one together with the
//! footnote entries the page contributes.

use crate::config::ThresholdConfig;
use crate::layout::lines::LINE_SEPARATOR;
use crate::layout::token::{PageId, WordToken};
use crate::pipeline::page::PageLayout;
use crate::pipeline::result::FootnoteEntry;

/// Outcome of the continuation check for a page's last footnote.
#[derive(Debug, Clone, PartialEq)]
pub enum ContinuationCheck {
    /// The footnote has no words
    NoWords,
    /// The footnote does not end at the page bottom near the left margin
    NotAtPageBottom {
        /// Lowest word top
        max_top: f64,
        /// Leftmost word edge
        min_left: f64,
    },
    /// There is no next page, or it has no footnotes
    NoNextFootnote,
    /// The next page's first footnote is too wide to be a continuation
    NextTooWide {
        /// `left + width` of its rightmost-starting word
        extent: f64,
        /// Width threshold of the next page's parity
        threshold: f64,
    },
    /// The footnote continues on the next page
    Accepted {
        /// `left + width` of the next footnote's rightmost-starting word
        extent: f64,
        /// Width threshold of the next page's parity
        threshold: f64,
    },
}

impl ContinuationCheck {
    /// True when the footnote continues.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ContinuationCheck::Accepted { .. })
    }
}

/// Decide whether the footnote made of `last_tokens` on `page_id` continues
/// into `next_first`, the first footnote of the following page.
///
/// The footnote must end inside the bottom-margin window and reach left of
/// the page's left-margin threshold. The next footnote's word with the
/// greatest `left` (first on ties) must then end at or before the next
/// page's width threshold.
pub fn check_continuation(
    last_tokens: &[WordToken],
    page_id: &PageId,
    next_first: Option<(&PageId, &[WordToken])>,
    config: &ThresholdConfig,
) -> ContinuationCheck {
    let words: Vec<&WordToken> = last_tokens.iter().filter(|t| !t.is_structural()).collect();
    let (Some(max_top), Some(min_left)) = (
        words.iter().map(|t| t.top).reduce(f64::max),
        words.iter().map(|t| t.left).reduce(f64::min),
    ) else {
        return ContinuationCheck::NoWords;
    };

    let in_window = config.bottom_margin_min <= max_top && max_top <= config.bottom_margin_max;
    let reaches_margin = min_left < config.left_margin_threshold(page_id.parity());
    if !(in_window && reaches_margin) {
        return ContinuationCheck::NotAtPageBottom { max_top, min_left };
    }

    let Some((next_id, next_tokens)) = next_first else {
        return ContinuationCheck::NoNextFootnote;
    };
    let widest = next_tokens
        .iter()
        .filter(|t| !t.is_structural())
        .fold(None::<&WordToken>, |best, t| match best {
            Some(b) if t.left <= b.left => Some(b),
            _ => Some(t),
        });
    let Some(widest) = widest else {
        return ContinuationCheck::NoNextFootnote;
    };

    let extent = widest.bbox().right();
    let threshold = config.width_threshold(next_id.parity());
    if extent <= threshold {
        ContinuationCheck::Accepted { extent, threshold }
    } else {
        ContinuationCheck::NextTooWide { extent, threshold }
    }
}

/// Footnote text carried from one page to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuationState {
    /// Text of the footnote that continues on the next page
    pub pending_text: Option<String>,
    /// Page the carried footnote is attributed to
    pub pending_origin_page: Option<PageId>,
}

/// Join a carried footnote to its continuation with [`LINE_SEPARATOR`].
///
/// The page break is kept visible, the same way line breaks inside a
/// footnote are, instead of gluing the two texts together.
fn join_fragments(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{}{}{}", head, LINE_SEPARATOR, tail),
    }
}

impl ContinuationState {
    /// True while a carried footnote waits for the next page.
    pub fn is_pending(&self) -> bool {
        self.pending_text.is_some()
    }

    /// Process one page.
    ///
    /// A pending footnote is merged into the page's first footnote and
    /// attributed to its origin page; a page without footnotes gets it as a
    /// standalone entry instead. The merge is not a bare concatenation: the
    /// two parts are joined with [`LINE_SEPARATOR`] (`" | "`), so the page
    /// break reads like any other line break in the footnote.
    ///
    /// The page's last footnote is then checked against `next`. If it
    /// continues it is withheld from the returned entries and becomes the new
    /// pending state, attributed to the page it started on: the carried-in
    /// origin when the merged footnote is the page's only one, this page
    /// otherwise.
    pub fn step(
        self,
        page: &PageLayout,
        next: Option<&PageLayout>,
        config: &ThresholdConfig,
    ) -> (ContinuationState, Vec<FootnoteEntry>) {
        let mut entries: Vec<FootnoteEntry> = page
            .runs
            .iter()
            .map(|run| FootnoteEntry::footnote(run.page_id.clone(), run.text.clone()))
            .collect();

        let mut carried_origin: Option<PageId> = None;
        if let Some(pending) = self.pending_text {
            let origin = self
                .pending_origin_page
                .unwrap_or_else(|| page.page_id.clone());
            match entries.first_mut() {
                Some(first) => {
                    first.text = join_fragments(&pending, &first.text);
                    first.page_id = origin.clone();
                    carried_origin = Some(origin);
                },
                None => {
                    crate::layout_log_warn!(
                        "{}: no footnote to continue the note from {}, keeping it standalone",
                        page.page_id,
                        origin
                    );
                    entries.push(FootnoteEntry::footnote(origin, pending));
                    return (ContinuationState::default(), entries);
                },
            }
        }

        let Some(last_run) = page.runs.last() else {
            return (ContinuationState::default(), entries);
        };
        let next_first = next
            .filter(|n| !n.first_footnote_tokens.is_empty())
            .map(|n| (&n.page_id, n.first_footnote_tokens.as_slice()));

        let check = check_continuation(&last_run.tokens, &page.page_id, next_first, config);
        if !check.is_accepted() {
            crate::layout_log_trace!("{}: last footnote stays: {:?}", page.page_id, check);
            return (ContinuationState::default(), entries);
        }

        let Some(carried) = entries.pop() else {
            return (ContinuationState::default(), entries);
        };
        let origin = match carried_origin {
            Some(origin) if entries.is_empty() => origin,
            _ => page.page_id.clone(),
        };
        crate::layout_log_info!(
            "{}: last footnote continues on the next page ({:?})",
            page.page_id,
            check
        );

        (
            ContinuationState {
                pending_text: Some(carried.text),
                pending_origin_page: Some(origin),
            },
            entries,
        )
    }

    /// Release a footnote still pending at the end of the document.
    pub fn finish(self) -> Option<FootnoteEntry> {
        let text = self.pending_text?;
        let origin = self.pending_origin_page.unwrap_or_default();
        Some(FootnoteEntry::footnote(origin, text))
    }
}
