//! Per-page analysis: paragraphs, body text and the footnote decision.
//!
//! This is the first of the pipeline's two passes. Every page is analyzed
//! on its own; nothing here looks at neighbouring pages.

use crate::config::ThresholdConfig;
use crate::error::Result;
use crate::layout::font_metrics::{adjusted_font_size, GlyphSample};
use crate::layout::footnotes::{FootnoteRun, FootnoteSegmenter};
use crate::layout::lines::PARAGRAPH_SEPARATOR;
use crate::layout::paragraph::{mean, Paragraph, ParagraphSegmenter};
use crate::layout::token::{Page, PageId, WordToken};

/// Footnote font must be at least this much smaller than body text.
pub const FONT_SIZE_MARGIN: f64 = 0.35;

/// How the trailing paragraph of a page was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum TrailingDecision {
    /// The page failed validation
    InvalidPage,
    /// Zero or one retained paragraph; everything is body text
    SingleParagraph,
    /// Font statistics could not be computed; folded into body text
    Indeterminate,
    /// The trailing paragraph reads as body text
    Body {
        /// Mean adjusted font size of the other paragraphs
        main_font_size: f64,
        /// Mean adjusted font size of the trailing paragraph
        last_font_size: f64,
        /// Font check outcome
        font_check: bool,
        /// Size check outcome
        size_check: bool,
    },
    /// Classified as footnotes but no footnote survived segmentation
    EmptyFootnotes,
    /// The trailing paragraph is the footnote block
    Footnotes {
        /// Mean adjusted font size of the other paragraphs
        main_font_size: f64,
        /// Mean adjusted font size of the footnote block
        last_font_size: f64,
    },
}

/// Result of analyzing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Page identifier
    pub page_id: PageId,
    /// Body text, paragraphs separated by a blank line
    pub body_text: String,
    /// Masthead text captured on the first page
    pub headers: Vec<String>,
    /// Footnotes of the page
    pub runs: Vec<FootnoteRun>,
    /// Words of the first footnote before trimming
    pub first_footnote_tokens: Vec<WordToken>,
    /// Classification of the trailing paragraph
    pub decision: TrailingDecision,
    /// Validation failure, if any
    pub error: Option<String>,
}

impl PageLayout {
    /// Empty layout for a page that failed validation.
    pub fn invalid(page_id: PageId, error: impl Into<String>) -> Self {
        Self {
            page_id,
            body_text: String::new(),
            headers: Vec::new(),
            runs: Vec::new(),
            first_footnote_tokens: Vec::new(),
            decision: TrailingDecision::InvalidPage,
            error: Some(error.into()),
        }
    }

    /// True when the page produced footnotes.
    pub fn has_footnotes(&self) -> bool {
        !self.runs.is_empty()
    }
}

/// Mean adjusted font size of the recognized words of `paragraphs`.
fn mean_adjusted_font_size<'p, I>(paragraphs: I) -> Option<f64>
where
    I: IntoIterator<Item = &'p Paragraph>,
{
    let sizes: Vec<f64> = paragraphs
        .into_iter()
        .flat_map(|p| p.rows.iter())
        .filter(|r| !r.is_structural() && r.has_text())
        .map(|r| adjusted_font_size(GlyphSample::from(r)))
        .collect();
    mean(&sizes)
}

/// Analyzes single pages.
#[derive(Debug, Clone, Copy)]
pub struct PageOrchestrator<'a> {
    config: &'a ThresholdConfig,
}

impl<'a> PageOrchestrator<'a> {
    /// Create an orchestrator for `config`.
    pub fn new(config: &'a ThresholdConfig) -> Self {
        Self { config }
    }

    /// Analyze one page.
    ///
    /// Fails only when the page does not validate; callers turn that into
    /// [`PageLayout::invalid`] and move on.
    pub fn analyze(&self, page: &Page) -> Result<PageLayout> {
        page.validate()?;

        let strip = self.config.strip_direction_marks;
        let segmentation = ParagraphSegmenter::new(self.config).segment_page(&page.rows, &page.id);
        let paragraphs = segmentation.paragraphs;

        let mut layout = PageLayout {
            page_id: page.id.clone(),
            body_text: String::new(),
            headers: segmentation.headers,
            runs: Vec::new(),
            first_footnote_tokens: Vec::new(),
            decision: TrailingDecision::SingleParagraph,
            error: None,
        };

        let Some((last, main)) = paragraphs.split_last() else {
            return Ok(layout);
        };
        if main.is_empty() {
            layout.body_text = join_paragraphs(&paragraphs, strip);
            return Ok(layout);
        }

        layout.decision = self.classify(main, last);
        crate::layout_log_debug!("{}: trailing paragraph {:?}", page.id, layout.decision);

        if let TrailingDecision::Footnotes { .. } = layout.decision {
            let footnotes = FootnoteSegmenter::new(self.config).segment(last, &page.id);
            if footnotes.runs.is_empty() {
                layout.decision = TrailingDecision::EmptyFootnotes;
            } else {
                layout.runs = footnotes.runs;
                layout.first_footnote_tokens = footnotes.first_footnote_tokens;
                layout.body_text = join_paragraphs(main, strip);
                return Ok(layout);
            }
        }

        layout.body_text = join_paragraphs(&paragraphs, strip);
        Ok(layout)
    }

    /// Decide whether `last` is a footnote block.
    ///
    /// Both must hold:
    /// - its mean adjusted font size is at most the body's minus
    ///   [`FONT_SIZE_MARGIN`]
    /// - its mean box height or width differs from the largest body
    ///   paragraph's by more than the size tolerance
    pub fn classify(&self, main: &[Paragraph], last: &Paragraph) -> TrailingDecision {
        let (Some(main_font_size), Some(last_font_size)) = (
            mean_adjusted_font_size(main),
            mean_adjusted_font_size(std::iter::once(last)),
        ) else {
            return TrailingDecision::Indeterminate;
        };

        let font_check = last_font_size <= main_font_size - FONT_SIZE_MARGIN;

        // first paragraph with the strictly greatest box size
        let mut largest: Option<&Paragraph> = None;
        let mut largest_size = 0.0;
        for paragraph in main {
            let size = paragraph.stats.avg_height.max(paragraph.stats.avg_width);
            if size > largest_size {
                largest_size = size;
                largest = Some(paragraph);
            }
        }
        let tolerance = self.config.size_tolerance;
        let size_check = largest.is_some_and(|p| {
            (last.stats.avg_height - p.stats.avg_height).abs() > tolerance
                || (last.stats.avg_width - p.stats.avg_width).abs() > tolerance
        });

        if font_check && size_check {
            TrailingDecision::Footnotes {
                main_font_size,
                last_font_size,
            }
        } else {
            TrailingDecision::Body {
                main_font_size,
                last_font_size,
                font_check,
                size_check,
            }
        }
    }
}

fn join_paragraphs(paragraphs: &[Paragraph], strip_marks: bool) -> String {
    paragraphs
        .iter()
        .map(|p| p.text(strip_marks))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}
