//! Two-pass layout pipeline over a document's pages.
//!
//! ```text
//! Page[]
//!     ↓
//! [PageOrchestrator] (pass 1, pages independent)
//!     ↓
//! PageLayout[] (body text, headers, footnote runs)
//!     ↓
//! [ContinuationState::step] (pass 2, page i with page i+1 lookahead)
//!     ↓
//! FootnoteEntry[]
//!     ↓
//! [partition_abbreviations]
//!     ↓
//! DocumentResult
//! ```
//!
//! Pass 1 needs nothing but the configuration, so its results are plain
//! values. Pass 2 threads one [`ContinuationState`] value through the page
//! sequence; no state outlives a [`DocumentPipeline::process`] call.

pub mod abbreviations;
pub mod continuation;
pub mod logging;
pub mod page;
pub mod result;

// Re-export main types
pub use abbreviations::{is_abbreviation, partition_abbreviations};
pub use continuation::{check_continuation, ContinuationCheck, ContinuationState};
pub use page::{PageLayout, PageOrchestrator, TrailingDecision, FONT_SIZE_MARGIN};
pub use result::{DocumentReport, DocumentResult, FootnoteEntry, LineRole};

use crate::config::ThresholdConfig;
use crate::error::Result;
use crate::layout::token::{Document, Page};

/// The layout pipeline: turns OCR pages into body text and footnotes.
///
/// Holds only its configuration, so one pipeline can serve several threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentPipeline {
    config: ThresholdConfig,
}

impl DocumentPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(ThresholdConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Pass 1: analyze every page on its own.
    ///
    /// A page that fails validation yields an empty [`PageLayout::invalid`].
    pub fn analyze_pages(&self, pages: &[Page]) -> Vec<PageLayout> {
        let orchestrator = PageOrchestrator::new(&self.config);
        pages
            .iter()
            .map(|page| match orchestrator.analyze(page) {
                Ok(layout) => layout,
                Err(e) => {
                    crate::layout_log_warn!("{}: skipping page: {}", page.id, e);
                    PageLayout::invalid(page.id.clone(), e.to_string())
                },
            })
            .collect()
    }

    /// Run both passes over `pages`, given in physical order.
    ///
    /// Fails only for an invalid configuration; page problems are counted
    /// in the report.
    pub fn process(&self, pages: &[Page]) -> Result<DocumentResult> {
        self.config.validate()?;

        let layouts = self.analyze_pages(pages);
        let mut report = DocumentReport {
            pages: layouts.len(),
            ..DocumentReport::default()
        };

        let mut entries: Vec<FootnoteEntry> = Vec::new();
        let mut state = ContinuationState::default();
        for (i, layout) in layouts.iter().enumerate() {
            if let Some(error) = &layout.error {
                report.invalid_pages += 1;
                report.warnings.push(format!("{}: {}", layout.page_id, error));
            } else if !layout.has_footnotes() {
                report.pages_without_footnotes += 1;
            }

            if state.is_pending() {
                if layout.has_footnotes() {
                    report.continuations_merged += 1;
                } else {
                    report.continuations_flushed += 1;
                    report.warnings.push(format!(
                        "{}: continued footnote found no footnote to join",
                        layout.page_id
                    ));
                }
            }

            let (next_state, page_entries) = state.step(layout, layouts.get(i + 1), &self.config);
            entries.extend(page_entries);
            state = next_state;
        }

        if let Some(entry) = state.finish() {
            crate::layout_log_warn!(
                "{}: document ends inside a continued footnote",
                entry.page_id
            );
            report.continuations_flushed += 1;
            report
                .warnings
                .push(format!("{}: document ends inside a continued footnote", entry.page_id));
            entries.push(entry);
        }

        let (footnotes, abbreviations) =
            partition_abbreviations(entries, &self.config.abbreviation_labels);
        report.footnotes = footnotes.len();
        report.abbreviations = abbreviations.len();

        let mut result = DocumentResult {
            footnotes,
            abbreviations,
            ..DocumentResult::default()
        };
        for layout in layouts {
            if !layout.headers.is_empty() {
                result.headers.insert(layout.page_id.clone(), layout.headers);
            }
            result.body_texts.insert(layout.page_id, layout.body_text);
        }
        result.report = report;

        crate::layout_log_info!(
            "processed {} pages: {} footnotes, {} merged continuations, {} invalid pages",
            result.report.pages,
            result.report.footnotes,
            result.report.continuations_merged,
            result.report.invalid_pages
        );

        Ok(result)
    }

    /// Run both passes over a parsed document.
    pub fn process_document(&self, document: &Document) -> Result<DocumentResult> {
        self.process(&document.pages)
    }
}
