//! Document-level results of the layout pipeline.

use crate::error::Result;
use crate::layout::token::PageId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Role of an entry split off a page's footnote block.
///
/// Header and body text are not entries; they are kept per page in
/// [`DocumentResult::headers`] and [`DocumentResult::body_texts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    /// Footnote
    Footnote,
    /// Bibliographic abbreviation entry
    Abbrev,
}

/// One footnote of the document, attributed to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootnoteEntry {
    /// Page the footnote is attributed to
    pub page_id: PageId,
    /// Footnote text, lines joined by the line separator
    pub text: String,
    /// Footnote or abbreviation
    pub role: LineRole,
}

impl FootnoteEntry {
    /// Create a footnote entry.
    pub fn footnote(page_id: PageId, text: impl Into<String>) -> Self {
        Self {
            page_id,
            text: text.into(),
            role: LineRole::Footnote,
        }
    }
}

/// Aggregate counters and warnings for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Pages seen
    pub pages: usize,
    /// Pages that failed validation and produced no text
    pub invalid_pages: usize,
    /// Valid pages without a footnote block
    pub pages_without_footnotes: usize,
    /// Footnotes emitted
    pub footnotes: usize,
    /// Abbreviation entries emitted
    pub abbreviations: usize,
    /// Continuations merged into the next page's first footnote
    pub continuations_merged: usize,
    /// Continuations that found no footnote to merge into
    pub continuations_flushed: usize,
    /// Human-readable warnings
    pub warnings: Vec<String>,
}

/// Everything the pipeline produces for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Footnotes in final attribution order
    pub footnotes: Vec<FootnoteEntry>,
    /// Body text per page, in page order
    pub body_texts: IndexMap<PageId, String>,
    /// Masthead text per page, for pages that had any
    pub headers: IndexMap<PageId, Vec<String>>,
    /// Abbreviation entries split from the footnotes
    pub abbreviations: Vec<FootnoteEntry>,
    /// Counters and warnings
    pub report: DocumentReport,
}

impl DocumentResult {
    /// Footnotes as `(page, text)` pairs.
    pub fn footnote_pairs(&self) -> Vec<(&PageId, &str)> {
        self.footnotes
            .iter()
            .map(|f| (&f.page_id, f.text.as_str()))
            .collect()
    }

    /// Footnotes attributed to one page.
    pub fn footnotes_for<'a>(&'a self, page_id: &'a PageId) -> impl Iterator<Item = &'a FootnoteEntry> {
        self.footnotes.iter().filter(move |f| &f.page_id == page_id)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
