//! OCR word tokens, pages and documents.
//!
//! A page is the flat, ordered list of records an OCR engine reports for one
//! raster: structural records (block, paragraph, line starts) followed by the
//! words they contain. Structural records carry [`CONFIDENCE_SENTINEL`] and
//! empty text but real geometry, and the paragraph and footnote segmenters
//! read them as layout signals.

use crate::config::Parity;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence reported for structural (non-text) records.
pub const CONFIDENCE_SENTINEL: f64 = -1.0;

/// Identifier of a physical page, e.g. `"p013"` or `"page_13"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl PageId {
    /// Create a page identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Physical page number: every ASCII digit of the id, concatenated.
    ///
    /// ```
    /// use folio_oxide::layout::PageId;
    ///
    /// assert_eq!(PageId::new("p013").number(), Some(13));
    /// assert_eq!(PageId::new("cover").number(), None);
    /// ```
    pub fn number(&self) -> Option<u64> {
        let digits: String = self.0.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    /// Parity of the page number; ids without a number count as odd.
    pub fn parity(&self) -> Parity {
        match self.number() {
            Some(n) => Parity::of(n),
            None => {
                crate::layout_log_debug!("page id {:?} has no number, assuming odd parity", self.0);
                Parity::Odd
            },
        }
    }

    /// True for the first physical page of a paper.
    pub fn is_first_page(&self) -> bool {
        self.number() == Some(1)
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One OCR record: a recognized word or a structural marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    /// Left edge in raster pixels
    pub left: f64,
    /// Top edge in raster pixels
    pub top: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
    /// Recognition confidence, or [`CONFIDENCE_SENTINEL`] for structure
    pub confidence: f64,
    /// Recognized text (empty for structural records)
    #[serde(default)]
    pub text: String,
    /// OCR block number
    #[serde(default)]
    pub block_id: u32,
    /// OCR paragraph number within the block
    #[serde(default)]
    pub paragraph_id: u32,
    /// OCR line number within the paragraph
    #[serde(default)]
    pub line_id: u32,
    /// Page the record was read from
    #[serde(default)]
    pub page_id: PageId,
}

impl WordToken {
    /// Create a recognized word.
    pub fn new(left: f64, top: f64, width: f64, height: f64, confidence: f64, text: &str) -> Self {
        Self {
            left,
            top,
            width,
            height,
            confidence,
            text: text.to_string(),
            block_id: 0,
            paragraph_id: 0,
            line_id: 0,
            page_id: PageId::default(),
        }
    }

    /// Create a structural record.
    pub fn structural(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, width, height, CONFIDENCE_SENTINEL, "")
    }

    /// True for structural records.
    pub fn is_structural(&self) -> bool {
        self.confidence == CONFIDENCE_SENTINEL
    }

    /// True when the record has visible text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Bounding box of the record.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

#[derive(Deserialize)]
struct PageRecord {
    id: PageId,
    #[serde(default)]
    rows: Vec<WordToken>,
}

impl From<PageRecord> for Page {
    fn from(record: PageRecord) -> Self {
        Page::new(record.id, record.rows)
    }
}

/// One physical page of OCR output, rows in engine order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PageRecord")]
pub struct Page {
    /// Page identifier
    pub id: PageId,
    /// OCR records, top to bottom
    pub rows: Vec<WordToken>,
}

impl Page {
    /// Create a page, stamping `id` on every row.
    pub fn new(id: impl Into<PageId>, rows: Vec<WordToken>) -> Self {
        let id = id.into();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.page_id = id.clone();
                row
            })
            .collect();
        Self { id, rows }
    }

    /// Check that the page can be laid out.
    ///
    /// Fails on an empty page, on rows with non-finite geometry or
    /// confidence, and on pages with no recognized word at all.
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(Error::EmptyPage(self.id.to_string()));
        }
        for (index, row) in self.rows.iter().enumerate() {
            let reason = if !row.bbox().is_finite() {
                Some("non-finite geometry")
            } else if !row.confidence.is_finite() {
                Some("non-finite confidence")
            } else if row.width < 0.0 || row.height < 0.0 {
                Some("negative box size")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(Error::InvalidToken {
                    page: self.id.to_string(),
                    index,
                    reason: reason.to_string(),
                });
            }
        }
        if !self.rows.iter().any(|r| !r.is_structural() && r.has_text()) {
            return Err(Error::EmptyPage(self.id.to_string()));
        }
        Ok(())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A paper: its pages in physical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in physical order
    pub pages: Vec<Page>,
}

impl Document {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_and_parity() {
        assert_eq!(PageId::new("page_0012").number(), Some(12));
        assert_eq!(PageId::new("p12").parity(), Parity::Even);
        assert_eq!(PageId::new("p13").parity(), Parity::Odd);
        assert_eq!(PageId::new("cover").parity(), Parity::Odd);
        assert!(PageId::new("p001").is_first_page());
        assert!(!PageId::new("p010").is_first_page());
    }

    #[test]
    fn test_structural_token() {
        let marker = WordToken::structural(100.0, 200.0, 900.0, 40.0);
        assert!(marker.is_structural());
        assert!(!marker.has_text());

        let word = WordToken::new(100.0, 200.0, 80.0, 40.0, 91.5, "שלום");
        assert!(!word.is_structural());
        assert!(word.has_text());
        assert_eq!(word.bbox().right(), 180.0);
    }

    #[test]
    fn test_page_new_stamps_ids() {
        let page = Page::new("p004", vec![WordToken::new(0.0, 0.0, 10.0, 10.0, 90.0, "a")]);
        assert_eq!(page.rows[0].page_id, PageId::new("p004"));
    }

    #[test]
    fn test_validate_empty_page() {
        let page = Page::new("p001", Vec::new());
        assert!(matches!(page.validate(), Err(Error::EmptyPage(_))));

        let markers_only = Page::new("p002", vec![WordToken::structural(0.0, 0.0, 10.0, 10.0)]);
        assert!(matches!(markers_only.validate(), Err(Error::EmptyPage(_))));
    }

    #[test]
    fn test_validate_non_finite() {
        let page = Page::new(
            "p003",
            vec![
                WordToken::new(0.0, 0.0, 10.0, 10.0, 90.0, "ok"),
                WordToken::new(f64::NAN, 0.0, 10.0, 10.0, 90.0, "bad"),
            ],
        );
        match page.validate() {
            Err(Error::InvalidToken { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_document_from_json_stamps_page_ids() {
        let json = r#"{
            "pages": [
                {"id": "p007", "rows": [
                    {"left": 10, "top": 20, "width": 30, "height": 40, "confidence": 95.0, "text": "word"},
                    {"left": 10, "top": 20, "width": 30, "height": 40, "confidence": -1}
                ]}
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].rows[0].page_id.as_str(), "p007");
        assert!(doc.pages[0].rows[1].is_structural());
        assert_eq!(doc.pages[0].rows[1].text, "");
    }
}
