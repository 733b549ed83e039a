//! Layout analysis of OCR pages.
//!
//! This module turns the flat record list of one page into structure:
//! - Word tokens, pages and documents
//! - Font size estimation from word boxes
//! - Physical line grouping and text assembly
//! - Paragraph segmentation and validation
//! - Footnote splitting and merging

pub mod font_metrics;
pub mod footnotes;
pub mod lines;
pub mod paragraph;
pub mod token;

// Re-export main types
pub use font_metrics::{adjusted_font_size, estimate_font_size, is_full_height_word, GlyphSample};
pub use footnotes::{FootnoteRun, FootnoteSegmentation, FootnoteSegmenter};
pub use lines::{assemble_text, group_lines, Line, LINE_SEPARATOR, LINE_TOLERANCE, PARAGRAPH_SEPARATOR};
pub use paragraph::{
    Paragraph, ParagraphSegmenter, ParagraphStats, RejectReason, Segmentation, PARAGRAPH_GAP,
};
pub use token::{Document, Page, PageId, WordToken, CONFIDENCE_SENTINEL};
