#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::manual_find)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # Folio Oxide
//!
//! Layout reconstruction for OCR'd pages of bidirectional Hebrew/Latin
//! journals.
//!
//! The input is the word-level output of an OCR engine: every recognized word
//! with its bounding box and confidence, interleaved with structural records
//! (block, paragraph and line starts) that carry no text. From that the
//! crate rebuilds:
//!
//! - reading-order text for every line, with mixed Hebrew and Latin runs
//!   put in logical order and mirrored brackets repaired
//! - the body text of every page
//! - the page's footnotes, one entry per footnote, including footnotes that
//!   continue from the bottom of one page to the top of the next
//!
//! ## Quick Start
//!
//! ```
//! use folio_oxide::{DocumentPipeline, ThresholdConfig};
//! use folio_oxide::config::{JournalProfile, ScanMode};
//! use folio_oxide::layout::{Page, WordToken};
//!
//! let config = ThresholdConfig::for_journal(JournalProfile::Tarbiz, ScanMode::Printed);
//! let pipeline = DocumentPipeline::with_config(config);
//!
//! let page = Page::new(
//!     "p002",
//!     vec![
//!         WordToken::new(900.0, 100.0, 150.0, 40.0, 91.0, "שלום"),
//!         WordToken::new(700.0, 100.0, 150.0, 40.0, 88.0, "עולם"),
//!         WordToken::new(500.0, 100.0, 150.0, 40.0, 93.0, "ומלואו"),
//!     ],
//! );
//!
//! let result = pipeline.process(&[page])?;
//! assert_eq!(result.body_texts[0], "שלום עולם ומלואו");
//! assert!(result.footnotes.is_empty());
//! # Ok::<(), folio_oxide::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`text`]: script classification and bidi reordering of a single line
//! - [`layout`]: tokens, lines, paragraphs and footnote segmentation
//! - [`pipeline`]: per-page analysis and the cross-page continuation pass
//! - [`config`]: thresholds and per-journal presets

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry
pub mod geometry;

// Text: scripts and bidi
pub mod text;

// Layout analysis
pub mod layout;

// Two-pass document pipeline
pub mod pipeline;

#[doc(hidden)]
pub use log as __log;

// Re-exports
pub use config::{JournalProfile, Parity, ScanMode, ThresholdConfig};
pub use error::{Error, Result};
pub use pipeline::{DocumentPipeline, DocumentReport, DocumentResult, FootnoteEntry, LineRole};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats, treating NaN as greater than every number.
    ///
    /// Sorting OCR geometry with `partial_cmp(..).unwrap()` panics on the odd
    /// NaN coordinate; this gives a total order instead.
    #[inline]
    pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f64::NAN, f64::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f64::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f64::NAN), Ordering::Less);
        }

        #[test]
        fn test_safe_float_cmp_sorts_page_lefts() {
            let mut lefts = vec![900.0, f64::NAN, 120.0, 455.5];
            lefts.sort_by(|a, b| safe_float_cmp(*a, *b));
            assert_eq!(&lefts[..3], &[120.0, 455.5, 900.0]);
            assert!(lefts[3].is_nan());
        }
    }
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
