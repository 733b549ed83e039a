//! Threshold configuration for layout reconstruction.
//!
//! Every threshold that drives paragraph validation, footnote splitting and
//! cross-page continuation lives in [`ThresholdConfig`]. The value is passed
//! by reference into each core function; nothing in the crate reads
//! configuration from global state.
//!
//! Source journals are double-page scans with mirrored margins, so most
//! horizontal thresholds come in an even/odd pair selected by [`Parity`].
//!
//! # Example
//!
//! ```
//! use folio_oxide::config::{JournalProfile, Parity, ScanMode, ThresholdConfig};
//!
//! let config = ThresholdConfig::for_journal(JournalProfile::Tarbiz, ScanMode::Printed);
//! assert_eq!(config.split_threshold(Parity::Odd), 1170.0);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parity of a physical page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    /// Even page number (verso)
    Even,
    /// Odd page number (recto)
    Odd,
}

impl Parity {
    /// Parity of a page number.
    pub fn of(number: u64) -> Self {
        if number % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// Scan mode of the source PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanMode {
    /// Born-digital PDF rasterized for OCR
    #[default]
    Printed,
    /// Physical scan of a printed issue
    Scanned,
}

impl FromStr for ScanMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "printed" | "print" | "text" => Ok(ScanMode::Printed),
            "scanned" | "scan" => Ok(ScanMode::Scanned),
            other => Err(Error::UnknownProfile(other.to_string())),
        }
    }
}

/// Journal whose layout thresholds are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JournalProfile {
    /// Tarbiz
    Tarbiz,
    /// Meghillot
    Meghillot,
    /// Shenaton ha-Mishpat ha-Ivri
    Shenmishivri,
    /// Sidra
    Sidra,
    /// Leshonenu
    Leshonenu,
    /// Zion
    Zion,
    /// Anything else; balanced defaults
    #[default]
    Generic,
}

impl JournalProfile {
    /// All named profiles, in lookup order.
    pub const ALL: [JournalProfile; 7] = [
        JournalProfile::Tarbiz,
        JournalProfile::Meghillot,
        JournalProfile::Shenmishivri,
        JournalProfile::Sidra,
        JournalProfile::Leshonenu,
        JournalProfile::Zion,
        JournalProfile::Generic,
    ];

    /// Lowercase key used on the command line and in file paths.
    pub fn key(&self) -> &'static str {
        match self {
            JournalProfile::Tarbiz => "tarbiz",
            JournalProfile::Meghillot => "meghillot",
            JournalProfile::Shenmishivri => "shenmishivri",
            JournalProfile::Sidra => "sidra",
            JournalProfile::Leshonenu => "leshonenu",
            JournalProfile::Zion => "zion",
            JournalProfile::Generic => "generic",
        }
    }

    /// Names the journal goes by in archive folder names, key first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            JournalProfile::Sidra => &["sidra", "sibra"],
            JournalProfile::Leshonenu => &["leshonenu", "lecohotenu"],
            JournalProfile::Tarbiz => &["tarbiz"],
            JournalProfile::Meghillot => &["meghillot"],
            JournalProfile::Shenmishivri => &["shenmishivri"],
            JournalProfile::Zion => &["zion"],
            JournalProfile::Generic => &["generic"],
        }
    }

    /// Guess the journal from a file or directory path.
    ///
    /// Matches the first profile with an alias occurring in the lowercased
    /// path and falls back to [`JournalProfile::Generic`].
    pub fn from_path_hint(path: &str) -> Self {
        let lowered = path.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .filter(|p| *p != JournalProfile::Generic)
            .find(|p| p.aliases().iter().any(|alias| lowered.contains(alias)))
            .unwrap_or(JournalProfile::Generic)
    }
}

impl fmt::Display for JournalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for JournalProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.aliases().contains(&key.as_str()))
            .ok_or(Error::UnknownProfile(key))
    }
}

/// Layout thresholds for one journal and scan mode.
///
/// Geometry values are in page pixels of the OCR raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Lowest `top` a continuing footnote's last line may have
    pub bottom_margin_min: f64,
    /// Highest `top` a continuing footnote's last line may have
    pub bottom_margin_max: f64,
    /// Left margin a continuing footnote must reach on even pages
    pub left_margin_threshold_even: f64,
    /// Left margin a continuing footnote must reach on odd pages
    pub left_margin_threshold_odd: f64,
    /// Maximum first-line extent of a continuation on even pages
    pub width_threshold_even: f64,
    /// Maximum first-line extent of a continuation on odd pages
    pub width_threshold_odd: f64,
    /// Left position above which a segment opens a new footnote (even pages)
    pub merge_footnotes_threshold_even: f64,
    /// Left position above which a segment opens a new footnote (odd pages)
    pub merge_footnotes_threshold_odd: f64,
    /// Left position marking an embedded footnote number (even pages)
    pub split_threshold_even: f64,
    /// Left position marking an embedded footnote number (odd pages)
    pub split_threshold_odd: f64,
    /// Minimum word count for a paragraph to be retained
    pub min_words: usize,
    /// Minimum paragraph size difference separating footnotes from body
    pub size_tolerance: f64,
    /// Paragraphs containing any of these (case-insensitive) are dropped
    pub exclusion_phrases: Vec<String>,
    /// Journal title phrases dropped from the first page
    pub first_page_title_phrases: Vec<String>,
    /// Masthead phrases captured as header text on the first page
    pub masthead_phrases: Vec<String>,
    /// Maximum summed `left` of a footnote block's first line for it to be
    /// split off as a leading fragment; `None` disables the split
    pub leading_fragment_left_sum: Option<f64>,
    /// Drop an asterisk note opening the first page's footnotes
    pub drop_first_page_asterisk_note: bool,
    /// Footnotes starting with one of these labels are abbreviation entries
    pub abbreviation_labels: Vec<String>,
    /// Remove bidi control characters from final text
    pub strip_direction_marks: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ThresholdConfig {
    /// Create a configuration with the generic defaults.
    pub fn new() -> Self {
        Self {
            bottom_margin_min: 1605.0,
            bottom_margin_max: 1695.0,
            left_margin_threshold_even: 195.0,
            left_margin_threshold_odd: 295.0,
            width_threshold_even: 1040.0,
            width_threshold_odd: 1140.0,
            merge_footnotes_threshold_even: 1050.0,
            merge_footnotes_threshold_odd: 1120.0,
            split_threshold_even: 1050.0,
            split_threshold_odd: 1150.0,
            min_words: 3,
            size_tolerance: 2.0,
            exclusion_phrases: [
                "https://about,jstor.org/terms",
                "[תרביץ",
                "(תרביץ",
                "https://about.jstor.org/terms",
                "https://aboutjstor.org/terms",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            first_page_title_phrases: vec!["לשוננו".to_string()],
            masthead_phrases: ["מגילות", "magilot", "לשוננו", "lecohotenu"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            leading_fragment_left_sum: Some(7400.0),
            drop_first_page_asterisk_note: true,
            abbreviation_labels: Vec::new(),
            strip_direction_marks: true,
        }
    }

    /// Built-in thresholds for a journal and scan mode.
    pub fn for_journal(profile: JournalProfile, mode: ScanMode) -> Self {
        let scanned = mode == ScanMode::Scanned;
        let base = Self::new();
        match profile {
            JournalProfile::Tarbiz if scanned => base
                .with_bottom_margin(1605.0, 1695.0)
                .with_left_margin(195.0, 195.0)
                .with_width(1095.0, 1095.0)
                .with_merge(1070.0, 1070.0)
                .with_split(1085.0, 1085.0)
                .with_leading_fragment_left_sum(Some(7200.0)),
            JournalProfile::Tarbiz => base
                .with_bottom_margin(1605.0, 1670.0)
                .with_left_margin(195.0, 295.0)
                .with_width(1070.0, 1160.0)
                .with_merge(1050.0, 1080.0)
                .with_split(1070.0, 1170.0)
                .with_leading_fragment_left_sum(Some(7200.0)),
            JournalProfile::Meghillot => {
                let config = base
                    .with_left_margin(220.0, 220.0)
                    .with_leading_fragment_left_sum(Some(6700.0));
                if scanned {
                    config
                        .with_bottom_margin(1670.0, 1680.0)
                        .with_width(1030.0, 1030.0)
                        .with_merge(1027.0, 1027.0)
                        .with_split(1050.0, 1050.0)
                } else {
                    config
                        .with_bottom_margin(1660.0, 1670.0)
                        .with_width(1025.0, 1025.0)
                        .with_merge(1050.0, 1140.0)
                        .with_split(1080.0, 1150.0)
                }
            },
            JournalProfile::Shenmishivri => base
                .with_bottom_margin(1645.0, 1720.0)
                .with_left_margin(208.0, 208.0)
                .with_width(1075.0, 1075.0)
                .with_merge(1045.0, 1045.0)
                .with_split(1055.0, 1055.0)
                .with_leading_fragment_left_sum(Some(7000.0)),
            JournalProfile::Sidra => {
                let config = base
                    .with_bottom_margin(1680.0, 1712.0)
                    .with_width(1090.0, 1090.0)
                    .with_leading_fragment_left_sum(Some(7200.0));
                if scanned {
                    config
                        .with_left_margin(195.0, 195.0)
                        .with_merge(1070.0, 1070.0)
                        .with_split(1080.0, 1080.0)
                } else {
                    config
                        .with_left_margin(195.0, 295.0)
                        .with_merge(1050.0, 1140.0)
                        .with_split(1080.0, 1150.0)
                }
            },
            JournalProfile::Leshonenu => {
                let config = base
                    .with_bottom_margin(1655.0, 1675.0)
                    .with_left_margin(220.0, 220.0);
                if scanned {
                    config
                        .with_width(1060.0, 1060.0)
                        .with_merge(950.0, 950.0)
                        .with_split(1050.0, 1050.0)
                        .with_leading_fragment_left_sum(Some(7200.0))
                } else {
                    config
                        .with_width(1080.0, 1080.0)
                        .with_merge(1050.0, 1140.0)
                        .with_split(1070.0, 1140.0)
                        .with_leading_fragment_left_sum(Some(6700.0))
                }
            },
            JournalProfile::Zion => {
                let config = base
                    .with_bottom_margin(1680.0, 1698.0)
                    .with_left_margin(225.0, 225.0)
                    .with_width(1080.0, 1080.0)
                    .with_leading_fragment_left_sum(Some(7200.0));
                if scanned {
                    config.with_merge(1070.0, 1070.0).with_split(1080.0, 1080.0)
                } else {
                    config.with_merge(1050.0, 1140.0).with_split(1080.0, 1150.0)
                }
            },
            JournalProfile::Generic => {
                let config = base
                    .with_bottom_margin(1671.0, 1680.0)
                    .with_left_margin(220.0, 220.0)
                    .with_width(1077.0, 1077.0)
                    .with_leading_fragment_left_sum(Some(7200.0));
                if scanned {
                    config.with_merge(1070.0, 1070.0).with_split(1080.0, 1080.0)
                } else {
                    config.with_merge(1050.0, 1140.0).with_split(1080.0, 1150.0)
                }
            },
        }
    }

    /// Set the bottom-margin window.
    pub fn with_bottom_margin(mut self, min: f64, max: f64) -> Self {
        self.bottom_margin_min = min;
        self.bottom_margin_max = max;
        self
    }

    /// Set the left-margin thresholds (even, odd).
    pub fn with_left_margin(mut self, even: f64, odd: f64) -> Self {
        self.left_margin_threshold_even = even;
        self.left_margin_threshold_odd = odd;
        self
    }

    /// Set the continuation width thresholds (even, odd).
    pub fn with_width(mut self, even: f64, odd: f64) -> Self {
        self.width_threshold_even = even;
        self.width_threshold_odd = odd;
        self
    }

    /// Set the segment merge thresholds (even, odd).
    pub fn with_merge(mut self, even: f64, odd: f64) -> Self {
        self.merge_footnotes_threshold_even = even;
        self.merge_footnotes_threshold_odd = odd;
        self
    }

    /// Set the embedded-number split thresholds (even, odd).
    pub fn with_split(mut self, even: f64, odd: f64) -> Self {
        self.split_threshold_even = even;
        self.split_threshold_odd = odd;
        self
    }

    /// Set the minimum paragraph word count.
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Set the size tolerance of the footnote decision.
    pub fn with_size_tolerance(mut self, tolerance: f64) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    /// Replace the exclusion phrases.
    pub fn with_exclusion_phrases(mut self, phrases: Vec<String>) -> Self {
        self.exclusion_phrases = phrases;
        self
    }

    /// Set or disable the leading-fragment split.
    pub fn with_leading_fragment_left_sum(mut self, sum: Option<f64>) -> Self {
        self.leading_fragment_left_sum = sum;
        self
    }

    /// Replace the abbreviation labels.
    pub fn with_abbreviation_labels(mut self, labels: Vec<String>) -> Self {
        self.abbreviation_labels = labels;
        self
    }

    /// Keep or strip bidi control characters in final text.
    pub fn with_strip_direction_marks(mut self, strip: bool) -> Self {
        self.strip_direction_marks = strip;
        self
    }

    /// Left-margin threshold for a page parity.
    pub fn left_margin_threshold(&self, parity: Parity) -> f64 {
        match parity {
            Parity::Even => self.left_margin_threshold_even,
            Parity::Odd => self.left_margin_threshold_odd,
        }
    }

    /// Continuation width threshold for a page parity.
    pub fn width_threshold(&self, parity: Parity) -> f64 {
        match parity {
            Parity::Even => self.width_threshold_even,
            Parity::Odd => self.width_threshold_odd,
        }
    }

    /// Segment merge threshold for a page parity.
    pub fn merge_threshold(&self, parity: Parity) -> f64 {
        match parity {
            Parity::Even => self.merge_footnotes_threshold_even,
            Parity::Odd => self.merge_footnotes_threshold_odd,
        }
    }

    /// Embedded-number split threshold for a page parity.
    pub fn split_threshold(&self, parity: Parity) -> f64 {
        match parity {
            Parity::Even => self.split_threshold_even,
            Parity::Odd => self.split_threshold_odd,
        }
    }

    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("bottom_margin_min", self.bottom_margin_min),
            ("bottom_margin_max", self.bottom_margin_max),
            ("left_margin_threshold_even", self.left_margin_threshold_even),
            ("left_margin_threshold_odd", self.left_margin_threshold_odd),
            ("width_threshold_even", self.width_threshold_even),
            ("width_threshold_odd", self.width_threshold_odd),
            ("merge_footnotes_threshold_even", self.merge_footnotes_threshold_even),
            ("merge_footnotes_threshold_odd", self.merge_footnotes_threshold_odd),
            ("split_threshold_even", self.split_threshold_even),
            ("split_threshold_odd", self.split_threshold_odd),
            ("size_tolerance", self.size_tolerance),
        ];
        if let Some((name, _)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("{} is not finite", name)));
        }
        if self.bottom_margin_min > self.bottom_margin_max {
            return Err(Error::InvalidConfig(format!(
                "bottom margin window reversed: {} > {}",
                self.bottom_margin_min, self.bottom_margin_max
            )));
        }
        if self.size_tolerance < 0.0 {
            return Err(Error::InvalidConfig("size_tolerance must not be negative".to_string()));
        }
        if self.min_words == 0 {
            return Err(Error::InvalidConfig("min_words must be at least 1".to_string()));
        }
        if matches!(self.leading_fragment_left_sum, Some(v) if !v.is_finite()) {
            return Err(Error::InvalidConfig(
                "leading_fragment_left_sum is not finite".to_string(),
            ));
        }
        Ok(())
    }
}
