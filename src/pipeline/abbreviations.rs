//! Bibliographic abbreviation entries.
//!
//! Some journals print a key of abbreviations ("ירושלמי = ...") in the
//! footnote area of an article's first pages. Those entries are recognized by
//! a configured set of labels and reported separately from footnotes.

use crate::pipeline::result::{FootnoteEntry, LineRole};

/// True when `text` opens with one of `labels`.
///
/// Leading punctuation, digits and direction marks are skipped; the
/// comparison is case-insensitive.
pub fn is_abbreviation(text: &str, labels: &[String]) -> bool {
    if labels.is_empty() {
        return false;
    }
    let body = text.trim_start_matches(|c: char| !c.is_alphabetic());
    if body.is_empty() {
        return false;
    }
    let body = body.to_lowercase();
    labels
        .iter()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .any(|l| body.starts_with(&l))
}

/// Split `entries` into footnotes and abbreviation entries.
///
/// Order is kept within each side. Abbreviations get [`LineRole::Abbrev`].
pub fn partition_abbreviations(
    entries: Vec<FootnoteEntry>,
    labels: &[String],
) -> (Vec<FootnoteEntry>, Vec<FootnoteEntry>) {
    let (mut abbreviations, footnotes): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|e| is_abbreviation(&e.text, labels));
    for entry in &mut abbreviations {
        entry.role = LineRole::Abbrev;
    }
    (footnotes, abbreviations)
}
