//! Script classification and bidirectional reordering.

pub mod bidi;
pub mod script;

pub use bidi::{dominant_direction, reorder, Direction};
pub use script::{
    is_direction_control, is_ltr_letter, is_rtl_letter, normalize_quotes, strip_direction_marks,
    LRM, RLM,
};
