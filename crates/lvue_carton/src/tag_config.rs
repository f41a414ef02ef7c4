//! Tag tables for the LVue template dialect.

use phf::{phf_set, Set};

/// The dialect's wrapper tag. A component template is conventionally wrapped
/// in exactly one of these.
pub const WRAPPER_TAG: &str = "template";

/// The slot outlet tag.
pub const SLOT_TAG: &str = "slot";

/// Elements whose content is literal (never scanned for directives or
/// interpolation).
static RAW_TEXT_TAGS: Set<&'static str> = phf_set! {
    "style",
    "script",
};

/// Check if a tag holds literal content (`<style>`, `<script>`).
#[inline]
pub fn is_raw_text_tag(tag: &str) -> bool {
    RAW_TEXT_TAGS.contains(tag)
}

/// Check if a tag is the dialect's wrapper tag.
#[inline]
pub fn is_wrapper_tag(tag: &str) -> bool {
    tag == WRAPPER_TAG
}

/// Check if a tag is the slot outlet tag.
#[inline]
pub fn is_slot_tag(tag: &str) -> bool {
    tag == SLOT_TAG
}
