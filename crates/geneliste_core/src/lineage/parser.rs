//! Lineage code tokenizer.
//!
//! Splits `#aa#ba#ca#` (or the legacy `&1a&2a&`) into path tokens.

use once_cell::sync::Lazy;
use regex::Regex;

/// Primary segment delimiter.
pub const LINEAGE_DELIMITER: char = '#';
/// Legacy delimiter accepted as an equivalent separator.
pub const LEGACY_LINEAGE_DELIMITER: char = '&';

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("[{LINEAGE_DELIMITER}{LEGACY_LINEAGE_DELIMITER}]"))
        .expect("valid delimiter regex")
});

/// Splits a lineage code into trimmed, non-empty tokens in original order.
///
/// Never fails: blank or delimiter-only input yields an empty vector.
pub fn parse_segments(code: &str) -> Vec<String> {
    DELIMITER_RE
        .split(code)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
