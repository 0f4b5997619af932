//! Lineage code parsing and token ordering.
//!
//! # Responsibility
//! - Turn a raw `Gene` value into ordered path tokens.
//! - Provide the natural ordering used for siblings and record pre-sort.
//!
//! # Invariants
//! - Parsing never fails; malformed codes produce an empty path.

pub mod collate;
pub mod parser;

pub use collate::{compare_tokens, TokenComparator};
pub use parser::parse_segments;
