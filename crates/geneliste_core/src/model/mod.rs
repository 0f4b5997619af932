//! Record model shared by the store and the tree pipeline.
//!
//! # Responsibility
//! - Define the flat record shape read from CSV storage.
//! - Map configured column names onto the headers present in the data.
//!
//! # Invariants
//! - Records are plain data; the tree pipeline never mutates them.

pub mod record;
