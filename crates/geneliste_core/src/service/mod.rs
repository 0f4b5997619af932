//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record sources and the tree pipeline into use-case APIs.
//! - Keep the CLI decoupled from storage details.

pub mod tree_service;
