//! Canonical target-language vocabulary.
//!
//! - [`cpp_keywords`]: reserved words that generated native identifiers must avoid
//! - [`conventions`]: well-known names shared by every generated artifact

pub mod conventions;
pub mod cpp_keywords;
