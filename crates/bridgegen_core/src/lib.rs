//! Provide shared, pure naming helpers and canonical target vocabulary for the bridgegen backend.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers the emitters use to turn
//! IDL identifiers into target-language names:
//! - identifier casing styles (the pluggable naming-style functions, one set per type system), and
//! - C++ vocabulary (keywords, well-known generated names).
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, and no AST types.
//! - Choosing a naming policy is the caller's job; this crate only provides the mechanics and sensible defaults.

pub mod ident;
pub mod lang;

pub use ident::{IdentStyle, IdentStyles, split_words};
