//! Resolved IDL syntax tree for the bridgegen backend.
//!
//! The upstream parser and resolver produce these nodes once; the backend reads them and never mutates them.
//! All nodes derive serde so a resolver written in any language can hand its output over as JSON.

pub mod ast;

pub use ast::*;
