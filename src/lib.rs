#![forbid(unsafe_code)]
//! Bridgegen: C++ / C++/WinRT bridge generation
//!
//! This crate is the C++ backend of a multi-target IDL compiler. It takes a resolved document (constants, enums,
//! records, interfaces) and emits native C++ declarations, plus per-record bridges that convert between the native
//! struct and its C++/WinRT component projection.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Invalid input**: A malformed document is a user error, never a panic. Every check reports a
//!   [`GenerateError`](backend::GenerateError) naming the offending declaration.

pub mod backend;
pub mod cli;

pub use bridgegen_ast as ast;

pub use backend::{Artifact, ArtifactWriter, GenerateError, Generator, GeneratorConfig};
