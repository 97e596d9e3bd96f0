//! Bridgegen Backend
//!
//! Turns a resolved IDL document into C++ source artifacts: native headers for constants, enums, records and
//! interfaces, plus a bridge per record converting between the native struct and its C++/WinRT projection.
//!
//! The pipeline is:
//! 1. Resolved [`Document`](bridgegen_ast::Document) → [`Registry`](registry::Registry) (lookup by name)
//! 2. [`validate`] checks every type reference against the registry
//! 3. [`emit`] renders each declaration through the marshals into [`Artifact`]s
//! 4. [`ArtifactWriter`] puts them on disk (optional; the CLI does this)
//!
//! ## Module Organization
//!
//! - `config.rs` - Generator configuration and builder
//! - `naming.rs` - Every generated identifier, path and include target
//! - `cpp_writer.rs` - Low-level C++ text builder
//! - `marshal/` - Per-language type rendering (`cpp.rs` native, `winrt.rs` component)
//! - `refs.rs` - Reference collection (includes and forward declarations)
//! - `registry.rs`, `validate.rs` - Declaration lookup and type checks
//! - `emit/` - One emitter per declaration kind, plus constants
//! - `generator.rs` - Facade tying it together
//! - `output.rs` - Artifacts and the filesystem writer

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod cpp_writer;
pub mod emit;
pub mod errors;
pub mod generator;
pub mod marshal;
mod naming;
pub mod output;
pub mod refs;
pub mod registry;
pub mod validate;

pub use config::GeneratorConfig;
pub use errors::GenerateError;
pub use generator::Generator;
pub use marshal::{ComponentMarshal, CppMarshal, NativeMarshal, WinRtMarshal};
pub use output::{Artifact, ArtifactWriter, WriteError, WriteSummary};
pub use refs::{RefMode, RefSource, References, SymbolRef};
