//! Declaration emitters
//!
//! One submodule per declaration kind, plus the constant emitter they share. Every emitter is a method on
//! [`Emitter`], which bundles the read-only collaborators of a generation run: configuration, both marshals, and the
//! declaration registry.
//!
//! ## Notes
//! - **File layout**: banner, provenance line, `#pragma once` (headers), sorted includes, then the project namespace
//!   with forward declarations first.
//! - **Purity**: emitters build strings; nothing here touches the filesystem.

mod consts;
mod enums;
mod interfaces;
mod records;

pub use consts::ConstScope;

use bridgegen_ast::{DeclKind, TypeDecl};
use bridgegen_core::lang::conventions::{GENERATED_BANNER, TOOL_NAME};

use super::GeneratorConfig;
use super::cpp_writer::CppWriter;
use super::errors::GenerateError;
use super::marshal::{ComponentMarshal, NativeMarshal};
use super::output::Artifact;
use super::refs::References;
use super::registry::Registry;

/// Read-only context shared by all emitters of one run.
pub struct Emitter<'a> {
    pub config: &'a GeneratorConfig,
    pub native: &'a dyn NativeMarshal,
    pub component: &'a dyn ComponentMarshal,
    pub registry: &'a Registry<'a>,
    /// IDL file name printed in the provenance line.
    pub origin: &'a str,
}

impl<'a> Emitter<'a> {
    /// Emit every artifact of one declaration, in a fixed order.
    pub fn emit_decl(&self, decl: &TypeDecl) -> Result<Vec<Artifact>, GenerateError> {
        match &decl.kind {
            DeclKind::Enum(e) => Ok(vec![self.emit_enum(decl, e)]),
            DeclKind::Record(r) => self.emit_record(decl, r),
            DeclKind::Interface(i) => self.emit_interface(decl, i),
        }
    }

    /// Banner, provenance, and (for headers) the include guard.
    fn preamble(&self, w: &mut CppWriter, header: bool) {
        w.line(GENERATED_BANNER);
        w.line(&format!("// This file was generated by {} from {}", TOOL_NAME, self.origin));
        w.blank_line();
        if header {
            w.line("#pragma once");
            w.blank_line();
        }
    }

    /// Sorted include lines followed by a blank line (nothing when empty).
    fn includes(&self, w: &mut CppWriter, refs: &References) {
        if refs.includes.is_empty() {
            return;
        }
        w.includes(&refs.includes);
        w.blank_line();
    }

    /// Forward declarations followed by a blank line (nothing when empty).
    fn forwards(&self, w: &mut CppWriter, refs: &References) {
        if refs.forwards.is_empty() {
            return;
        }
        for decl in &refs.forwards {
            w.line(decl);
        }
        w.blank_line();
    }

    fn header(&self, stem: &str, contents: String) -> Artifact {
        Artifact::new(self.config.header_path(stem), contents)
    }

    fn source(&self, stem: &str, contents: String) -> Artifact {
        Artifact::new(self.config.source_path(stem), contents)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::backend::marshal::{CppMarshal, WinRtMarshal};
    use bridgegen_ast::Document;

    /// Emit every declaration of `doc` with the default marshals.
    pub(crate) fn emit_all(config: &GeneratorConfig, doc: &Document) -> Result<Vec<Artifact>, GenerateError> {
        let registry = Registry::build(doc)?;
        let native = CppMarshal::new(config.clone());
        let component = WinRtMarshal::new(config.clone());
        let emitter = Emitter {
            config,
            native: &native,
            component: &component,
            registry: &registry,
            origin: &doc.origin,
        };
        let mut artifacts = Vec::new();
        for decl in &doc.decls {
            artifacts.extend(emitter.emit_decl(decl)?);
        }
        Ok(artifacts)
    }

    /// Contents of the artifact whose path ends with `suffix`.
    pub(crate) fn contents<'a>(artifacts: &'a [Artifact], suffix: &str) -> &'a str {
        artifacts
            .iter()
            .find(|a| a.path.to_string_lossy().ends_with(suffix))
            .map(|a| a.contents.as_str())
            .unwrap_or_else(|| panic!("no artifact ending with {}", suffix))
    }
}
