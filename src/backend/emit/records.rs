//! Record emission
//!
//! A record produces its native value type and a bridge converting between that type and the projected runtime
//! class:
//!
//! | artifact | contents |
//! |---|---|
//! | `<r>.hpp` | `struct <R>` with constants, fields, and a field-order constructor |
//! | `<r>.cpp` | constant definitions (only when the record has constants) |
//! | `<r>_bridge.hpp` | `struct <R>Bridge` declaring `ToNative` and `ToComponent` |
//! | `<r>_bridge.cpp` | the conversion functions, one step per field in declared order |
//!
//! A record extensible on the native side generates `<R>Base` instead of `<R>`; one extensible on either side
//! generates `<R>BaseBridge`. The plain names are left for the hand-written subclasses, which is also what other
//! generated code refers to.

use bridgegen_ast::{Record, TypeDecl};
use bridgegen_core::lang::conventions::{
    BRIDGE_PARAM, COMPONENT_TYPE_ALIAS, NATIVE_TYPE_ALIAS, TO_COMPONENT_FN, TO_NATIVE_FN,
};

use super::{ConstScope, Emitter};
use crate::backend::cpp_writer::CppWriter;
use crate::backend::errors::GenerateError;
use crate::backend::marshal::Builder;
use crate::backend::output::Artifact;
use crate::backend::refs::{RefMode, References, collect_all};

impl<'a> Emitter<'a> {
    pub(super) fn emit_record(&self, decl: &TypeDecl, record: &Record) -> Result<Vec<Artifact>, GenerateError> {
        let mut artifacts = vec![self.record_header(decl, record)];
        if !record.consts.is_empty() {
            artifacts.push(self.record_source(decl, record)?);
        }
        artifacts.push(self.bridge_header(decl, record));
        artifacts.push(self.bridge_source(decl, record));
        Ok(artifacts)
    }

    fn record_header(&self, decl: &TypeDecl, record: &Record) -> Artifact {
        let name = self.config.record_struct_name(&decl.ident, record.ext);
        let types = record.fields.iter().map(|f| &f.ty).chain(record.consts.iter().map(|c| &c.ty));
        let mut refs = collect_all(self.native, types, RefMode::Header, Some(&decl.ident));
        if !record.fields.is_empty() {
            refs.include("<utility>");
        }

        let mut w = CppWriter::new();
        self.preamble(&mut w, true);
        self.includes(&mut w, &refs);
        w.namespace(&self.config.namespace, |w| {
            self.forwards(w, &refs);
            w.doc(&decl.doc);
            let header = if record.ext.native {
                format!("struct {}", name)
            } else {
                format!("struct {} final", name)
            };
            w.type_block(&header, |w| {
                self.declare_consts(w, &record.consts);
                if !record.consts.is_empty() && !record.fields.is_empty() {
                    w.blank_line();
                }
                for field in &record.fields {
                    w.doc(&field.doc);
                    w.line(&format!(
                        "{} {};",
                        self.native.typename(&field.ty),
                        self.config.native_field(&field.ident)
                    ));
                }
                if !record.fields.is_empty() {
                    w.blank_line();
                    self.field_constructor(w, &name, record);
                }
                if record.ext.native {
                    if !record.fields.is_empty() || !record.consts.is_empty() {
                        w.blank_line();
                    }
                    w.line(&format!("virtual ~{}() = default;", name));
                }
            });
        });

        self.header(&self.config.record_file_stem(&decl.ident, record.ext), w.finish())
    }

    /// Constructor taking every field in declared order, by value, and moving each into place.
    fn field_constructor(&self, w: &mut CppWriter, name: &str, record: &Record) {
        let params: Vec<String> = record
            .fields
            .iter()
            .map(|f| {
                format!(
                    "{} {}_",
                    self.native.typename(&f.ty),
                    self.config.native_local(&f.ident)
                )
            })
            .collect();
        w.line(&format!("{}({})", name, params.join(", ")));
        for (i, f) in record.fields.iter().enumerate() {
            let lead = if i == 0 { ":" } else { "," };
            w.line(&format!(
                "{} {}(std::move({}_))",
                lead,
                self.config.native_field(&f.ident),
                self.config.native_local(&f.ident)
            ));
        }
        w.line("{}");
    }

    fn record_source(&self, decl: &TypeDecl, record: &Record) -> Result<Artifact, GenerateError> {
        let stem = self.config.record_file_stem(&decl.ident, record.ext);
        let scope = ConstScope {
            owner: &decl.ident,
            owner_expr: self.config.record_struct_name(&decl.ident, record.ext),
            template: None,
            consts: &record.consts,
        };

        let mut w = CppWriter::new();
        self.preamble(&mut w, false);
        w.line(&format!("#include {}", self.config.include_target(&stem)));
        w.blank_line();
        let mut result = Ok(());
        w.namespace(&self.config.namespace, |w| {
            result = self.define_consts(w, &scope);
        });
        result?;

        Ok(self.source(&stem, w.finish()))
    }

    fn bridge_header(&self, decl: &TypeDecl, record: &Record) -> Artifact {
        let name = self.config.bridge_name(&decl.ident, record.ext);
        let mut refs = References::new();
        refs.include(self.config.include_target(&self.config.file_stem(&decl.ident)));
        refs.include(self.config.component_projection_header());

        let mut w = CppWriter::new();
        self.preamble(&mut w, true);
        self.includes(&mut w, &refs);
        w.namespace(&self.config.namespace, |w| {
            let header = if record.ext.any() {
                format!("struct {}", name)
            } else {
                format!("struct {} final", name)
            };
            w.type_block(&header, |w| {
                w.line(&format!(
                    "using {} = {};",
                    NATIVE_TYPE_ALIAS,
                    self.config.native_qualified(&decl.ident)
                ));
                w.line(&format!(
                    "using {} = {};",
                    COMPONENT_TYPE_ALIAS,
                    self.config.component_qualified(&decl.ident)
                ));
                w.blank_line();
                w.line(&format!(
                    "static {} {}({} const& {});",
                    NATIVE_TYPE_ALIAS, TO_NATIVE_FN, COMPONENT_TYPE_ALIAS, BRIDGE_PARAM
                ));
                w.line(&format!(
                    "static {} {}({} const& {});",
                    COMPONENT_TYPE_ALIAS, TO_COMPONENT_FN, NATIVE_TYPE_ALIAS, BRIDGE_PARAM
                ));
            });
        });

        self.header(&self.config.bridge_file_stem(&decl.ident, record.ext), w.finish())
    }

    fn bridge_source(&self, decl: &TypeDecl, record: &Record) -> Artifact {
        let name = self.config.bridge_name(&decl.ident, record.ext);
        let stem = self.config.bridge_file_stem(&decl.ident, record.ext);
        let field_types = || record.fields.iter().map(|f| &f.ty);

        let mut refs = collect_all(self.native, field_types(), RefMode::Source, Some(&decl.ident));
        refs.merge(collect_all(
            self.component,
            field_types(),
            RefMode::Source,
            Some(&decl.ident),
        ));
        refs.include("<cassert>");
        refs.include(self.config.support_include_target());

        let mut w = CppWriter::new();
        self.preamble(&mut w, false);
        w.line(&format!("#include {}", self.config.include_target(&stem)));
        w.blank_line();
        self.includes(&mut w, &refs);
        w.namespace(&self.config.namespace, |w| {
            self.to_native_fn(w, &name, record);
            w.blank_line();
            self.to_component_fn(w, &name, record);
        });

        self.source(&stem, w.finish())
    }

    fn to_native_fn(&self, w: &mut CppWriter, bridge: &str, record: &Record) {
        let header = format!(
            "{b}::{n} {b}::{f}({c} const& {p})",
            b = bridge,
            n = NATIVE_TYPE_ALIAS,
            f = TO_NATIVE_FN,
            c = COMPONENT_TYPE_ALIAS,
            p = BRIDGE_PARAM
        );
        w.block(&header, |w| {
            w.line(&format!("assert({} != nullptr);", BRIDGE_PARAM));
            if record.fields.is_empty() {
                w.line(&format!("(void){};", BRIDGE_PARAM));
                w.line(&format!("return {}();", NATIVE_TYPE_ALIAS));
                return;
            }
            w.line(&format!("return {}(", NATIVE_TYPE_ALIAS));
            w.indent();
            let last = record.fields.len() - 1;
            for (i, field) in record.fields.iter().enumerate() {
                let read = self.component.accessor(field, BRIDGE_PARAM);
                let arg = self.component.to_native(&field.ty, &read);
                let end = if i == last { ");" } else { "," };
                w.line(&format!("{}{}", arg, end));
            }
            w.dedent();
        });
    }

    fn to_component_fn(&self, w: &mut CppWriter, bridge: &str, record: &Record) {
        let header = format!(
            "{b}::{c} {b}::{f}({n} const& {p})",
            b = bridge,
            c = COMPONENT_TYPE_ALIAS,
            f = TO_COMPONENT_FN,
            n = NATIVE_TYPE_ALIAS,
            p = BRIDGE_PARAM
        );
        w.block(&header, |w| {
            if record.fields.is_empty() {
                w.line(&format!("(void){};", BRIDGE_PARAM));
            }
            let mut builder = Builder::new(COMPONENT_TYPE_ALIAS);
            for field in &record.fields {
                let read = format!("{}.{}", BRIDGE_PARAM, self.config.native_field(&field.ident));
                let value = self.component.to_component(&field.ty, &read);
                builder = self.component.with_field(builder, field, value);
            }
            let lines = self.component.finish(builder);
            let last = lines.len().saturating_sub(1);
            for (i, line) in lines.iter().enumerate() {
                let end = if i == last { ";" } else { "" };
                if i == 0 {
                    w.line(&format!("return {}{}", line, end));
                } else {
                    w.indent();
                    w.line(&format!("{}{}", line, end));
                    w.dedent();
                }
            }
        });
    }
}
