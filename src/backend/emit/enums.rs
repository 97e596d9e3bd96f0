//! Enum emission
//!
//! One header per enum. Enumerators carry no explicit values: their ordinals are their declaration positions.

use bridgegen_ast::{Enum, TypeDecl};

use super::Emitter;
use crate::backend::cpp_writer::CppWriter;
use crate::backend::output::Artifact;
use crate::backend::refs::References;

impl<'a> Emitter<'a> {
    pub(super) fn emit_enum(&self, decl: &TypeDecl, e: &Enum) -> Artifact {
        let name = self.config.native_type(&decl.ident);
        let qualified = self.config.native_qualified(&decl.ident);

        let mut refs = References::new();
        refs.include("<cstdint>");
        if self.config.hash_enum_workaround {
            refs.include("<functional>");
        }

        let mut w = CppWriter::new();
        self.preamble(&mut w, true);
        self.includes(&mut w, &refs);
        w.namespace(&self.config.namespace, |w| {
            w.doc(&decl.doc);
            w.type_block(&format!("enum class {} : int32_t", name), |w| {
                for option in &e.options {
                    w.doc(&option.doc);
                    w.line(&format!("{},", self.config.native_enum_option(&option.ident)));
                }
            });
        });

        // Some standard libraries lack std::hash for enums; the specialization lives outside the project namespace.
        if self.config.hash_enum_workaround {
            w.blank_line();
            w.namespace("std", |w| {
                w.line("template <>");
                w.type_block(&format!("struct hash<{}>", qualified), |w| {
                    w.block(&format!("size_t operator()({} type) const", qualified), |w| {
                        w.line("return std::hash<int32_t>()(static_cast<int32_t>(type));");
                    });
                });
            });
        }

        self.header(&self.config.file_stem(&decl.ident), w.finish())
    }
}
