//! Interface emission
//!
//! An interface becomes an abstract class the component layer binds against. Instance methods are pure virtual;
//! static methods are plain declarations the user implements.
//!
//! Constants of a generic interface are defined in the header after the class, where every instantiation sees them.
//! The companion source then only includes the header.

use bridgegen_ast::{Interface, Method, TypeDecl};

use super::{ConstScope, Emitter};
use crate::backend::cpp_writer::CppWriter;
use crate::backend::errors::GenerateError;
use crate::backend::output::Artifact;
use crate::backend::refs::{RefMode, collect_all};

impl<'a> Emitter<'a> {
    pub(super) fn emit_interface(&self, decl: &TypeDecl, iface: &Interface) -> Result<Vec<Artifact>, GenerateError> {
        let mut artifacts = vec![self.interface_header(decl, iface)?];
        if !iface.consts.is_empty() {
            artifacts.push(self.interface_source(decl, iface)?);
        }
        Ok(artifacts)
    }

    /// `template <typename T, ...>` for a generic interface.
    fn template_line(&self, iface: &Interface) -> Option<String> {
        if iface.type_params.is_empty() {
            return None;
        }
        let params: Vec<String> = iface
            .type_params
            .iter()
            .map(|p| format!("typename {}", self.config.native_type_param(p)))
            .collect();
        Some(format!("template <{}>", params.join(", ")))
    }

    fn const_scope<'c>(&self, decl: &'c TypeDecl, iface: &'c Interface) -> ConstScope<'c> {
        let name = self.config.native_type(&decl.ident);
        let owner_expr = if iface.type_params.is_empty() {
            name
        } else {
            let params: Vec<String> = iface
                .type_params
                .iter()
                .map(|p| self.config.native_type_param(p))
                .collect();
            format!("{}<{}>", name, params.join(", "))
        };
        ConstScope {
            owner: &decl.ident,
            owner_expr,
            template: self.template_line(iface),
            consts: &iface.consts,
        }
    }

    /// Constants of generic interfaces are defined in the header.
    fn defines_consts_in_header(iface: &Interface) -> bool {
        !iface.type_params.is_empty() && !iface.consts.is_empty()
    }

    fn interface_header(&self, decl: &TypeDecl, iface: &Interface) -> Result<Artifact, GenerateError> {
        let name = self.config.native_type(&decl.ident);
        let types = iface
            .methods
            .iter()
            .flat_map(|m| m.params.iter().map(|p| &p.ty).chain(m.ret.as_ref()))
            .chain(iface.consts.iter().map(|c| &c.ty));
        let refs = collect_all(self.native, types, RefMode::Header, Some(&decl.ident));

        let mut w = CppWriter::new();
        self.preamble(&mut w, true);
        self.includes(&mut w, &refs);
        let mut result = Ok(());
        w.namespace(&self.config.namespace, |w| {
            self.forwards(w, &refs);
            w.doc(&decl.doc);
            if let Some(template) = self.template_line(iface) {
                w.line(&template);
            }
            w.type_block(&format!("class {}", name), |w| {
                w.dedent();
                w.line("public:");
                w.indent();
                w.line(&format!("virtual ~{}() = default;", name));
                if !iface.consts.is_empty() {
                    w.blank_line();
                    self.declare_consts(w, &iface.consts);
                }
                for method in &iface.methods {
                    w.blank_line();
                    w.doc(&method.doc);
                    w.line(&self.method_decl(method));
                }
            });
            if Self::defines_consts_in_header(iface) {
                w.blank_line();
                result = self.define_consts(w, &self.const_scope(decl, iface));
            }
        });
        result?;

        Ok(self.header(&self.config.file_stem(&decl.ident), w.finish()))
    }

    fn method_decl(&self, method: &Method) -> String {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{} {}", self.native.param_type(&p.ty), self.config.native_local(&p.ident)))
            .collect();
        let signature = format!(
            "{} {}({})",
            self.native.return_type(method.ret.as_ref()),
            self.config.native_method(&method.ident),
            params.join(", ")
        );
        if method.is_static {
            format!("static {};", signature)
        } else if method.is_const {
            format!("virtual {} const = 0;", signature)
        } else {
            format!("virtual {} = 0;", signature)
        }
    }

    fn interface_source(&self, decl: &TypeDecl, iface: &Interface) -> Result<Artifact, GenerateError> {
        let stem = self.config.file_stem(&decl.ident);
        let mut w = CppWriter::new();
        self.preamble(&mut w, false);
        w.line(&format!("#include {}", self.config.include_target(&stem)));
        if Self::defines_consts_in_header(iface) {
            return Ok(self.source(&stem, w.finish()));
        }

        w.blank_line();
        let scope = self.const_scope(decl, iface);
        let mut result = Ok(());
        w.namespace(&self.config.namespace, |w| {
            result = self.define_consts(w, &scope);
        });
        result?;

        Ok(self.source(&stem, w.finish()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::backend::GeneratorConfig;
    use crate::backend::emit::test_support::{contents, emit_all};
    use bridgegen_ast::{
        Const, DeclKind, DefKind, Doc, Document, Field, Ident, Interface, Method, Prim, TypeDecl, TypeRef, Value,
    };

    fn param(name: &str, ty: TypeRef) -> Field {
        Field {
            ident: Ident::new(name),
            doc: Doc::default(),
            ty,
        }
    }

    fn method(name: &str, params: Vec<Field>, ret: Option<TypeRef>) -> Method {
        Method {
            ident: Ident::new(name),
            doc: Doc::default(),
            params,
            ret,
            is_static: false,
            is_const: false,
        }
    }

    fn interface(name: &str, iface: Interface) -> Document {
        Document {
            origin: "svc.idl".to_string(),
            decls: vec![TypeDecl {
                ident: Ident::new(name),
                doc: Doc::default(),
                kind: DeclKind::Interface(iface),
            }],
        }
    }

    fn limit(name: &str, value: i64) -> Const {
        Const {
            ident: Ident::new(name),
            doc: Doc::default(),
            ty: TypeRef::prim(Prim::I32),
            value: Value::Int(value),
        }
    }

    #[test]
    fn test_interface_header() {
        let mut lookup = method(
            "lookup",
            vec![param("key", TypeRef::prim(Prim::String)), param("limit", TypeRef::prim(Prim::I32))],
            Some(TypeRef::list(TypeRef::prim(Prim::String))),
        );
        lookup.is_const = true;
        let mut create = method("create", Vec::new(), Some(TypeRef::def("store", DefKind::Interface)));
        create.is_static = true;
        create.doc = Doc::new(["Make a new store."]);
        let doc = interface(
            "store",
            Interface {
                type_params: Vec::new(),
                methods: vec![method("clear", Vec::new(), None), lookup, create],
                consts: Vec::new(),
            },
        );

        let artifacts = emit_all(&GeneratorConfig::default().with_namespace("svc"), &doc).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(
            contents(&artifacts, "include/store.hpp"),
            "// AUTOGENERATED FILE - DO NOT MODIFY!
// This file was generated by bridgegen from svc.idl

#pragma once

#include <cstdint>
#include <memory>
#include <string>
#include <vector>

namespace svc {

class Store {
public:
    virtual ~Store() = default;

    virtual void clear() = 0;

    virtual std::vector<std::string> lookup(std::string const& key, int32_t limit) const = 0;

    /** Make a new store. */
    static std::shared_ptr<::svc::Store> create();
};

}  // namespace svc
"
        );
    }

    #[test]
    fn test_generic_interface_with_constants() {
        let doc = interface(
            "listener",
            Interface {
                type_params: vec![Ident::new("t")],
                methods: vec![method("on_value", vec![param("value", TypeRef::param("t"))], None)],
                consts: vec![limit("max_pending", 8), limit("min_pending", 1)],
            },
        );
        let artifacts = emit_all(&GeneratorConfig::default().with_namespace("svc"), &doc).unwrap();
        assert_eq!(artifacts.len(), 2);

        // Definitions follow the class in the header so every instantiation of the template sees them.
        let header = contents(&artifacts, "include/listener.hpp");
        assert!(header.contains(
            "template <typename T>\nclass Listener {\npublic:\n    virtual ~Listener() = default;\n\n    \
             static int32_t const MAX_PENDING;\n    static int32_t const MIN_PENDING;\n\n    \
             virtual void on_value(T const& value) = 0;\n};\n\n\
             template <typename T>\nint32_t const Listener<T>::MAX_PENDING = 8;\n\n\
             template <typename T>\nint32_t const Listener<T>::MIN_PENDING = 1;\n\n}  // namespace svc\n"
        ));

        assert_eq!(
            contents(&artifacts, "src/listener.cpp"),
            "// AUTOGENERATED FILE - DO NOT MODIFY!
// This file was generated by bridgegen from svc.idl

#include \"listener.hpp\"
"
        );
    }

    #[test]
    fn test_plain_interface_constants_defined_in_source() {
        let doc = interface(
            "limits",
            Interface {
                type_params: Vec::new(),
                methods: Vec::new(),
                consts: vec![limit("max_pending", 8)],
            },
        );
        let artifacts = emit_all(&GeneratorConfig::default().with_namespace("svc"), &doc).unwrap();
        assert_eq!(artifacts.len(), 2);

        let header = contents(&artifacts, "include/limits.hpp");
        assert!(header.contains("    static int32_t const MAX_PENDING;\n};\n\n}  // namespace svc\n"));
        assert!(!header.contains("= 8"));
        assert!(
            contents(&artifacts, "src/limits.cpp")
                .ends_with("#include \"limits.hpp\"\n\nnamespace svc {\n\nint32_t const Limits::MAX_PENDING = 8;\n\n}  // namespace svc\n")
        );
    }

    #[test]
    fn test_interface_without_constants_has_no_source() {
        let doc = interface("empty", Interface::default());
        let artifacts = emit_all(&GeneratorConfig::default(), &doc).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(artifacts[0].path.ends_with("empty.hpp"));
        assert!(!artifacts[0].contents.contains("template"));
    }

    #[test]
    fn test_referenced_interface_is_forward_declared() {
        let mut doc = interface(
            "hub",
            Interface {
                type_params: Vec::new(),
                methods: vec![method(
                    "attach",
                    vec![param("store", TypeRef::def("store", DefKind::Interface))],
                    None,
                )],
                consts: Vec::new(),
            },
        );
        doc.decls.push(TypeDecl {
            ident: Ident::new("store"),
            doc: Doc::default(),
            kind: DeclKind::Interface(Interface::default()),
        });
        let artifacts = emit_all(&GeneratorConfig::default(), &doc).unwrap();
        let header = contents(&artifacts, "include/hub.hpp");
        assert!(header.contains("namespace bridge {\n\nclass Store;\n\nclass Hub {"));
        assert!(header.contains("virtual void attach(std::shared_ptr<::bridge::Store> const& store) = 0;"));
        assert!(!header.contains("\"store.hpp\""));
    }
}
