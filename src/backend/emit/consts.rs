//! Constant emission
//!
//! Constants are declared uninitialized inside their owner's body and defined in the owner's companion translation
//! unit, or in the header after the class for generic owners. Rendering a literal also validates it against its
//! declared type.

use bridgegen_ast::{Const, DefKind, Ident, Meta, Prim, TypeRef, Value};

use super::Emitter;
use crate::backend::cpp_writer::CppWriter;
use crate::backend::errors::GenerateError;

/// The owner of a list of constants, as seen from the generated code.
#[derive(Debug, Clone)]
pub struct ConstScope<'c> {
    /// IDL name of the owning declaration.
    pub owner: &'c Ident,
    /// C++ qualifier of the owner inside the project namespace (`Point`, `Listener<T>`).
    pub owner_expr: String,
    /// `template <...>` line preceding each definition of a generic owner.
    pub template: Option<String>,
    pub consts: &'c [Const],
}

impl<'a> Emitter<'a> {
    /// Declare every constant of a scope inside the owner's body.
    pub(super) fn declare_consts(&self, w: &mut CppWriter, consts: &[Const]) {
        for c in consts {
            w.doc(&c.doc);
            w.line(&format!(
                "static {} const {};",
                self.native.typename(&c.ty),
                self.config.native_const(&c.ident)
            ));
        }
    }

    /// Define every constant of a scope, separated by blank lines, in declaration order.
    pub(super) fn define_consts(&self, w: &mut CppWriter, scope: &ConstScope<'_>) -> Result<(), GenerateError> {
        for (index, c) in scope.consts.iter().enumerate() {
            if index > 0 {
                w.blank_line();
            }
            let value = self.render_value(scope, index, c, &c.ty, &c.value)?;
            if let Some(template) = &scope.template {
                w.line(template);
            }
            w.line(&format!(
                "{} const {}::{} = {};",
                self.native.typename(&c.ty),
                scope.owner_expr,
                self.config.native_const(&c.ident),
                value
            ));
        }
        Ok(())
    }

    /// Render one literal as initializer text.
    ///
    /// ## Parameters
    /// - `scope`: constants of the owner, for constant references.
    /// - `index`: position of the constant being defined; references must point before it.
    /// - `c`: the constant being defined (for diagnostics).
    /// - `ty`: the type the literal must fit (the constant's type, or a field type inside a record literal).
    /// - `value`: the literal.
    pub fn render_value(
        &self,
        scope: &ConstScope<'_>,
        index: usize,
        c: &Const,
        ty: &TypeRef,
        value: &Value,
    ) -> Result<String, GenerateError> {
        let owner = scope.owner.to_string();
        let name = c.ident.to_string();

        if let Value::ConstRef(target) = value {
            let Some(pos) = scope.consts.iter().position(|k| &k.ident == target) else {
                return Err(GenerateError::UnknownConstRef {
                    owner,
                    name,
                    target: target.to_string(),
                });
            };
            if pos >= index {
                return Err(GenerateError::ForwardConstRef {
                    owner,
                    name,
                    target: target.to_string(),
                });
            }
            let target_ty = &scope.consts[pos].ty;
            if target_ty != ty {
                return Err(GenerateError::ConstRefType {
                    owner,
                    name,
                    ty: ty.to_string(),
                    target: target.to_string(),
                    target_ty: target_ty.to_string(),
                });
            }
            return Ok(format!("{}::{}", scope.owner_expr, self.config.native_const(target)));
        }

        let kind_error = || GenerateError::ConstKind {
            owner: scope.owner.to_string(),
            name: c.ident.to_string(),
            ty: ty.to_string(),
            found: value.kind_name().to_string(),
        };

        match &ty.base {
            Meta::Primitive(prim) => match (prim, value) {
                (Prim::Bool, Value::Bool(b)) => Ok(b.to_string()),
                (p, Value::Int(i)) if p.is_integer() => Ok(i.to_string()),
                (p, Value::Int(i)) if p.is_float() => Ok(render_float(*i as f64, *p == Prim::F32)),
                (p, Value::Float(f)) if p.is_float() => {
                    if !f.is_finite() {
                        return Err(GenerateError::NonFiniteFloat { owner, name });
                    }
                    Ok(render_float(*f, *p == Prim::F32))
                }
                (Prim::String, Value::String(s)) => Ok(s.clone()),
                (Prim::Binary | Prim::Date, _) => Err(GenerateError::UnsupportedConstType {
                    owner,
                    name,
                    ty: ty.to_string(),
                }),
                _ => Err(kind_error()),
            },
            Meta::Optional => match ty.args.first() {
                Some(inner) => self.render_value(scope, index, c, inner, value),
                None => Err(kind_error()),
            },
            Meta::Def(def) if def.kind == DefKind::Enum => {
                let Value::EnumOption(option) = value else {
                    return Err(kind_error());
                };
                let declared = self
                    .registry
                    .enumeration(def.name.as_str())
                    .and_then(|e| e.ordinal(option.as_str()));
                if declared.is_none() {
                    return Err(GenerateError::UnknownEnumOption {
                        owner,
                        name,
                        enumeration: def.name.to_string(),
                        option: option.to_string(),
                    });
                }
                Ok(format!(
                    "{}::{}",
                    self.config.native_qualified(&def.name),
                    self.config.native_enum_option(option)
                ))
            }
            Meta::Def(def) if def.kind == DefKind::Record => {
                let Value::Record(values) = value else {
                    return Err(kind_error());
                };
                let Some(record) = self.registry.record(def.name.as_str()) else {
                    return Err(GenerateError::UnresolvedType {
                        owner,
                        name: def.name.to_string(),
                        kind: def.kind.name().to_string(),
                    });
                };
                if let Some(extra) = values.keys().find(|k| !record.fields.iter().any(|f| f.ident.name == **k)) {
                    return Err(GenerateError::UnknownField {
                        owner,
                        name,
                        record: def.name.to_string(),
                        field: extra.clone(),
                    });
                }
                let mut args = Vec::with_capacity(record.fields.len());
                for field in &record.fields {
                    let Some(v) = values.get(field.ident.as_str()) else {
                        return Err(GenerateError::MissingField {
                            owner,
                            name,
                            record: def.name.to_string(),
                            field: field.ident.to_string(),
                        });
                    };
                    let rendered = self.render_value(scope, index, c, &field.ty, v)?;
                    args.push(format!("{} /* {} */", rendered, self.config.native_field(&field.ident)));
                }
                Ok(format!("{}({})", self.native.typename(ty), args.join(", ")))
            }
            _ => Err(GenerateError::UnsupportedConstType {
                owner,
                name,
                ty: ty.to_string(),
            }),
        }
    }
}

/// Decimal text that always reads as floating point in C++.
fn render_float(f: f64, single: bool) -> String {
    // Debug keeps a fractional part or exponent ("1.0", "1e-7").
    let text = format!("{:?}", f);
    if single { format!("{}f", text) } else { text }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::GeneratorConfig;
    use crate::backend::marshal::{CppMarshal, WinRtMarshal};
    use crate::backend::registry::Registry;
    use bridgegen_ast::{DeclKind, Doc, Document, Enum, EnumOption, Field, Record, TypeDecl};
    use std::collections::BTreeMap;

    fn konst(name: &str, ty: TypeRef, value: Value) -> Const {
        Const {
            ident: Ident::new(name),
            doc: Doc::default(),
            ty,
            value,
        }
    }

    fn field(name: &str, ty: TypeRef) -> Field {
        Field {
            ident: Ident::new(name),
            doc: Doc::default(),
            ty,
        }
    }

    fn document() -> Document {
        Document {
            origin: "t.idl".to_string(),
            decls: vec![
                TypeDecl {
                    ident: Ident::new("color"),
                    doc: Doc::default(),
                    kind: DeclKind::Enum(Enum {
                        options: vec![EnumOption {
                            ident: Ident::new("red"),
                            doc: Doc::default(),
                        }],
                    }),
                },
                TypeDecl {
                    ident: Ident::new("pair"),
                    doc: Doc::default(),
                    kind: DeclKind::Record(Record {
                        fields: vec![
                            field("a", TypeRef::prim(Prim::I32)),
                            field("b", TypeRef::prim(Prim::String)),
                        ],
                        ..Record::default()
                    }),
                },
            ],
        }
    }

    /// Render `consts` as the definitions of a record named `owner`.
    fn define(consts: &[Const]) -> Result<String, GenerateError> {
        let doc = document();
        let registry = Registry::build(&doc)?;
        let config = GeneratorConfig::default().with_namespace("ns");
        let native = CppMarshal::new(config.clone());
        let component = WinRtMarshal::new(config.clone());
        let emitter = Emitter {
            config: &config,
            native: &native,
            component: &component,
            registry: &registry,
            origin: &doc.origin,
        };
        let owner = Ident::new("owner");
        let scope = ConstScope {
            owner: &owner,
            owner_expr: "Owner".to_string(),
            template: None,
            consts,
        };
        let mut w = CppWriter::new();
        emitter.define_consts(&mut w, &scope)?;
        Ok(w.finish())
    }

    fn pair(entries: &[(&str, Value)]) -> Value {
        Value::Record(entries.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect::<BTreeMap<_, _>>())
    }

    #[test]
    fn test_scalar_literals() {
        let out = define(&[
            konst("flag", TypeRef::prim(Prim::Bool), Value::Bool(true)),
            konst("count", TypeRef::prim(Prim::I64), Value::Int(-3)),
            konst("ratio", TypeRef::prim(Prim::F32), Value::Float(0.5)),
            konst("scale", TypeRef::prim(Prim::F64), Value::Int(2)),
            konst("label", TypeRef::prim(Prim::String), Value::String("\"hi\"".to_string())),
        ])
        .unwrap();
        assert_eq!(
            out,
            "bool const Owner::FLAG = true;\n\
             \n\
             int64_t const Owner::COUNT = -3;\n\
             \n\
             float const Owner::RATIO = 0.5f;\n\
             \n\
             double const Owner::SCALE = 2.0;\n\
             \n\
             std::string const Owner::LABEL = \"hi\";\n"
        );
    }

    #[test]
    fn test_enum_option_literal() {
        let out = define(&[konst(
            "tint",
            TypeRef::def("color", DefKind::Enum),
            Value::EnumOption(Ident::new("red")),
        )])
        .unwrap();
        assert_eq!(out, "::ns::Color const Owner::TINT = ::ns::Color::RED;\n");
    }

    #[test]
    fn test_unknown_enum_option() {
        let err = define(&[konst(
            "tint",
            TypeRef::def("color", DefKind::Enum),
            Value::EnumOption(Ident::new("mauve")),
        )])
        .unwrap_err();
        assert!(matches!(err, GenerateError::UnknownEnumOption { ref option, .. } if option == "mauve"));
    }

    #[test]
    fn test_record_literal_uses_declared_field_order() {
        let value = pair(&[("b", Value::String("\"x\"".to_string())), ("a", Value::Int(1))]);
        let out = define(&[konst("c", TypeRef::def("pair", DefKind::Record), value)]).unwrap();
        assert_eq!(out, "::ns::Pair const Owner::C = ::ns::Pair(1 /* a */, \"x\" /* b */);\n");
    }

    #[test]
    fn test_record_literal_field_mismatch() {
        let ty = TypeRef::def("pair", DefKind::Record);
        let missing = define(&[konst("c", ty.clone(), pair(&[("a", Value::Int(1))]))]).unwrap_err();
        assert!(matches!(missing, GenerateError::MissingField { ref field, .. } if field == "b"));

        let extra = pair(&[
            ("a", Value::Int(1)),
            ("b", Value::String("\"x\"".to_string())),
            ("z", Value::Int(0)),
        ]);
        let unknown = define(&[konst("c", ty, extra)]).unwrap_err();
        assert!(matches!(unknown, GenerateError::UnknownField { ref field, .. } if field == "z"));
    }

    #[test]
    fn test_const_reference_to_earlier_constant() {
        let out = define(&[
            konst("base", TypeRef::prim(Prim::I32), Value::Int(7)),
            konst("alias", TypeRef::prim(Prim::I32), Value::ConstRef(Ident::new("base"))),
        ])
        .unwrap();
        assert!(out.ends_with("int32_t const Owner::ALIAS = Owner::BASE;\n"));
    }

    #[test]
    fn test_const_reference_rejections() {
        let forward = define(&[
            konst("alias", TypeRef::prim(Prim::I32), Value::ConstRef(Ident::new("base"))),
            konst("base", TypeRef::prim(Prim::I32), Value::Int(7)),
        ])
        .unwrap_err();
        assert!(matches!(forward, GenerateError::ForwardConstRef { .. }));

        let unknown = define(&[konst(
            "alias",
            TypeRef::prim(Prim::I32),
            Value::ConstRef(Ident::new("nothing")),
        )])
        .unwrap_err();
        assert!(matches!(unknown, GenerateError::UnknownConstRef { .. }));

        let mistyped = define(&[
            konst("base", TypeRef::prim(Prim::I64), Value::Int(7)),
            konst("alias", TypeRef::prim(Prim::I32), Value::ConstRef(Ident::new("base"))),
        ])
        .unwrap_err();
        assert!(matches!(mistyped, GenerateError::ConstRefType { .. }));
    }

    #[test]
    fn test_kind_and_type_rejections() {
        let err = define(&[konst("n", TypeRef::prim(Prim::I32), Value::Bool(false))]).unwrap_err();
        assert!(matches!(err, GenerateError::ConstKind { ref found, .. } if found == "bool"));

        let err = define(&[konst("d", TypeRef::prim(Prim::Date), Value::Int(0))]).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedConstType { .. }));

        let err = define(&[konst("l", TypeRef::list(TypeRef::prim(Prim::I32)), Value::Int(0))]).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedConstType { .. }));

        let err = define(&[konst("f", TypeRef::prim(Prim::F64), Value::Float(f64::NAN))]).unwrap_err();
        assert!(matches!(err, GenerateError::NonFiniteFloat { .. }));
    }

    #[test]
    fn test_render_float_always_reads_as_float() {
        assert_eq!(render_float(1.0, false), "1.0");
        assert_eq!(render_float(1.0, true), "1.0f");
        assert_eq!(render_float(0.1, false), "0.1");
    }
}
