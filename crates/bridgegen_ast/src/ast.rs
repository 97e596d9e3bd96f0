//! Resolved AST definitions.
//!
//! Every type reference in this tree is already resolved: aliases are expanded, generic arguments are attached to
//! their base, and references to user declarations carry the declaration kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers and documentation
// ============================================================================

/// An IDL identifier, as written by the author.
///
/// Casing variants (type, method, field, ...) are derived through `bridgegen_core::IdentStyles`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Documentation attached to a declaration, one entry per source line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Doc {
    pub lines: Vec<String>,
}

impl Doc {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

// ============================================================================
// Type expressions
// ============================================================================

/// Built-in scalar and blob types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prim {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Binary,
    Date,
}

impl Prim {
    pub fn name(self) -> &'static str {
        match self {
            Prim::Bool => "bool",
            Prim::I8 => "i8",
            Prim::I16 => "i16",
            Prim::I32 => "i32",
            Prim::I64 => "i64",
            Prim::F32 => "f32",
            Prim::F64 => "f64",
            Prim::String => "string",
            Prim::Binary => "binary",
            Prim::Date => "date",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Prim::I8 | Prim::I16 | Prim::I32 | Prim::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Prim::F32 | Prim::F64)
    }
}

/// Kind of a user declaration referenced from a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefKind {
    Enum,
    Record,
    Interface,
}

impl DefKind {
    pub fn name(self) -> &'static str {
        match self {
            DefKind::Enum => "enum",
            DefKind::Record => "record",
            DefKind::Interface => "interface",
        }
    }
}

/// Which type systems expect a hand-written subclass of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordExt {
    #[serde(default)]
    pub native: bool,
    #[serde(default)]
    pub component: bool,
}

impl RecordExt {
    pub fn any(self) -> bool {
        self.native || self.component
    }
}

/// A resolved reference to a user declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefRef {
    pub name: Ident,
    pub kind: DefKind,
}

/// Base tag of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meta {
    Primitive(Prim),
    Optional,
    List,
    Set,
    Map,
    Def(DefRef),
    /// Generic type parameter of the enclosing interface.
    Param(Ident),
}

impl Meta {
    /// Number of type arguments this base requires.
    ///
    /// `None` for declaration references: a generic interface takes as many arguments as it declares type
    /// parameters, which only the declaration itself knows.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Meta::Optional | Meta::List | Meta::Set => Some(1),
            Meta::Map => Some(2),
            Meta::Primitive(_) | Meta::Param(_) => Some(0),
            Meta::Def(_) => None,
        }
    }
}

/// A resolved type expression: a base plus its ordered type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    pub base: Meta,
    #[serde(default)]
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(base: Meta, args: Vec<TypeRef>) -> Self {
        Self { base, args }
    }

    pub fn prim(prim: Prim) -> Self {
        Self::new(Meta::Primitive(prim), Vec::new())
    }

    pub fn optional(inner: TypeRef) -> Self {
        Self::new(Meta::Optional, vec![inner])
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::new(Meta::List, vec![inner])
    }

    pub fn set(inner: TypeRef) -> Self {
        Self::new(Meta::Set, vec![inner])
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::new(Meta::Map, vec![key, value])
    }

    pub fn def(name: impl Into<String>, kind: DefKind) -> Self {
        Self::new(
            Meta::Def(DefRef {
                name: Ident::new(name),
                kind,
            }),
            Vec::new(),
        )
    }

    /// Reference to a generic interface instantiated with `args`.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::new(
            Meta::Def(DefRef {
                name: Ident::new(name),
                kind: DefKind::Interface,
            }),
            args,
        )
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::new(Meta::Param(Ident::new(name)), Vec::new())
    }

    /// Visit this type and every nested argument, arguments first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeRef)) {
        for arg in &self.args {
            arg.walk(f);
        }
        f(self);
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            Meta::Primitive(p) => write!(f, "{}", p.name())?,
            Meta::Optional => write!(f, "optional")?,
            Meta::List => write!(f, "list")?,
            Meta::Set => write!(f, "set")?,
            Meta::Map => write!(f, "map")?,
            Meta::Def(d) => write!(f, "{}", d.name)?,
            Meta::Param(p) => write!(f, "{}", p)?,
        }
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

// ============================================================================
// Constants
// ============================================================================

/// A constant literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Already-escaped literal text, quotes included (e.g. `"\"hi\""`).
    String(String),
    /// Name of an option of the constant's enum type.
    EnumOption(Ident),
    /// Name of a constant declared earlier in the same type.
    ConstRef(Ident),
    /// Field name → value, for record-typed constants. Key order carries no meaning.
    Record(BTreeMap<String, Value>),
}

impl Value {
    /// Short description of the literal kind (for diagnostics).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::EnumOption(_) => "enum option",
            Value::ConstRef(_) => "constant reference",
            Value::Record(_) => "record literal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub ident: Ident,
    #[serde(default)]
    pub doc: Doc,
    pub ty: TypeRef,
    pub value: Value,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub ident: Ident,
    #[serde(default)]
    pub doc: Doc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    #[serde(default)]
    pub options: Vec<EnumOption>,
}

impl Enum {
    /// Ordinal of an option: its 0-based position in declaration order.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.ident.name == name)
    }
}

/// A record field or method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub ident: Ident,
    #[serde(default)]
    pub doc: Doc,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub consts: Vec<Const>,
    #[serde(default)]
    pub ext: RecordExt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub ident: Ident,
    #[serde(default)]
    pub doc: Doc,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub ret: Option<TypeRef>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// The method does not alter receiver state.
    #[serde(default, rename = "const")]
    pub is_const: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default)]
    pub type_params: Vec<Ident>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub consts: Vec<Const>,
}

/// Body of a top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeclKind {
    Enum(Enum),
    Record(Record),
    Interface(Interface),
}

/// A top-level named declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub ident: Ident,
    #[serde(default)]
    pub doc: Doc,
    #[serde(flatten)]
    pub kind: DeclKind,
}

impl TypeDecl {
    pub fn def_kind(&self) -> DefKind {
        match self.kind {
            DeclKind::Enum(_) => DefKind::Enum,
            DeclKind::Record(_) => DefKind::Record,
            DeclKind::Interface(_) => DefKind::Interface,
        }
    }

    /// Constants owned by this declaration (enums own none).
    pub fn consts(&self) -> &[Const] {
        match &self.kind {
            DeclKind::Enum(_) => &[],
            DeclKind::Record(r) => &r.consts,
            DeclKind::Interface(i) => &i.consts,
        }
    }
}

/// The resolver's output for one IDL file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// IDL file name the declarations came from.
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub decls: Vec<TypeDecl>,
}

impl Document {
    pub fn find(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.iter().find(|d| d.ident.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_ordinals_follow_declaration_order() {
        let e = Enum {
            options: ["red", "green", "blue"]
                .into_iter()
                .map(|n| EnumOption {
                    ident: Ident::new(n),
                    doc: Doc::default(),
                })
                .collect(),
        };
        assert_eq!(e.ordinal("red"), Some(0));
        assert_eq!(e.ordinal("green"), Some(1));
        assert_eq!(e.ordinal("blue"), Some(2));
        assert_eq!(e.ordinal("purple"), None);
    }

    #[test]
    fn test_type_display() {
        let ty = TypeRef::map(
            TypeRef::prim(Prim::String),
            TypeRef::list(TypeRef::optional(TypeRef::def("point", DefKind::Record))),
        );
        assert_eq!(ty.to_string(), "map<string, list<optional<point>>>");
    }

    #[test]
    fn test_walk_visits_arguments_first() {
        let ty = TypeRef::optional(TypeRef::def("node", DefKind::Record));
        let mut seen = Vec::new();
        ty.walk(&mut |t| seen.push(t.to_string()));
        assert_eq!(seen, vec!["node", "optional<node>"]);
    }

    #[test]
    fn test_document_from_json() {
        let json = r#"{
            "origin": "demo.idl",
            "decls": [
                { "ident": "color", "kind": "enum", "options": [{ "ident": "red" }, { "ident": "green" }] },
                {
                    "ident": "point",
                    "doc": ["A 2D point."],
                    "kind": "record",
                    "fields": [
                        { "ident": "x", "ty": { "base": { "primitive": "i32" } } },
                        { "ident": "tint", "ty": { "base": "optional", "args": [
                            { "base": { "def": { "name": "color", "kind": "enum" } } }
                        ] } }
                    ],
                    "consts": [
                        { "ident": "origin_x", "ty": { "base": { "primitive": "i32" } }, "value": { "int": 0 } }
                    ],
                    "ext": { "native": true }
                },
                {
                    "ident": "listener",
                    "kind": "interface",
                    "methods": [{ "ident": "on_point", "params": [
                        { "ident": "p", "ty": { "base": { "def": { "name": "point", "kind": "record" } } } }
                    ], "const": true }]
                }
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.origin, "demo.idl");
        assert_eq!(doc.decls.len(), 3);

        let point = doc.find("point").unwrap();
        assert_eq!(point.def_kind(), DefKind::Record);
        assert_eq!(point.doc.lines, vec!["A 2D point."]);
        let DeclKind::Record(record) = &point.kind else {
            panic!("expected record");
        };
        assert!(record.ext.native);
        assert!(!record.ext.component);
        assert_eq!(record.fields[1].ty.to_string(), "optional<color>");
        assert_eq!(record.consts[0].value, Value::Int(0));

        let DeclKind::Interface(listener) = &doc.find("listener").unwrap().kind else {
            panic!("expected interface");
        };
        assert!(listener.methods[0].is_const);
        assert!(!listener.methods[0].is_static);
        assert!(listener.methods[0].ret.is_none());
    }

    #[test]
    fn test_record_value_from_json() {
        let value: Value = serde_json::from_str(r#"{ "record": { "b": { "string": "\"x\"" }, "a": { "int": 1 } } }"#)
            .unwrap();
        let Value::Record(fields) = value else {
            panic!("expected record literal");
        };
        assert_eq!(fields["a"], Value::Int(1));
        assert_eq!(fields["b"], Value::String("\"x\"".to_string()));
    }
}
