//! Generation errors
//!
//! Every variant is an invariant violation in the resolved input. None is recoverable: the generator stops at the
//! first one and returns no artifacts.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while validating or emitting a document.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum GenerateError {
    #[error("declaration '{name}' is defined more than once")]
    #[diagnostic(code(bridgegen::duplicate_decl), help("rename one of the declarations"))]
    DuplicateDecl { name: String },

    #[error("'{owner}' references unknown {kind} '{name}'")]
    #[diagnostic(
        code(bridgegen::unresolved_type),
        help("the resolver must emit a declaration for every referenced type, with a matching kind")
    )]
    UnresolvedType { owner: String, name: String, kind: String },

    #[error("'{owner}': type '{ty}' takes {expected} type argument(s), found {found}")]
    #[diagnostic(code(bridgegen::arity))]
    Arity {
        owner: String,
        ty: String,
        expected: usize,
        found: usize,
    },

    #[error("'{owner}' uses type parameter '{param}' outside of a generic interface that declares it")]
    #[diagnostic(code(bridgegen::unknown_type_param))]
    UnknownTypeParam { owner: String, param: String },

    #[error("constant '{owner}.{name}' of type '{ty}' cannot hold a {found}")]
    #[diagnostic(code(bridgegen::const_kind), help("the literal kind must match the declared type"))]
    ConstKind {
        owner: String,
        name: String,
        ty: String,
        found: String,
    },

    #[error("constant '{owner}.{name}' has type '{ty}', which has no literal form")]
    #[diagnostic(
        code(bridgegen::unsupported_const_type),
        help("constants may be booleans, numbers, strings, enums, optionals, or records of those")
    )]
    UnsupportedConstType { owner: String, name: String, ty: String },

    #[error("constant '{owner}.{name}' is missing field '{field}' of record '{record}'")]
    #[diagnostic(code(bridgegen::missing_field))]
    MissingField {
        owner: String,
        name: String,
        record: String,
        field: String,
    },

    #[error("constant '{owner}.{name}' sets field '{field}', which record '{record}' does not declare")]
    #[diagnostic(code(bridgegen::unknown_field))]
    UnknownField {
        owner: String,
        name: String,
        record: String,
        field: String,
    },

    #[error("constant '{owner}.{name}' names option '{option}', which enum '{enumeration}' does not declare")]
    #[diagnostic(code(bridgegen::unknown_enum_option))]
    UnknownEnumOption {
        owner: String,
        name: String,
        enumeration: String,
        option: String,
    },

    #[error("constant '{owner}.{name}' refers to '{target}', which is declared after it")]
    #[diagnostic(
        code(bridgegen::forward_const_ref),
        help("move '{target}' above '{name}'; constants may only refer to earlier constants of the same type")
    )]
    ForwardConstRef { owner: String, name: String, target: String },

    #[error("constant '{owner}.{name}' refers to unknown constant '{target}'")]
    #[diagnostic(code(bridgegen::unknown_const_ref))]
    UnknownConstRef { owner: String, name: String, target: String },

    #[error("constant '{owner}.{name}' of type '{ty}' refers to '{target}' of type '{target_ty}'")]
    #[diagnostic(code(bridgegen::const_ref_type))]
    ConstRefType {
        owner: String,
        name: String,
        ty: String,
        target: String,
        target_ty: String,
    },

    #[error("constant '{owner}.{name}' is not a finite number")]
    #[diagnostic(code(bridgegen::non_finite_float), help("NaN and infinities have no portable literal"))]
    NonFiniteFloat { owner: String, name: String },

    #[error("declarations '{first}' and '{second}' both generate '{}'", .path.display())]
    #[diagnostic(
        code(bridgegen::duplicate_artifact),
        help("rename one declaration or change the extension suffix")
    )]
    DuplicateArtifact {
        first: String,
        second: String,
        path: PathBuf,
    },
}
