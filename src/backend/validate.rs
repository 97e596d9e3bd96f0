//! Type-expression validation
//!
//! Emitters assume every type expression is well formed: each base has the right number of arguments, every
//! declaration reference resolves to a declaration of the stated kind, and type parameters only appear inside the
//! generic interface that declares them. This pass checks those assumptions up front.
//!
//! Constant literals are checked by the constant emitter while rendering, since it has to walk them anyway.

use bridgegen_ast::{DeclKind, Document, Ident, Meta, TypeRef};

use super::errors::GenerateError;
use super::registry::Registry;

/// Validate every type expression of a document.
#[tracing::instrument(skip_all, fields(decl_count = doc.decls.len()))]
pub fn check(doc: &Document, registry: &Registry<'_>) -> Result<(), GenerateError> {
    for decl in &doc.decls {
        let owner = decl.ident.as_str();
        match &decl.kind {
            DeclKind::Enum(_) => {}
            DeclKind::Record(record) => {
                let types = record.fields.iter().map(|f| &f.ty).chain(record.consts.iter().map(|c| &c.ty));
                for ty in types {
                    check_type(ty, owner, &[], registry)?;
                }
            }
            DeclKind::Interface(iface) => {
                let params = &iface.type_params;
                for method in &iface.methods {
                    for p in &method.params {
                        check_type(&p.ty, owner, params, registry)?;
                    }
                    if let Some(ret) = &method.ret {
                        check_type(ret, owner, params, registry)?;
                    }
                }
                for c in &iface.consts {
                    check_type(&c.ty, owner, params, registry)?;
                }
            }
        }
    }
    Ok(())
}

/// Validate one type expression.
///
/// ## Parameters
/// - `ty`: the expression.
/// - `owner`: IDL name of the declaration using it (for diagnostics).
/// - `params`: type parameters in scope.
/// - `registry`: declarations of the document.
pub fn check_type(ty: &TypeRef, owner: &str, params: &[Ident], registry: &Registry<'_>) -> Result<(), GenerateError> {
    let expected = match &ty.base {
        Meta::Def(def) => {
            registry
                .get(def.name.as_str())
                .filter(|d| d.def_kind() == def.kind)
                .ok_or_else(|| GenerateError::UnresolvedType {
                    owner: owner.to_string(),
                    name: def.name.to_string(),
                    kind: def.kind.name().to_string(),
                })?;
            registry
                .interface(def.name.as_str())
                .map_or(0, |iface| iface.type_params.len())
        }
        Meta::Param(p) => {
            if !params.contains(p) {
                return Err(GenerateError::UnknownTypeParam {
                    owner: owner.to_string(),
                    param: p.to_string(),
                });
            }
            0
        }
        // Every other base has a fixed arity.
        other => other.arity().unwrap_or(0),
    };

    if ty.args.len() != expected {
        return Err(GenerateError::Arity {
            owner: owner.to_string(),
            ty: ty.to_string(),
            expected,
            found: ty.args.len(),
        });
    }
    for arg in &ty.args {
        check_type(arg, owner, params, registry)?;
    }
    Ok(())
}
