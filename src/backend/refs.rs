//! Reference collection
//!
//! Walks a resolved type expression and gathers the `#include` targets and forward declarations a generated file
//! needs to mention it. The marshal decides what a single node requires; this module owns the traversal and the
//! set semantics.
//!
//! ## Notes
//! - **Order**: type arguments are visited before their base. Output order does not depend on it: both sets are
//!   sorted and deduplicated.
//! - **Modes**: [`RefMode::Source`] drops forward declarations, since a translation unit always includes full
//!   definitions.

use std::collections::BTreeSet;

use bridgegen_ast::{Ident, TypeRef};

/// Kind of file the references are collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefMode {
    /// A header: inclusions plus forward declarations.
    Header,
    /// A translation unit: inclusions only.
    Source,
}

/// One requirement contributed by a single type node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolRef {
    /// Include target with its delimiters (`<vector>` or `"point.hpp"`).
    Include(String),
    /// A complete forward declaration (`struct Point;`).
    Forward(String),
}

/// Supplies the references required by one type node (not its arguments).
pub trait RefSource {
    /// ## Parameters
    /// - `ty`: the node; only `ty.base` and the shape of `ty.args` should be inspected.
    /// - `mode`: the kind of file being generated.
    /// - `owner`: the declaration whose file is being generated, for self-reference handling.
    fn references(&self, ty: &TypeRef, mode: RefMode, owner: Option<&Ident>) -> Vec<SymbolRef>;
}

/// Deduplicated, sorted inclusion and forward-declaration sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    pub includes: BTreeSet<String>,
    pub forwards: BTreeSet<String>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: SymbolRef) {
        match symbol {
            SymbolRef::Include(target) => {
                self.includes.insert(target);
            }
            SymbolRef::Forward(decl) => {
                self.forwards.insert(decl);
            }
        }
    }

    /// Add a literal include target.
    pub fn include(&mut self, target: impl Into<String>) {
        self.includes.insert(target.into());
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: References) {
        self.includes.extend(other.includes);
        self.forwards.extend(other.forwards);
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.forwards.is_empty()
    }
}

impl Extend<SymbolRef> for References {
    fn extend<I: IntoIterator<Item = SymbolRef>>(&mut self, iter: I) {
        for symbol in iter {
            self.insert(symbol);
        }
    }
}

/// Collect the references of one type expression.
///
/// ## Parameters
/// - `marshal`: per-node reference source (native or component side).
/// - `ty`: the type expression to walk.
/// - `mode`: header or translation unit.
/// - `owner`: declaration being generated, if any.
///
/// ## Returns
/// - `References`: a call-local value; merge several with [`References::merge`].
pub fn collect<M: RefSource + ?Sized>(marshal: &M, ty: &TypeRef, mode: RefMode, owner: Option<&Ident>) -> References {
    let mut refs = References::new();
    ty.walk(&mut |node| {
        for symbol in marshal.references(node, mode, owner) {
            if mode == RefMode::Source && matches!(symbol, SymbolRef::Forward(_)) {
                continue;
            }
            refs.insert(symbol);
        }
    });
    refs
}

/// Collect and union the references of several type expressions.
pub fn collect_all<'a, M: RefSource + ?Sized>(
    marshal: &M,
    types: impl IntoIterator<Item = &'a TypeRef>,
    mode: RefMode,
    owner: Option<&Ident>,
) -> References {
    let mut refs = References::new();
    for ty in types {
        refs.merge(collect(marshal, ty, mode, owner));
    }
    refs
}
