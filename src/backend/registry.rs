//! Declaration lookup by name.

use std::collections::BTreeMap;

use bridgegen_ast::{DeclKind, Document, Enum, Interface, Record, TypeDecl};

use super::errors::GenerateError;

/// All declarations of one document, indexed by IDL name.
#[derive(Debug, Clone, Default)]
pub struct Registry<'a> {
    decls: BTreeMap<&'a str, &'a TypeDecl>,
}

impl<'a> Registry<'a> {
    /// Index a document. Fails on the first name declared twice.
    pub fn build(doc: &'a Document) -> Result<Self, GenerateError> {
        let mut decls = BTreeMap::new();
        for decl in &doc.decls {
            if decls.insert(decl.ident.as_str(), decl).is_some() {
                return Err(GenerateError::DuplicateDecl {
                    name: decl.ident.to_string(),
                });
            }
        }
        Ok(Self { decls })
    }

    pub fn get(&self, name: &str) -> Option<&'a TypeDecl> {
        self.decls.get(name).copied()
    }

    pub fn enumeration(&self, name: &str) -> Option<&'a Enum> {
        match &self.get(name)?.kind {
            DeclKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn record(&self, name: &str) -> Option<&'a Record> {
        match &self.get(name)?.kind {
            DeclKind::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn interface(&self, name: &str) -> Option<&'a Interface> {
        match &self.get(name)?.kind {
            DeclKind::Interface(i) => Some(i),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
