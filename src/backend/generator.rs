//! Generator facade
//!
//! Validates a whole document, then dispatches each declaration to its emitter. Either every artifact is returned or
//! the first error is; there is no partial output.

use std::collections::HashMap;
use std::path::PathBuf;

use bridgegen_ast::{Document, TypeDecl};

use super::GeneratorConfig;
use super::emit::Emitter;
use super::errors::GenerateError;
use super::marshal::{ComponentMarshal, CppMarshal, NativeMarshal, WinRtMarshal};
use super::output::Artifact;
use super::registry::Registry;
use super::validate;

/// Turns resolved documents into C++ artifacts.
///
/// A generator holds no per-run state and is `Send + Sync`; one instance can serve any number of documents.
pub struct Generator {
    config: GeneratorConfig,
    native: Box<dyn NativeMarshal>,
    component: Box<dyn ComponentMarshal>,
}

impl Generator {
    /// Create a generator using the default C++ and C++/WinRT marshals.
    pub fn new(config: GeneratorConfig) -> Self {
        let native = Box::new(CppMarshal::new(config.clone()));
        let component = Box::new(WinRtMarshal::new(config.clone()));
        Self::with_marshals(config, native, component)
    }

    /// Create a generator with caller-supplied marshals.
    pub fn with_marshals(
        config: GeneratorConfig,
        native: Box<dyn NativeMarshal>,
        component: Box<dyn ComponentMarshal>,
    ) -> Self {
        Self {
            config,
            native,
            component,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every artifact of a document.
    ///
    /// ## Returns
    /// - `Vec<Artifact>`: in declaration order; each declaration's artifacts in a fixed order.
    ///
    /// ## Errors
    /// - The first invariant violation found, see [`GenerateError`].
    #[tracing::instrument(skip_all, fields(origin = %doc.origin, decl_count = doc.decls.len()))]
    pub fn generate(&self, doc: &Document) -> Result<Vec<Artifact>, GenerateError> {
        let registry = Registry::build(doc)?;
        validate::check(doc, &registry)?;

        let emitter = self.emitter(doc, &registry);
        let mut artifacts = Vec::new();
        let mut owners: HashMap<PathBuf, String> = HashMap::new();
        for decl in &doc.decls {
            for artifact in emitter.emit_decl(decl)? {
                if let Some(first) = owners.insert(artifact.path.clone(), decl.ident.to_string()) {
                    return Err(GenerateError::DuplicateArtifact {
                        first,
                        second: decl.ident.to_string(),
                        path: artifact.path,
                    });
                }
                tracing::debug!(path = %artifact.path.display(), decl = %decl.ident, "generated");
                artifacts.push(artifact);
            }
        }

        tracing::info!(artifact_count = artifacts.len(), "generation complete");
        Ok(artifacts)
    }

    /// Generate the artifacts of one declaration of `doc`.
    ///
    /// The document is still validated as a whole, since the declaration may reference any other.
    pub fn generate_decl(&self, doc: &Document, decl: &TypeDecl) -> Result<Vec<Artifact>, GenerateError> {
        let registry = Registry::build(doc)?;
        validate::check(doc, &registry)?;
        self.emitter(doc, &registry).emit_decl(decl)
    }

    fn emitter<'a>(&'a self, doc: &'a Document, registry: &'a Registry<'a>) -> Emitter<'a> {
        Emitter {
            config: &self.config,
            native: self.native.as_ref(),
            component: self.component.as_ref(),
            registry,
            origin: &doc.origin,
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bridgegen_ast::{DeclKind, DefKind, Doc, Enum, EnumOption, Field, Ident, Record, RecordExt, TypeRef};

    fn decl(name: &str, kind: DeclKind) -> TypeDecl {
        TypeDecl {
            ident: Ident::new(name),
            doc: Doc::default(),
            kind,
        }
    }

    fn color() -> TypeDecl {
        decl(
            "color",
            DeclKind::Enum(Enum {
                options: vec![EnumOption {
                    ident: Ident::new("red"),
                    doc: Doc::default(),
                }],
            }),
        )
    }

    #[test]
    fn test_generator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Generator>();
    }

    #[test]
    fn test_artifacts_follow_declaration_order() {
        let doc = Document {
            origin: "t.idl".to_string(),
            decls: vec![
                color(),
                decl(
                    "swatch",
                    DeclKind::Record(Record {
                        fields: vec![Field {
                            ident: Ident::new("tint"),
                            doc: Doc::default(),
                            ty: TypeRef::def("color", DefKind::Enum),
                        }],
                        ..Record::default()
                    }),
                ),
            ],
        };
        let artifacts = Generator::default().generate(&doc).unwrap();
        let paths: Vec<_> = artifacts.iter().map(|a| a.path.to_string_lossy().into_owned()).collect();
        assert_eq!(
            paths,
            vec![
                "include/color.hpp",
                "include/swatch.hpp",
                "include/swatch_bridge.hpp",
                "src/swatch_bridge.cpp"
            ]
        );
    }

    #[test]
    fn test_validation_failure_returns_no_artifacts() {
        let doc = Document {
            origin: String::new(),
            decls: vec![
                color(),
                decl(
                    "swatch",
                    DeclKind::Record(Record {
                        fields: vec![Field {
                            ident: Ident::new("tint"),
                            doc: Doc::default(),
                            ty: TypeRef::def("colour", DefKind::Enum),
                        }],
                        ..Record::default()
                    }),
                ),
            ],
        };
        let err = Generator::default().generate(&doc).unwrap_err();
        assert!(matches!(err, GenerateError::UnresolvedType { ref name, .. } if name == "colour"));
    }

    #[test]
    fn test_colliding_artifact_paths_rejected() {
        // `point` extensible natively generates point_base.hpp, as does a record literally named `point_base`.
        let ext = RecordExt {
            native: true,
            component: false,
        };
        let doc = Document {
            origin: String::new(),
            decls: vec![
                decl(
                    "point",
                    DeclKind::Record(Record {
                        ext,
                        ..Record::default()
                    }),
                ),
                decl("point_base", DeclKind::Record(Record::default())),
            ],
        };
        let err = Generator::default().generate(&doc).unwrap_err();
        assert_eq!(
            err,
            GenerateError::DuplicateArtifact {
                first: "point".to_string(),
                second: "point_base".to_string(),
                path: PathBuf::from("include/point_base.hpp"),
            }
        );
    }

    #[test]
    fn test_generate_decl_matches_full_run() {
        let doc = Document {
            origin: "t.idl".to_string(),
            decls: vec![color()],
        };
        let generator = Generator::default();
        assert_eq!(
            generator.generate_decl(&doc, &doc.decls[0]).unwrap(),
            generator.generate(&doc).unwrap()
        );
    }
}
