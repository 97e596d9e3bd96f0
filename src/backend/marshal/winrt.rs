//! C++/WinRT projection marshal.
//!
//! Conversions go through per-type translators of the runtime support library: every translator exposes static
//! `ToNative` and `ToComponent` functions, and container translators are templates over their element translators.
//! A record's translator is its generated bridge.

use bridgegen_ast::{DefKind, Field, Ident, Meta, Prim, RecordExt, TypeRef};
use bridgegen_core::lang::conventions::{EMPTY_FACTORY, SEED_PREFIX, TO_COMPONENT_FN, TO_NATIVE_FN, WITH_PREFIX};

use super::{Builder, ComponentMarshal, CppMarshal};
use crate::backend::GeneratorConfig;
use crate::backend::refs::{RefMode, RefSource, SymbolRef};

const BASE_HEADER: &str = "<winrt/base.h>";
const FOUNDATION_HEADER: &str = "<winrt/Windows.Foundation.h>";
const COLLECTIONS_HEADER: &str = "<winrt/Windows.Foundation.Collections.h>";
const COLLECTIONS_NS: &str = "winrt::Windows::Foundation::Collections";

/// Spells types as C++/WinRT projected types.
#[derive(Debug, Clone, Default)]
pub struct WinRtMarshal {
    config: GeneratorConfig,
    native: CppMarshal,
}

impl WinRtMarshal {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            native: CppMarshal::new(config.clone()),
            config,
        }
    }

    /// Qualified name of the translator converting values of `ty`.
    pub fn translator(&self, ty: &TypeRef) -> String {
        let support = |name: &str| self.config.support_type(name);
        match &ty.base {
            Meta::Primitive(p) => support(Self::prim_translator(*p)),
            Meta::Optional => format!("{}<{}>", support("Optional"), self.translator_args(&ty.args)),
            Meta::List => format!("{}<{}>", support("List"), self.translator_args(&ty.args)),
            Meta::Set => format!("{}<{}>", support("Set"), self.translator_args(&ty.args)),
            Meta::Map => format!("{}<{}>", support("Map"), self.translator_args(&ty.args)),
            Meta::Param(p) => format!("{}<{}>", support("Generic"), self.config.native_type_param(p)),
            Meta::Def(def) => match def.kind {
                DefKind::Enum => format!(
                    "{}<{}, {}>",
                    support("Enum"),
                    self.config.native_qualified(&def.name),
                    self.config.component_qualified(&def.name)
                ),
                // Hand-written subclasses of extensible bridges take the plain name.
                DefKind::Record => self
                    .config
                    .qualify(&self.config.bridge_name(&def.name, RecordExt::default())),
                DefKind::Interface => format!(
                    "{}<{}, {}>",
                    support("Interface"),
                    self.native.interface_class(def, &ty.args),
                    self.config.component_qualified(&def.name)
                ),
            },
        }
    }

    fn translator_args(&self, args: &[TypeRef]) -> String {
        args.iter().map(|a| self.translator(a)).collect::<Vec<_>>().join(", ")
    }

    fn prim_translator(prim: Prim) -> &'static str {
        match prim {
            Prim::Bool => "Bool",
            Prim::I8 => "I8",
            Prim::I16 => "I16",
            Prim::I32 => "I32",
            Prim::I64 => "I64",
            Prim::F32 => "F32",
            Prim::F64 => "F64",
            Prim::String => "String",
            Prim::Binary => "Binary",
            Prim::Date => "Date",
        }
    }

    fn prim_typename(prim: Prim) -> &'static str {
        match prim {
            Prim::Bool => "bool",
            Prim::I8 => "int8_t",
            Prim::I16 => "int16_t",
            Prim::I32 => "int32_t",
            Prim::I64 => "int64_t",
            Prim::F32 => "float",
            Prim::F64 => "double",
            Prim::String => "winrt::hstring",
            Prim::Binary => "winrt::com_array<uint8_t>",
            Prim::Date => "winrt::Windows::Foundation::DateTime",
        }
    }

    fn is_reference_type(ty: &TypeRef) -> bool {
        matches!(&ty.base, Meta::Def(d) if d.kind != DefKind::Enum)
    }

    fn args(&self, args: &[TypeRef]) -> String {
        args.iter().map(|a| ComponentMarshal::typename(self, a)).collect::<Vec<_>>().join(", ")
    }
}

impl RefSource for WinRtMarshal {
    fn references(&self, ty: &TypeRef, mode: RefMode, owner: Option<&Ident>) -> Vec<SymbolRef> {
        let include = |s: &str| SymbolRef::Include(s.to_string());
        match &ty.base {
            Meta::Primitive(Prim::Date) => vec![include(BASE_HEADER), include(FOUNDATION_HEADER)],
            Meta::Primitive(_) => vec![include(BASE_HEADER)],
            Meta::Optional => vec![include(FOUNDATION_HEADER)],
            Meta::List | Meta::Set | Meta::Map => vec![include(COLLECTIONS_HEADER)],
            Meta::Param(_) => Vec::new(),
            Meta::Def(def) => {
                let mut refs = vec![SymbolRef::Include(self.config.component_projection_header())];
                if def.kind == DefKind::Record && mode == RefMode::Source && owner != Some(&def.name) {
                    let stem = self.config.bridge_file_stem(&def.name, RecordExt::default());
                    refs.push(SymbolRef::Include(self.config.include_target(&stem)));
                }
                refs
            }
        }
    }
}

impl ComponentMarshal for WinRtMarshal {
    fn typename(&self, ty: &TypeRef) -> String {
        match &ty.base {
            Meta::Primitive(p) => Self::prim_typename(*p).to_string(),
            Meta::Optional => match ty.args.first() {
                // Runtime classes and interfaces are already nullable.
                Some(inner) if Self::is_reference_type(inner) => ComponentMarshal::typename(self, inner),
                _ => format!("winrt::Windows::Foundation::IReference<{}>", self.args(&ty.args)),
            },
            Meta::List | Meta::Set => format!("{}::IVector<{}>", COLLECTIONS_NS, self.args(&ty.args)),
            Meta::Map => format!("{}::IMap<{}>", COLLECTIONS_NS, self.args(&ty.args)),
            Meta::Param(p) => self.config.component_styles.type_param.apply(p.as_str()),
            Meta::Def(def) => {
                let name = self.config.component_qualified(&def.name);
                if ty.args.is_empty() {
                    name
                } else {
                    format!("{}<{}>", name, self.args(&ty.args))
                }
            }
        }
    }

    fn accessor(&self, field: &Field, instance: &str) -> String {
        format!("{}.{}()", instance, self.config.component_field(&field.ident))
    }

    fn to_native(&self, ty: &TypeRef, expr: &str) -> String {
        format!("{}::{}({})", self.translator(ty), TO_NATIVE_FN, expr)
    }

    fn to_component(&self, ty: &TypeRef, expr: &str) -> String {
        format!("{}::{}({})", self.translator(ty), TO_COMPONENT_FN, expr)
    }

    fn with_field(&self, builder: Builder, field: &Field, value: String) -> Builder {
        let name = self.config.component_field(&field.ident);
        match builder {
            Builder::Empty { ty } => Builder::Chain {
                head: format!("{}::{}{}({})", ty, SEED_PREFIX, name, value),
                steps: Vec::new(),
            },
            Builder::Chain { head, mut steps } => {
                steps.push(format!(".{}{}({})", WITH_PREFIX, name, value));
                Builder::Chain { head, steps }
            }
        }
    }

    fn finish(&self, builder: Builder) -> Vec<String> {
        match builder {
            Builder::Empty { ty } => vec![format!("{}::{}()", ty, EMPTY_FACTORY)],
            Builder::Chain { head, steps } => std::iter::once(head).chain(steps).collect(),
        }
    }
}
