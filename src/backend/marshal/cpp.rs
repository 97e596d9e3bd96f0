//! Native C++17 marshal.

use bridgegen_ast::{DefKind, DefRef, Ident, Meta, Prim, TypeRef};

use super::NativeMarshal;
use crate::backend::GeneratorConfig;
use crate::backend::refs::{RefMode, RefSource, SymbolRef};

/// Spells types as standard C++17 value types.
#[derive(Debug, Clone, Default)]
pub struct CppMarshal {
    config: GeneratorConfig,
}

impl CppMarshal {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
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
            Prim::String => "std::string",
            Prim::Binary => "std::vector<uint8_t>",
            Prim::Date => "std::chrono::system_clock::time_point",
        }
    }

    /// Native class of an interface, with template arguments (`::ns::Listener<int32_t>`).
    pub fn interface_class(&self, def: &DefRef, args: &[TypeRef]) -> String {
        let name = self.config.native_qualified(&def.name);
        if args.is_empty() {
            name
        } else {
            format!("{}<{}>", name, self.args(args))
        }
    }

    fn args(&self, args: &[TypeRef]) -> String {
        args.iter().map(|a| self.typename(a)).collect::<Vec<_>>().join(", ")
    }

    fn is_interface(ty: &TypeRef) -> bool {
        matches!(&ty.base, Meta::Def(d) if d.kind == DefKind::Interface)
    }

    fn is_by_value(ty: &TypeRef) -> bool {
        match &ty.base {
            Meta::Primitive(p) => p.is_integer() || p.is_float() || *p == Prim::Bool,
            Meta::Def(d) => d.kind == DefKind::Enum,
            _ => false,
        }
    }

    fn forward_decl(&self, def: &DefRef, arity: usize) -> String {
        let name = self.config.native_type(&def.name);
        match def.kind {
            DefKind::Record => format!("struct {};", name),
            DefKind::Enum => format!("enum class {} : int32_t;", name),
            DefKind::Interface if arity == 0 => format!("class {};", name),
            DefKind::Interface => {
                format!("template <{}> class {};", vec!["typename"; arity].join(", "), name)
            }
        }
    }
}

impl RefSource for CppMarshal {
    fn references(&self, ty: &TypeRef, mode: RefMode, owner: Option<&Ident>) -> Vec<SymbolRef> {
        let include = |s: &str| SymbolRef::Include(s.to_string());
        match &ty.base {
            Meta::Primitive(p) => match p {
                Prim::Bool | Prim::F32 | Prim::F64 => Vec::new(),
                Prim::I8 | Prim::I16 | Prim::I32 | Prim::I64 => vec![include("<cstdint>")],
                Prim::String => vec![include("<string>")],
                Prim::Binary => vec![include("<vector>"), include("<cstdint>")],
                Prim::Date => vec![include("<chrono>")],
            },
            // An optional interface is a nullable shared_ptr, not a std::optional.
            Meta::Optional if ty.args.first().is_some_and(Self::is_interface) => Vec::new(),
            Meta::Optional => vec![include("<optional>")],
            Meta::List => vec![include("<vector>")],
            Meta::Set => vec![include("<unordered_set>")],
            Meta::Map => vec![include("<unordered_map>")],
            Meta::Param(_) => Vec::new(),
            Meta::Def(def) => {
                let is_self = owner == Some(&def.name);
                let header = SymbolRef::Include(self.config.include_target(&self.config.file_stem(&def.name)));
                match def.kind {
                    DefKind::Enum => vec![header],
                    DefKind::Record if is_self => match mode {
                        RefMode::Header => vec![SymbolRef::Forward(self.forward_decl(def, 0))],
                        RefMode::Source => Vec::new(),
                    },
                    DefKind::Record => vec![header],
                    DefKind::Interface => {
                        let mut refs = vec![include("<memory>")];
                        if !is_self {
                            refs.push(match mode {
                                RefMode::Header => SymbolRef::Forward(self.forward_decl(def, ty.args.len())),
                                RefMode::Source => header,
                            });
                        }
                        refs
                    }
                }
            }
        }
    }
}

impl NativeMarshal for CppMarshal {
    fn typename(&self, ty: &TypeRef) -> String {
        match &ty.base {
            Meta::Primitive(p) => Self::prim_typename(*p).to_string(),
            Meta::Optional => match ty.args.first() {
                Some(inner) if Self::is_interface(inner) => self.typename(inner),
                _ => format!("std::optional<{}>", self.args(&ty.args)),
            },
            Meta::List => format!("std::vector<{}>", self.args(&ty.args)),
            Meta::Set => format!("std::unordered_set<{}>", self.args(&ty.args)),
            Meta::Map => format!("std::unordered_map<{}>", self.args(&ty.args)),
            Meta::Param(p) => self.config.native_type_param(p),
            Meta::Def(def) => match def.kind {
                DefKind::Enum | DefKind::Record => self.config.native_qualified(&def.name),
                DefKind::Interface => format!("std::shared_ptr<{}>", self.interface_class(def, &ty.args)),
            },
        }
    }

    fn param_type(&self, ty: &TypeRef) -> String {
        if Self::is_by_value(ty) {
            self.typename(ty)
        } else {
            format!("{} const&", self.typename(ty))
        }
    }

    fn return_type(&self, ty: Option<&TypeRef>) -> String {
        match ty {
            Some(ty) => self.typename(ty),
            None => "void".to_string(),
        }
    }
}
