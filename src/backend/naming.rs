//! Name derivation for generated types, members, and files.
//!
//! Every generated name flows through the configured [`IdentStyles`](bridgegen_core::IdentStyles); this module only
//! decides *which* identifier and suffixes a name is built from.

use std::path::PathBuf;

use bridgegen_ast::{Ident, RecordExt};
use bridgegen_core::lang::conventions::BRIDGE_SUFFIX;
use bridgegen_core::lang::cpp_keywords;

use super::GeneratorConfig;

impl GeneratorConfig {
    // ------------------------------------------------------------------
    // Native side
    // ------------------------------------------------------------------

    /// Native type name of a declaration, unqualified.
    pub fn native_type(&self, ident: &Ident) -> String {
        self.native_styles.ty.apply(ident.as_str())
    }

    /// Native type name qualified with the project namespace (`::ns::Name`).
    pub fn native_qualified(&self, ident: &Ident) -> String {
        self.qualify(&self.native_type(ident))
    }

    /// Qualify an unqualified native name with the project namespace.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            format!("::{}", name)
        } else {
            format!("::{}::{}", self.namespace, name)
        }
    }

    /// Name of the generated native struct for a record.
    ///
    /// A natively extensible record gets the extension suffix so the user's subclass can take the plain name.
    pub fn record_struct_name(&self, ident: &Ident, ext: RecordExt) -> String {
        if ext.native {
            self.native_styles
                .ty
                .apply(&format!("{}_{}", ident.as_str(), self.ext_suffix))
        } else {
            self.native_type(ident)
        }
    }

    /// Name of the bridge type for a record.
    pub fn bridge_name(&self, ident: &Ident, ext: RecordExt) -> String {
        self.native_styles.ty.apply(&self.bridge_base(ident, ext))
    }

    pub fn native_field(&self, ident: &Ident) -> String {
        cpp_keywords::escape_keyword(&self.native_styles.field.apply(ident.as_str()))
    }

    pub fn native_method(&self, ident: &Ident) -> String {
        cpp_keywords::escape_keyword(&self.native_styles.method.apply(ident.as_str()))
    }

    pub fn native_local(&self, ident: &Ident) -> String {
        cpp_keywords::escape_keyword(&self.native_styles.local.apply(ident.as_str()))
    }

    pub fn native_const(&self, ident: &Ident) -> String {
        cpp_keywords::escape_keyword(&self.native_styles.constant.apply(ident.as_str()))
    }

    pub fn native_enum_option(&self, ident: &Ident) -> String {
        cpp_keywords::escape_keyword(&self.native_styles.enum_option.apply(ident.as_str()))
    }

    pub fn native_type_param(&self, ident: &Ident) -> String {
        self.native_styles.type_param.apply(ident.as_str())
    }

    // ------------------------------------------------------------------
    // Component side
    // ------------------------------------------------------------------

    /// Projected component type name (`winrt::Ns::Name`).
    pub fn component_qualified(&self, ident: &Ident) -> String {
        let name = self.component_styles.ty.apply(ident.as_str());
        if self.component_namespace.is_empty() {
            format!("winrt::{}", name)
        } else {
            format!("winrt::{}::{}", self.component_namespace.replace('.', "::"), name)
        }
    }

    /// Projection header for the component namespace (`<winrt/Ns.h>`).
    ///
    /// Types in the global component namespace have no projection header of their own; they only need the base one.
    pub fn component_projection_header(&self) -> String {
        if self.component_namespace.is_empty() {
            return "<winrt/base.h>".to_string();
        }
        format!("<winrt/{}.h>", self.component_namespace)
    }

    pub fn component_field(&self, ident: &Ident) -> String {
        self.component_styles.field.apply(ident.as_str())
    }

    /// Qualified support-library type (`::bridge_support::Name`).
    pub fn support_type(&self, name: &str) -> String {
        format!("::{}::{}", self.support_namespace, name)
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// File stem of an enum or interface.
    pub fn file_stem(&self, ident: &Ident) -> String {
        self.native_styles.file.apply(ident.as_str())
    }

    /// File stem of the generated native struct of a record.
    pub fn record_file_stem(&self, ident: &Ident, ext: RecordExt) -> String {
        if ext.native {
            self.native_styles
                .file
                .apply(&format!("{}_{}", ident.as_str(), self.ext_suffix))
        } else {
            self.file_stem(ident)
        }
    }

    /// File stem of a record's bridge.
    pub fn bridge_file_stem(&self, ident: &Ident, ext: RecordExt) -> String {
        self.native_styles.file.apply(&self.bridge_base(ident, ext))
    }

    pub fn header_path(&self, stem: &str) -> PathBuf {
        self.header_out.join(format!("{}.{}", stem, self.header_ext))
    }

    pub fn source_path(&self, stem: &str) -> PathBuf {
        self.source_out.join(format!("{}.{}", stem, self.source_ext))
    }

    /// Quoted include target of a generated header (`"prefix/stem.hpp"`).
    pub fn include_target(&self, stem: &str) -> String {
        format!("\"{}{}.{}\"", self.include_prefix, stem, self.header_ext)
    }

    /// Quoted include target of the support library.
    pub fn support_include_target(&self) -> String {
        format!("\"{}\"", self.support_include)
    }

    fn bridge_base(&self, ident: &Ident, ext: RecordExt) -> String {
        if ext.any() {
            format!("{}_{}_{}", ident.as_str(), self.ext_suffix, BRIDGE_SUFFIX)
        } else {
            format!("{}_{}", ident.as_str(), BRIDGE_SUFFIX)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(native: bool, component: bool) -> RecordExt {
        RecordExt { native, component }
    }

    #[test]
    fn test_plain_record_names() {
        let config = GeneratorConfig::default();
        let id = Ident::new("user_profile");
        assert_eq!(config.record_struct_name(&id, RecordExt::default()), "UserProfile");
        assert_eq!(config.bridge_name(&id, RecordExt::default()), "UserProfileBridge");
        assert_eq!(config.record_file_stem(&id, RecordExt::default()), "user_profile");
        assert_eq!(config.bridge_file_stem(&id, RecordExt::default()), "user_profile_bridge");
    }

    #[test]
    fn test_extensible_record_names_get_suffix() {
        let config = GeneratorConfig::default();
        let id = Ident::new("user_profile");
        assert_eq!(config.record_struct_name(&id, ext(true, false)), "UserProfileBase");
        assert_eq!(config.record_file_stem(&id, ext(true, false)), "user_profile_base");
        // Component-only extension leaves the native struct alone but renames the bridge.
        assert_eq!(config.record_struct_name(&id, ext(false, true)), "UserProfile");
        assert_eq!(config.bridge_name(&id, ext(false, true)), "UserProfileBaseBridge");
        assert_eq!(config.bridge_file_stem(&id, ext(false, true)), "user_profile_base_bridge");
    }

    #[test]
    fn test_qualified_names() {
        let config = GeneratorConfig::default()
            .with_namespace("contoso::geo")
            .with_component_namespace("Contoso.Geo");
        let id = Ident::new("point");
        assert_eq!(config.native_qualified(&id), "::contoso::geo::Point");
        assert_eq!(config.component_qualified(&id), "winrt::Contoso::Geo::Point");
        assert_eq!(config.component_projection_header(), "<winrt/Contoso.Geo.h>");
        assert_eq!(config.support_type("I32"), "::bridge_support::I32");
    }

    #[test]
    fn test_empty_namespace_qualifies_globally() {
        let config = GeneratorConfig::default().with_namespace("");
        assert_eq!(config.native_qualified(&Ident::new("point")), "::Point");
    }

    #[test]
    fn test_empty_component_namespace_uses_base_projection() {
        let config = GeneratorConfig::default().with_component_namespace("");
        assert_eq!(config.component_qualified(&Ident::new("point")), "winrt::Point");
        assert_eq!(config.component_projection_header(), "<winrt/base.h>");
    }

    #[test]
    fn test_member_names_escape_keywords() {
        let config = GeneratorConfig::default();
        assert_eq!(config.native_field(&Ident::new("class")), "class_");
        assert_eq!(config.native_method(&Ident::new("delete")), "delete_");
        assert_eq!(config.native_const(&Ident::new("max_count")), "MAX_COUNT");
        assert_eq!(config.component_field(&Ident::new("max_count")), "MaxCount");
    }

    #[test]
    fn test_paths_and_includes() {
        let config = GeneratorConfig::default().with_include_prefix("gen/");
        assert_eq!(config.header_path("point"), PathBuf::from("include/point.hpp"));
        assert_eq!(config.source_path("point"), PathBuf::from("src/point.cpp"));
        assert_eq!(config.include_target("point"), "\"gen/point.hpp\"");
        assert_eq!(config.support_include_target(), "\"bridge_support/Marshal.hpp\"");
    }
}
