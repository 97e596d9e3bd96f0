//! Generator configuration
//!
//! Named options the emitters read: namespaces, file extensions and locations, include prefixes, the enum hash
//! workaround, and the identifier styles for each type system. Naming helpers derived from these options live in
//! [`super::naming`].

use std::path::PathBuf;

use bridgegen_core::IdentStyles;
use bridgegen_core::lang::conventions::DEFAULT_EXT_SUFFIX;

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Native C++ namespace wrapping every generated declaration (`a::b` nesting allowed, empty for none)
    pub namespace: String,
    /// Component (WinRT) namespace of the projected types, dot-separated (`Contoso.Geometry`)
    pub component_namespace: String,
    /// Namespace of the runtime support library providing per-type translators
    pub support_namespace: String,
    /// Include path of the runtime support library header
    pub support_include: String,
    /// Prefix prepended to quoted includes of generated headers
    pub include_prefix: String,
    /// Extension of generated header files (without the dot)
    pub header_ext: String,
    /// Extension of generated translation units (without the dot)
    pub source_ext: String,
    /// Directory (relative to the output root) receiving headers
    pub header_out: PathBuf,
    /// Directory (relative to the output root) receiving translation units
    pub source_out: PathBuf,
    /// Emit a `std::hash` specialization after every enum
    pub hash_enum_workaround: bool,
    /// Word appended to the generated type of a user-extensible record
    pub ext_suffix: String,
    /// Identifier styles for the native side
    pub native_styles: IdentStyles,
    /// Identifier styles for the component side
    pub component_styles: IdentStyles,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: "bridge".to_string(),
            component_namespace: "Bridge".to_string(),
            support_namespace: "bridge_support".to_string(),
            support_include: "bridge_support/Marshal.hpp".to_string(),
            include_prefix: String::new(),
            header_ext: "hpp".to_string(),
            source_ext: "cpp".to_string(),
            header_out: PathBuf::from("include"),
            source_out: PathBuf::from("src"),
            hash_enum_workaround: true,
            ext_suffix: DEFAULT_EXT_SUFFIX.to_string(),
            native_styles: IdentStyles::native(),
            component_styles: IdentStyles::component(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the native namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the component namespace
    pub fn with_component_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.component_namespace = namespace.into();
        self
    }

    /// Set the support library namespace and header
    pub fn with_support(mut self, namespace: impl Into<String>, include: impl Into<String>) -> Self {
        self.support_namespace = namespace.into();
        self.support_include = include.into();
        self
    }

    /// Set the prefix for quoted includes of generated headers
    pub fn with_include_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.include_prefix = prefix.into();
        self
    }

    /// Set header and source file extensions
    pub fn with_extensions(mut self, header_ext: impl Into<String>, source_ext: impl Into<String>) -> Self {
        self.header_ext = header_ext.into();
        self.source_ext = source_ext.into();
        self
    }

    /// Set the header and source output directories
    pub fn with_output_dirs(mut self, header_out: impl Into<PathBuf>, source_out: impl Into<PathBuf>) -> Self {
        self.header_out = header_out.into();
        self.source_out = source_out.into();
        self
    }

    /// Enable or disable the enum hash workaround
    pub fn with_hash_enum_workaround(mut self, enabled: bool) -> Self {
        self.hash_enum_workaround = enabled;
        self
    }

    /// Set the suffix used for user-extensible records
    pub fn with_ext_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.ext_suffix = suffix.into();
        self
    }

    /// Set the native identifier styles
    pub fn with_native_styles(mut self, styles: IdentStyles) -> Self {
        self.native_styles = styles;
        self
    }

    /// Set the component identifier styles
    pub fn with_component_styles(mut self, styles: IdentStyles) -> Self {
        self.component_styles = styles;
        self
    }
}
