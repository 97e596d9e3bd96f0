//! Shared generator conventions (well-known generated names).

/// First line of every generated file.
pub const GENERATED_BANNER: &str = "// AUTOGENERATED FILE - DO NOT MODIFY!";

/// Tool name printed in the provenance line of generated files.
pub const TOOL_NAME: &str = "bridgegen";

/// Bridge function converting a component instance into a native value.
pub const TO_NATIVE_FN: &str = "ToNative";

/// Bridge function converting a native value into a component instance.
pub const TO_COMPONENT_FN: &str = "ToComponent";

/// Type alias for the native side inside a bridge.
pub const NATIVE_TYPE_ALIAS: &str = "NativeType";

/// Type alias for the component side inside a bridge.
pub const COMPONENT_TYPE_ALIAS: &str = "ComponentType";

/// Parameter name of both bridge functions.
pub const BRIDGE_PARAM: &str = "value";

/// Word appended to a record name to name its bridge type and files.
pub const BRIDGE_SUFFIX: &str = "bridge";

/// Default word appended to a user-extensible record's generated type and files.
pub const DEFAULT_EXT_SUFFIX: &str = "base";

/// Prefix of the component factory that seeds a with-field chain (`CreateWithX`).
pub const SEED_PREFIX: &str = "CreateWith";

/// Prefix of each subsequent with-field step (`WithY`).
pub const WITH_PREFIX: &str = "With";

/// Component factory used when a record has no fields.
pub const EMPTY_FACTORY: &str = "Create";
