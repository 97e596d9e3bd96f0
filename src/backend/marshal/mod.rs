//! Type marshals
//!
//! A marshal knows one type system: how a resolved type is spelled there, what must be included to name it, and (on
//! the component side) how values cross the boundary. Emitters never spell a type themselves; they ask a marshal.
//!
//! The defaults are [`CppMarshal`] for native C++17 and [`WinRtMarshal`] for the C++/WinRT projection. Callers can
//! plug in their own implementations through [`Generator::with_marshals`](super::Generator::with_marshals).

mod cpp;
mod winrt;

pub use cpp::CppMarshal;
pub use winrt::WinRtMarshal;

use bridgegen_ast::{Field, TypeRef};

use super::refs::RefSource;

/// Native-side type marshal.
pub trait NativeMarshal: RefSource + Send + Sync {
    /// Fully spelled native type (`std::vector<::ns::Point>`).
    fn typename(&self, ty: &TypeRef) -> String;

    /// Spelling of `ty` as a function parameter (by value or by const reference).
    fn param_type(&self, ty: &TypeRef) -> String;

    /// Spelling of a return type; `None` means no return value.
    fn return_type(&self, ty: Option<&TypeRef>) -> String;
}

/// Component-side type marshal.
pub trait ComponentMarshal: RefSource + Send + Sync {
    /// Fully spelled projected type (`winrt::Ns::Point`).
    fn typename(&self, ty: &TypeRef) -> String;

    /// Expression reading `field` from a projected instance.
    fn accessor(&self, field: &Field, instance: &str) -> String;

    /// Expression converting a projected value to its native counterpart.
    fn to_native(&self, ty: &TypeRef, expr: &str) -> String;

    /// Expression converting a native value to its projected counterpart.
    fn to_component(&self, ty: &TypeRef, expr: &str) -> String;

    /// Add one field to a construction chain.
    ///
    /// ## Parameters
    /// - `builder`: the chain so far (`Builder::Empty` for the first field).
    /// - `field`: the field being set.
    /// - `value`: an already converted component-side expression.
    fn with_field(&self, builder: Builder, field: &Field, value: String) -> Builder;

    /// Close a construction chain into expression lines.
    ///
    /// The first line is the head of the expression; each following line is a continuation the emitter indents one
    /// level deeper.
    fn finish(&self, builder: Builder) -> Vec<String>;
}

/// A projected object construction in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builder {
    /// No field set yet.
    Empty { ty: String },
    /// Seeded by the first field, extended by one step per further field.
    Chain { head: String, steps: Vec<String> },
}

impl Builder {
    pub fn new(ty: impl Into<String>) -> Self {
        Builder::Empty { ty: ty.into() }
    }
}
