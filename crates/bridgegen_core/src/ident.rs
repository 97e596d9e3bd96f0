//! Define identifier casing styles.
//!
//! IDL identifiers arrive in whatever casing the author used (`foo_bar`, `fooBar`, `FOO_BAR`). Every generated name
//! goes through an [`IdentStyle`], picked per identifier category from an [`IdentStyles`] set.
//!
//! ## Notes
//! - **Word model**: a name is split into words on `_`, `-`, whitespace, and camel-case boundaries. Acronym runs stay
//!   together (`HTTPServer` → `HTTP`, `Server`).
//! - **Determinism**: styles are pure functions of their input.

use std::fmt;

/// A single naming-style function.
#[derive(Clone, Copy)]
pub enum IdentStyle {
    /// `FooBar`
    UpperCamel,
    /// `fooBar`
    LowerCamel,
    /// `foo_bar`
    Snake,
    /// `FOO_BAR`
    ScreamingSnake,
    /// Name used exactly as written in the IDL.
    Verbatim,
    /// Caller-supplied transform.
    Custom(fn(&str) -> String),
}

impl IdentStyle {
    /// Apply this style to an identifier.
    ///
    /// ## Parameters
    /// - `name`: the identifier as written in the IDL.
    ///
    /// ## Returns
    /// - `String`: the styled identifier.
    pub fn apply(&self, name: &str) -> String {
        match self {
            IdentStyle::UpperCamel => split_words(name).iter().map(|w| capitalize(w)).collect(),
            IdentStyle::LowerCamel => {
                let words = split_words(name);
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            IdentStyle::Snake => split_words(name)
                .iter()
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            IdentStyle::ScreamingSnake => split_words(name)
                .iter()
                .map(|w| w.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
            IdentStyle::Verbatim => name.to_string(),
            IdentStyle::Custom(f) => f(name),
        }
    }
}

impl fmt::Debug for IdentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentStyle::UpperCamel => write!(f, "FooBar"),
            IdentStyle::LowerCamel => write!(f, "fooBar"),
            IdentStyle::Snake => write!(f, "foo_bar"),
            IdentStyle::ScreamingSnake => write!(f, "FOO_BAR"),
            IdentStyle::Verbatim => write!(f, "verbatim"),
            IdentStyle::Custom(_) => write!(f, "custom"),
        }
    }
}

/// One naming style per identifier category, for one type system.
#[derive(Debug, Clone, Copy)]
pub struct IdentStyles {
    pub ty: IdentStyle,
    pub type_param: IdentStyle,
    pub method: IdentStyle,
    pub field: IdentStyle,
    pub local: IdentStyle,
    pub enum_option: IdentStyle,
    pub constant: IdentStyle,
    pub file: IdentStyle,
}

impl IdentStyles {
    /// Default styles for the native (C++) side.
    pub fn native() -> Self {
        Self {
            ty: IdentStyle::UpperCamel,
            type_param: IdentStyle::UpperCamel,
            method: IdentStyle::Snake,
            field: IdentStyle::Snake,
            local: IdentStyle::Snake,
            enum_option: IdentStyle::ScreamingSnake,
            constant: IdentStyle::ScreamingSnake,
            file: IdentStyle::Snake,
        }
    }

    /// Default styles for the component (WinRT projection) side.
    pub fn component() -> Self {
        Self {
            ty: IdentStyle::UpperCamel,
            type_param: IdentStyle::UpperCamel,
            method: IdentStyle::UpperCamel,
            field: IdentStyle::UpperCamel,
            local: IdentStyle::LowerCamel,
            enum_option: IdentStyle::UpperCamel,
            constant: IdentStyle::UpperCamel,
            file: IdentStyle::UpperCamel,
        }
    }
}

/// Split an identifier into words.
///
/// ## Parameters
/// - `name`: identifier in any casing.
///
/// ## Returns
/// - `Vec<String>`: the words, in order, with their original casing.
///
/// ## Notes
/// - An uppercase letter starts a new word after a lowercase letter or digit, or when it is the last capital of an
///   acronym run followed by a lowercase letter.
pub fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
