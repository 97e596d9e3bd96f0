//! C++ code writer - builds C++ source text
//!
//! This module provides utilities for building well-formatted C++ code.

use bridgegen_ast::Doc;

/// A buffer for building C++ source code with proper indentation
#[derive(Debug)]
pub struct CppWriter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for CppWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CppWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Write indentation only
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a block with braces
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{} {{", header));
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    /// Write a type body (`struct X {` ... `};`)
    pub fn type_block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{} {{", header));
        self.indent();
        f(self);
        self.dedent();
        self.line("};");
    }

    /// Write a namespace block. Namespace contents are not indented.
    ///
    /// An empty namespace writes the contents at global scope.
    pub fn namespace<F>(&mut self, ns: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        if ns.is_empty() {
            f(self);
            return;
        }
        self.line(&format!("namespace {} {{", ns));
        self.blank_line();
        f(self);
        self.blank_line();
        self.line(&format!("}}  // namespace {}", ns));
    }

    /// Write a list of `#include` lines. Targets carry their delimiters.
    pub fn includes<'a>(&mut self, targets: impl IntoIterator<Item = &'a String>) {
        for target in targets {
            self.line(&format!("#include {}", target));
        }
    }

    /// Write a doc comment, if the doc has content
    pub fn doc(&mut self, doc: &Doc) {
        if doc.is_empty() {
            return;
        }
        if doc.lines.len() == 1 {
            self.line(&format!("/** {} */", escape_comment(doc.lines[0].trim())));
            return;
        }
        self.line("/**");
        for l in &doc.lines {
            let l = l.trim_end();
            if l.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {}", escape_comment(l)));
            }
        }
        self.line(" */");
    }
}

/// Break up any `*/` so doc text cannot end the comment early.
fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}
