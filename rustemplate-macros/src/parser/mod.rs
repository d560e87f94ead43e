//! Template parser and compiler
//!
//! Templates are plain text files processed line by line:
//!
//! - `line.rs`: classifies a raw line as text or a `%%` directive
//! - `literal.rs`: splits text lines into literals and `<%= %>` expressions
//! - `scanner.rs`: drives the above over a whole file, producing templates
//! - `template.rs`: the parsed representation and literal merging
//! - `compiler.rs`: renders a template as Rust function source
//! - `error.rs`: error types and handling

pub mod compiler;
pub mod error;
pub mod line;
pub mod literal;
pub mod scanner;
pub mod template;

/// Marks a directive line
pub(crate) const ESCAPE: &str = "%%";
/// Starts a comment line, optionally after [`ESCAPE`]
pub(crate) const COMMENT: &str = "//";
/// Opens a code block when alone on its line
pub(crate) const OPEN: &str = "<%";
/// Closes code blocks and inline expressions
pub(crate) const CLOSE: &str = "%>";
pub(crate) const EXPRESSION_OPEN: &str = "<%=";
/// Follows [`EXPRESSION_OPEN`] to skip HTML quoting
pub(crate) const UNFILTERED: char = '!';

pub use compiler::{CodeGenerationOptions, Compiler};
pub use scanner::parse_templates;
