//! Error handling for the template parser
//!
//! Every error carries the file and line it was found on, together with the
//! offending text, so the macro driver can report it without any further
//! context.

use std::fmt::Display;

use thiserror::Error;

/// Where in the template source something happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: String,
    /// 1-based
    pub line: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}

/// Diagnostics context handed to each classification/scan call
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub filename: &'a str,
    pub line: usize,
}

impl<'a> LineContext<'a> {
    pub fn new(filename: &'a str, line: usize) -> Self {
        Self { filename, line }
    }

    pub fn location(&self) -> Location {
        Location {
            filename: self.filename.to_string(),
            line: self.line,
        }
    }
}

/// Error type for template parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{location}: invalid directive: {text}")]
    InvalidDirective { location: Location, text: String },

    #[error("{location}: expected a template directive at top level: {text}")]
    UnexpectedAtTopLevel { location: Location, text: String },

    #[error("{location}: templates cannot be nested: {text}")]
    UnexpectedInTemplate { location: Location, text: String },

    #[error("{location}: unclosed expression: {text}")]
    UnclosedExpression { location: Location, text: String },

    #[error("{location}: unclosed code block: {text}")]
    UnclosedCodeBlock { location: Location, text: String },
}

/// Result type for template parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
