//! Template scanning
//!
//! A template file holds any number of `%% template ... %% endtemplate`
//! blocks separated by blank or comment lines. Inside a template, directives
//! turn into Rust control flow, text lines into literals and expressions, and
//! `<%` ... `%>` blocks into verbatim Rust code:
//!
//! ```text
//! %% template greeting(names: &[&str])
//! // one paragraph per name
//! %% for name in names
//! <p>Hello, <%= name %>!</p>
//! %% endfor
//! <%
//! let total = names.len();
//! %>
//! <p><%= total %> people greeted</p>
//! %% endtemplate
//! ```

use std::iter::{Enumerate, FusedIterator};
use std::str::Lines;

use tracing::{debug, trace};

use crate::parser::{
    CLOSE, OPEN,
    error::{LineContext, ParseError, Result},
    line::{TemplateLine, is_comment, strip},
    literal::scan_literal_line,
    template::{Template, TemplateElement, simplify},
};

/// Pulls templates out of one file's lines, one per call to `next`.
///
/// Yields `Err` at most once; the scanner is fused afterwards.
pub struct TemplateScanner<'a> {
    filename: &'a str,
    lines: Enumerate<Lines<'a>>,
    failed: bool,
}

impl<'a> TemplateScanner<'a> {
    pub fn new(filename: &'a str, src: &'a str) -> Self {
        Self {
            filename,
            lines: src.lines().enumerate(),
            failed: false,
        }
    }

    fn next_line(&mut self) -> Option<(LineContext<'a>, &'a str)> {
        self.lines
            .next()
            .map(|(index, line)| (LineContext::new(self.filename, index + 1), line))
    }

    /// Skips blank and comment lines up to the next `%% template`
    fn seek_template(&mut self) -> Result<Option<&'a str>> {
        while let Some((ctx, line)) = self.next_line() {
            if strip(line).is_empty() || is_comment(line) {
                continue;
            }
            return match TemplateLine::classify(line, ctx)? {
                TemplateLine::TemplateStart(signature) => {
                    trace!(file = self.filename, line = ctx.line, signature, "template start");
                    Ok(Some(signature))
                }
                _ => Err(ParseError::UnexpectedAtTopLevel {
                    location: ctx.location(),
                    text: line.to_string(),
                }),
            };
        }
        Ok(None)
    }

    /// Collects raw lines up to the closing `%>` into a single code element
    fn read_code_block(&mut self, opened: LineContext<'a>, open_line: &str) -> Result<TemplateElement> {
        let mut code: Vec<&str> = Vec::new();
        while let Some((_, line)) = self.next_line() {
            if line.trim() == CLOSE {
                return Ok(TemplateElement::Code(code.join("\n")));
            }
            code.push(line);
        }
        Err(ParseError::UnclosedCodeBlock {
            location: opened.location(),
            text: open_line.to_string(),
        })
    }

    fn read_body(&mut self) -> Result<Vec<TemplateElement>> {
        let mut elements = Vec::new();
        while let Some((ctx, line)) = self.next_line() {
            if line.trim() == OPEN {
                elements.push(self.read_code_block(ctx, line)?);
                continue;
            }
            if is_comment(line) {
                continue;
            }
            match TemplateLine::classify(line, ctx)? {
                TemplateLine::Text(text) => elements.extend(scan_literal_line(text, ctx)?),
                TemplateLine::TemplateStart(_) => {
                    return Err(ParseError::UnexpectedInTemplate {
                        location: ctx.location(),
                        text: line.to_string(),
                    });
                }
                TemplateLine::TemplateEnd => return Ok(elements),
                TemplateLine::ForStart { variable, iterable } => {
                    elements.push(TemplateElement::Code(format!("for {variable} in {iterable} {{")))
                }
                TemplateLine::IfStart(expression) => {
                    elements.push(TemplateElement::Code(format!("if {expression} {{")))
                }
                TemplateLine::IfElif(expression) => {
                    elements.push(TemplateElement::Code(format!("}} else if {expression} {{")))
                }
                TemplateLine::IfElse => elements.push(TemplateElement::code("} else {")),
                TemplateLine::ForEnd | TemplateLine::IfEnd => {
                    elements.push(TemplateElement::code("}"))
                }
            }
        }
        // end of input closes the last template
        Ok(elements)
    }

    /// Scans the next complete template, `None` once the input is exhausted
    pub fn next_template(&mut self) -> Result<Option<Template>> {
        let Some(signature) = self.seek_template()? else {
            return Ok(None);
        };
        let elements = simplify(self.read_body()?);
        Ok(Some(Template::new(signature, elements)))
    }
}

impl Iterator for TemplateScanner<'_> {
    type Item = Result<Template>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.next_template();
        self.failed = next.is_err();
        next.transpose()
    }
}

impl FusedIterator for TemplateScanner<'_> {}

/// Parses every template in a file; the first error discards the rest
pub fn parse_templates(filename: &str, src: &str) -> Result<Vec<Template>> {
    let templates = TemplateScanner::new(filename, src).collect::<Result<Vec<_>>>()?;
    debug!(file = filename, templates = templates.len(), "parsed template file");
    Ok(templates)
}
