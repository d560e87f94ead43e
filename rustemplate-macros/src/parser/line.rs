//! Line classification
//!
//! Each raw line of a template file is either text or a directive. Directives
//! start with the escape prefix `%%` (optionally indented) followed by a
//! keyword:
//!
//! - `%% template name(args)` / `%% endtemplate`
//! - `%% for item in items` / `%% endfor`
//! - `%% if cond` / `%% elif cond` (or `%% else if cond`) / `%% else` / `%% endif`
//!
//! Arguments are kept as written; they are Rust and only the compiler of the
//! generated code gets to judge them.

use crate::parser::{
    COMMENT, ESCAPE,
    error::{LineContext, ParseError, Result},
};

/// A line from the file as seen by the scanner, not to be confused with the
/// elements of a parsed template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLine<'a> {
    Text(&'a str),
    TemplateStart(&'a str),
    TemplateEnd,
    ForStart { variable: &'a str, iterable: &'a str },
    ForEnd,
    IfStart(&'a str),
    IfElif(&'a str),
    IfElse,
    IfEnd,
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub(crate) fn strip(src: &str) -> &str {
    src.trim_matches(is_space)
}

/// Text following a `%%` prefix that has only whitespace before it, stripped.
/// `None` when the line is not escaped or nothing follows the prefix.
fn text_after_escape(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(is_space).strip_prefix(ESCAPE)?;
    Some(strip(rest)).filter(|rest| !rest.is_empty())
}

/// Splits off the first whitespace-delimited word
fn first_word_and_rest(src: &str) -> Option<(&str, &str)> {
    let src = src.trim_start_matches(is_space);
    if src.is_empty() {
        return None;
    }
    let end = src.find(is_space).unwrap_or(src.len());
    Some((&src[..end], src[end..].trim_start_matches(is_space)))
}

/// True for `// ...` lines, with or without a leading `%%`
pub fn is_comment(line: &str) -> bool {
    let stripped = strip(line);
    let stripped = match stripped.strip_prefix(ESCAPE) {
        Some(rest) => rest.trim_start_matches(is_space),
        None => stripped,
    };
    stripped.starts_with(COMMENT)
}

fn parse_for<'a>(rest: &'a str, ctx: LineContext<'_>) -> Result<TemplateLine<'a>> {
    if let Some((variable, tail)) = first_word_and_rest(rest)
        && let Some(("in", iterable)) = first_word_and_rest(tail)
        && !iterable.is_empty()
    {
        return Ok(TemplateLine::ForStart { variable, iterable });
    }
    Err(ParseError::InvalidDirective {
        location: ctx.location(),
        text: rest.to_string(),
    })
}

impl<'a> TemplateLine<'a> {
    /// Classifies one raw line
    pub fn classify(line: &'a str, ctx: LineContext<'_>) -> Result<Self> {
        let Some(directive) = text_after_escape(line) else {
            return Ok(Self::Text(line));
        };
        let Some((word, rest)) = first_word_and_rest(directive) else {
            return Ok(Self::Text(line));
        };
        Ok(match word {
            "if" => Self::IfStart(rest),
            "elif" => Self::IfElif(rest),
            "else" => match first_word_and_rest(rest) {
                Some(("if", expression)) => Self::IfElif(expression),
                _ => Self::IfElse,
            },
            "endif" => Self::IfEnd,
            "for" => parse_for(rest, ctx)?,
            "endfor" => Self::ForEnd,
            "template" => Self::TemplateStart(rest),
            "endtemplate" => Self::TemplateEnd,
            _ => {
                return Err(ParseError::InvalidDirective {
                    location: ctx.location(),
                    text: directive.to_string(),
                });
            }
        })
    }
}
