//! Inline expressions within text lines
//!
//! `<%= expr %>` emits the string form of `expr`, passed through the HTML
//! quoting transform when that is enabled; `<%=! expr %>` always emits it
//! unfiltered. Everything else on the line is literal text.

use crate::parser::{
    CLOSE, EXPRESSION_OPEN, UNFILTERED,
    error::{LineContext, ParseError, Result},
    template::TemplateElement,
};

fn scan_from(
    line: &str,
    rest: &str,
    ctx: LineContext<'_>,
    elements: &mut Vec<TemplateElement>,
) -> Result<()> {
    let Some(start) = rest.find(EXPRESSION_OPEN) else {
        elements.push(TemplateElement::literal(rest));
        return Ok(());
    };
    if start > 0 {
        elements.push(TemplateElement::literal(&rest[..start]));
    }
    let mut body = &rest[start + EXPRESSION_OPEN.len()..];
    let unfiltered = match body.strip_prefix(UNFILTERED) {
        Some(stripped) => {
            body = stripped;
            true
        }
        None => false,
    };
    let end = body.find(CLOSE).ok_or_else(|| ParseError::UnclosedExpression {
        location: ctx.location(),
        text: line.to_string(),
    })?;
    let code = body[..end].trim();
    if !code.is_empty() {
        elements.push(TemplateElement::expression(code, unfiltered));
    }
    scan_from(line, &body[end + CLOSE.len()..], ctx, elements)
}

/// Splits a text line into literal and expression elements, in order
pub fn scan_literal_line(line: &str, ctx: LineContext<'_>) -> Result<Vec<TemplateElement>> {
    let mut elements = Vec::new();
    scan_from(line, line, ctx, &mut elements)?;
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(line: &str) -> Result<Vec<TemplateElement>> {
        scan_literal_line(line, LineContext::new("test.tmpl", 3))
    }

    #[test]
    fn plain_text_is_one_literal() {
        for line in ["", "   ", "<p>Hello world</p>", "100% <% not an expression", "%> stray"] {
            assert_eq!(scan(line), Ok(vec![TemplateElement::literal(line)]));
        }
    }

    #[test]
    fn expression_between_literals() {
        assert_eq!(
            scan("foo <%= 2+3 %> bar"),
            Ok(vec![
                TemplateElement::literal("foo "),
                TemplateElement::expression("2+3", false),
                TemplateElement::literal(" bar"),
            ])
        );
    }

    #[test]
    fn unfiltered_expression() {
        assert_eq!(
            scan("<div><%=! self.body_html %></div>"),
            Ok(vec![
                TemplateElement::literal("<div>"),
                TemplateElement::expression("self.body_html", true),
                TemplateElement::literal("</div>"),
            ])
        );
    }

    #[test]
    fn bang_after_space_is_part_of_the_expression() {
        assert_eq!(
            scan("<%= !flag %>"),
            Ok(vec![
                TemplateElement::expression("!flag", false),
                TemplateElement::literal(""),
            ])
        );
    }

    #[test]
    fn several_expressions() {
        assert_eq!(
            scan("<%= a %><%=!b%> and <%= c.len() %>"),
            Ok(vec![
                TemplateElement::expression("a", false),
                TemplateElement::expression("b", true),
                TemplateElement::literal(" and "),
                TemplateElement::expression("c.len()", false),
                TemplateElement::literal(""),
            ])
        );
    }

    #[test]
    fn first_close_marker_wins() {
        assert_eq!(
            scan("<%= \"%>\" %>"),
            Ok(vec![
                TemplateElement::expression("\"", false),
                TemplateElement::literal("\" %>"),
            ])
        );
    }

    #[test]
    fn empty_expression_is_dropped() {
        assert_eq!(
            scan("a<%=  %>b"),
            Ok(vec![TemplateElement::literal("a"), TemplateElement::literal("b")])
        );
        assert_eq!(scan("<%=!%>"), Ok(vec![TemplateElement::literal("")]));
    }

    #[test]
    fn unclosed_expression_reports_whole_line() {
        let err = scan("<p><%= a %> and <%= b</p>").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnclosedExpression {
                location: LineContext::new("test.tmpl", 3).location(),
                text: "<p><%= a %> and <%= b</p>".to_string(),
            }
        );
    }
}
