//! Template compilation
//!
//! Turns a parsed [`Template`] into the source of a Rust function. The
//! function collects its output fragments in a `Vec<String>` and joins them
//! with a single space on return:
//!
//! ```text
//! pub fn greeting(name: &str) -> String {
//! let mut _rustemplate_out: Vec<String> = Vec::new();
//! _rustemplate_out.push(String::from("<p>Hello, "));
//! _rustemplate_out.push((name).to_string());
//! _rustemplate_out.push(String::from("</p>"));
//! _rustemplate_out.join(" ")
//! }
//! ```
//!
//! Compilation cannot fail: code and expressions are pasted in as written and
//! any mistake in them shows up when the generated function is compiled.

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::parser::template::{Template, TemplateElement, simplify};

/// Name of the output buffer inside generated functions
pub static OUTPUT_VAR_NAME: &str = "_rustemplate_out";
/// Runtime function applied to filtered expressions
pub static HTML_QUOTE_FN: &str = "::rustemplate::html_quote";

/// Compiler options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeGenerationOptions {
    /// Pass `<%= %>` output through [`HTML_QUOTE_FN`]; `<%=! %>` is never quoted
    pub html_quote_expressions: bool,
}

pub struct Compiler {
    /// Characters that need escaping inside a string literal
    quote: Regex,
    options: CodeGenerationOptions,
}

impl Compiler {
    pub fn new(options: CodeGenerationOptions) -> Self {
        Self {
            quote: Regex::new(r#"["\r\n\t\x00]"#).expect("literal escape pattern"),
            options,
        }
    }

    /// Escapes text for use inside a `"..."` literal. Backslashes are left
    /// alone, so `\u{..}` and friends in templates reach the Rust lexer.
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.quote.replace_all(text, |captures: &Captures| {
            match &captures[0] {
                "\"" => "\\\"",
                "\r" => "\\r",
                "\n" => "\\n",
                "\t" => "\\t",
                _ => "\\0",
            }
            .to_string()
        })
    }

    /// Compiles one element into a single statement
    pub fn compile_element(&self, element: &TemplateElement) -> String {
        let mut code = String::new();
        match element {
            TemplateElement::Literal(text) => {
                code.push_str(OUTPUT_VAR_NAME);
                code.push_str(".push(String::from(\"");
                code.push_str(&self.escape(text));
                code.push_str("\"));");
            }
            TemplateElement::Code(raw) => code.push_str(raw),
            TemplateElement::Expression { code: expression, unfiltered } => {
                code.push_str(OUTPUT_VAR_NAME);
                if self.options.html_quote_expressions && !unfiltered {
                    code.push_str(".push(");
                    code.push_str(HTML_QUOTE_FN);
                    code.push_str("(&(");
                    code.push_str(expression);
                    code.push_str(").to_string()));");
                } else {
                    code.push_str(".push((");
                    code.push_str(expression);
                    code.push_str(").to_string());");
                }
            }
        }
        code
    }

    /// Compiles a template into a complete function definition
    pub fn compile(&self, template: &Template) -> String {
        let mut code = String::new();
        code.push_str("pub fn ");
        code.push_str(&template.signature);
        code.push_str(" -> String {\nlet mut ");
        code.push_str(OUTPUT_VAR_NAME);
        code.push_str(": Vec<String> = Vec::new();\n");
        for element in simplify(template.elements.iter().cloned()) {
            code.push_str(&self.compile_element(&element));
            code.push('\n');
        }
        code.push_str(OUTPUT_VAR_NAME);
        code.push_str(".join(\" \")\n}\n");
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compiler(html_quote_expressions: bool) -> Compiler {
        Compiler::new(CodeGenerationOptions { html_quote_expressions })
    }

    #[test]
    fn literal() {
        let compiler = compiler(false);
        assert_eq!(
            compiler.compile_element(&TemplateElement::literal("abcd")),
            "_rustemplate_out.push(String::from(\"abcd\"));"
        );
        assert_eq!(
            compiler.compile_element(&TemplateElement::literal("<a href=\"/\">Back</a>")),
            "_rustemplate_out.push(String::from(\"<a href=\\\"/\\\">Back</a>\"));"
        );
    }

    #[test]
    fn literal_quoting() {
        let compiler = compiler(false);
        assert_eq!(compiler.escape("a\"b\rc\nd\te\0f"), "a\\\"b\\rc\\nd\\te\\0f");
        assert_eq!(compiler.escape("{{ caf\u{e9} \\n }}"), "{{ caf\u{e9} \\n }}");
        assert!(matches!(compiler.escape("untouched"), Cow::Borrowed(_)));
    }

    #[test]
    fn code_is_verbatim() {
        assert_eq!(
            compiler(true).compile_element(&TemplateElement::code("if i<0 {")),
            "if i<0 {"
        );
    }

    #[test]
    fn expressions() {
        let plain = compiler(false);
        assert_eq!(
            plain.compile_element(&TemplateElement::expression("2+3", false)),
            "_rustemplate_out.push((2+3).to_string());"
        );
        assert_eq!(
            plain.compile_element(&TemplateElement::expression("\"abc\".len()", true)),
            "_rustemplate_out.push((\"abc\".len()).to_string());"
        );

        let quoting = compiler(true);
        assert_eq!(
            quoting.compile_element(&TemplateElement::expression("a.count", false)),
            "_rustemplate_out.push(::rustemplate::html_quote(&(a.count).to_string()));"
        );
        assert_eq!(
            quoting.compile_element(&TemplateElement::expression("a.count", true)),
            "_rustemplate_out.push((a.count).to_string());"
        );
    }

    #[test]
    fn template() {
        let template = Template::new(
            "f1(a: &[i32])",
            vec![
                TemplateElement::literal("<h1>this is a test</h1>"),
                TemplateElement::code("if a.is_empty() {"),
                TemplateElement::literal("<p>Zilch</p>"),
                TemplateElement::code("} else {"),
                TemplateElement::expression("a.len()", false),
                TemplateElement::code("}"),
            ],
        );
        assert_eq!(
            compiler(false).compile(&template),
            "pub fn f1(a: &[i32]) -> String {\n\
             let mut _rustemplate_out: Vec<String> = Vec::new();\n\
             _rustemplate_out.push(String::from(\"<h1>this is a test</h1>\"));\n\
             if a.is_empty() {\n\
             _rustemplate_out.push(String::from(\"<p>Zilch</p>\"));\n\
             } else {\n\
             _rustemplate_out.push((a.len()).to_string());\n\
             }\n\
             _rustemplate_out.join(\" \")\n\
             }\n"
        );
    }

    #[test]
    fn adjacent_literals_become_one_statement() {
        let template = Template::new(
            "page()",
            vec![
                TemplateElement::literal("<h1>Heading</h1>"),
                TemplateElement::literal("<p>Hello</p>"),
            ],
        );
        assert_eq!(
            compiler(false).compile(&template),
            "pub fn page() -> String {\n\
             let mut _rustemplate_out: Vec<String> = Vec::new();\n\
             _rustemplate_out.push(String::from(\"<h1>Heading</h1>\\n<p>Hello</p>\"));\n\
             _rustemplate_out.join(\" \")\n\
             }\n"
        );
    }

    #[test]
    fn empty_template() {
        assert_eq!(
            compiler(true).compile(&Template::new("nothing()", vec![])),
            "pub fn nothing() -> String {\nlet mut _rustemplate_out: Vec<String> = Vec::new();\n_rustemplate_out.join(\" \")\n}\n"
        );
    }
}
