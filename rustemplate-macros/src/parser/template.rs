//! Parsed template representation
//!
//! A [`Template`] is what the scanner hands to the code generator: the
//! function signature as written after `%% template`, and the ordered
//! elements that make up its body.

/// A single element of a template; each one becomes one statement in the
/// generated function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    /// Text to emit literally
    Literal(String),
    /// Rust code, emitted verbatim
    Code(String),
    /// Rust expression whose string form is emitted
    Expression { code: String, unfiltered: bool },
}

impl TemplateElement {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }

    pub fn expression(code: impl Into<String>, unfiltered: bool) -> Self {
        Self::Expression {
            code: code.into(),
            unfiltered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// The name and arguments of the template function
    pub signature: String,
    pub elements: Vec<TemplateElement>,
}

impl Template {
    pub fn new(signature: impl Into<String>, elements: Vec<TemplateElement>) -> Self {
        Self {
            signature: signature.into(),
            elements,
        }
    }
}

/// Joins runs of adjacent literals with a line break so the generated
/// function pushes as few strings as possible.
pub fn simplify<I>(elements: I) -> Vec<TemplateElement>
where
    I: IntoIterator<Item = TemplateElement>,
{
    let mut literals: Vec<String> = Vec::new();
    let mut result = Vec::new();

    for element in elements {
        match element {
            TemplateElement::Literal(text) => literals.push(text),
            other => {
                if !literals.is_empty() {
                    result.push(TemplateElement::Literal(literals.join("\n")));
                    literals.clear();
                }
                result.push(other);
            }
        }
    }
    if !literals.is_empty() {
        result.push(TemplateElement::Literal(literals.join("\n")));
    }
    result
}
