//! Line-oriented templates compiled into plain Rust functions at build time.
//!
//! ```ignore
//! mod views {
//!     rustemplate::str!(r#"
//! %% template greeting(name: &str)
//! <p>Hello, <%= name %></p>
//! %% endtemplate
//! "#, html_quote = true);
//! }
//!
//! assert_eq!(views::greeting("<World>"), "<p>Hello,  &lt;World&gt; </p>");
//! ```

pub use rustemplate_macros::rustemplate_directory as directory;
pub use rustemplate_macros::rustemplate_file as file;
pub use rustemplate_macros::rustemplate_str as str;

// generated code refers to `::rustemplate::html_quote`
extern crate self as rustemplate;

/// Escapes the HTML special characters `<` and `>`
pub fn html_quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}
