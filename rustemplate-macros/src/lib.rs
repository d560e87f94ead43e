mod parser;

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, LitBool, LitStr, Token, parse::Parse, parse::ParseStream, parse_macro_input};
use tracing::debug;
use walkdir::WalkDir;

use crate::parser::{CodeGenerationOptions, Compiler, parse_templates};

/// Files picked up by `directory!`
static TEMPLATE_EXTENSION: &str = "tmpl";
/// Name used in diagnostics for `str!` templates
static STR_FILENAME: &str = "<string>";

/// A path or template source, optionally followed by `, html_quote = <bool>`
struct MacroInput {
    source: LitStr,
    options: CodeGenerationOptions,
}

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let source: LitStr = input.parse()?;
        let mut options = CodeGenerationOptions::default();
        while input.parse::<Option<Token![,]>>()?.is_some() {
            if input.is_empty() {
                break;
            }
            let name: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: LitBool = input.parse()?;
            match name.to_string().as_str() {
                "html_quote" => options.html_quote_expressions = value.value,
                other => {
                    return Err(syn::Error::new(
                        name.span(),
                        format!("unknown option `{}`, expected `html_quote`", other),
                    ));
                }
            }
        }
        if !input.is_empty() {
            return Err(input.error("expected `,`"));
        }
        Ok(MacroInput { source, options })
    }
}

fn generate_code_for_content(
    filename: &str,
    content: &str,
    options: CodeGenerationOptions,
    span: Span,
) -> syn::Result<proc_macro2::TokenStream> {
    let templates = parse_templates(filename, content).map_err(|err| syn::Error::new(span, err.to_string()))?;
    let compiler = Compiler::new(options);
    let rust_code: String = templates.iter().map(|template| compiler.compile(template)).collect();
    rust_code.parse().map_err(|err| {
        syn::Error::new(
            span,
            format!("{}: generated code is not valid Rust: {}", filename, err),
        )
    })
}

fn generate_code_for_file(
    root: &Path,
    path: &Path,
    options: CodeGenerationOptions,
    span: Span,
) -> syn::Result<proc_macro2::TokenStream> {
    debug!(path = %path.display(), "expanding template file");
    let filename = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    let content = fs::read_to_string(path)
        .map_err(|err| syn::Error::new(span, format!("Failed to read {:?}: {}", path, err)))?;
    let functions = generate_code_for_content(&filename, &content, options, span)?;
    let path_str = path.to_string_lossy().to_string();

    Ok(quote! {
        // ensure the compiler is aware the output is linked to the source so that any changes
        // to the template file will trigger a recompilation
        const _: &[u8] = include_bytes!(#path_str);

        #functions
    })
}

fn manifest_dir(lit: &LitStr) -> syn::Result<PathBuf> {
    std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .map_err(|_| syn::Error::new(lit.span(), "CARGO_MANIFEST_DIR not set"))
}

fn expand_directory(input: &MacroInput) -> syn::Result<proc_macro2::TokenStream> {
    let span = input.source.span();
    let manifest_dir = manifest_dir(&input.source)?;
    let root_path = manifest_dir.join(input.source.value());

    if !root_path.is_dir() {
        return Err(syn::Error::new(
            span,
            format!("Directory not found: {:?}", root_path),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root_path).sort_by_file_name() {
        let entry = entry.map_err(|err| syn::Error::new(span, err.to_string()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) {
            files.push(generate_code_for_file(&manifest_dir, path, input.options, span)?);
        }
    }

    Ok(quote! {
        #(#files)*
    })
}

fn expand_file(input: &MacroInput) -> syn::Result<proc_macro2::TokenStream> {
    let manifest_dir = manifest_dir(&input.source)?;
    let path = manifest_dir.join(input.source.value());

    if !path.is_file() {
        return Err(syn::Error::new(
            input.source.span(),
            format!("File not found: {:?}", path),
        ));
    }

    generate_code_for_file(&manifest_dir, &path, input.options, input.source.span())
}

/// Expands every `*.tmpl` file below a directory, relative to the crate root.
///
/// ```ignore
/// mod views {
///     rustemplate::directory!("templates/", html_quote = true);
/// }
/// ```
#[proc_macro]
pub fn rustemplate_directory(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as MacroInput);
    expand_directory(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Expands the templates in a single file, relative to the crate root.
#[proc_macro]
pub fn rustemplate_file(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as MacroInput);
    expand_file(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Expands templates written inline as a string literal.
#[proc_macro]
pub fn rustemplate_str(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as MacroInput);
    generate_code_for_content(
        STR_FILENAME,
        &input.source.value(),
        input.options,
        input.source.span(),
    )
    .unwrap_or_else(|err| err.to_compile_error())
    .into()
}
