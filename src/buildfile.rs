//! Main module for the buildfile library
//!
//! The entry points here glue the stages together: [`parse`] lexes and parses,
//! [`format`] parses and renders the canonical form. Each call is independent
//! and keeps no state between invocations.

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod processor;
pub mod testing;

pub use ast::BuildFile;
pub use error::{Diagnostic, Error, ErrorKind, ErrorList};
pub use parser::ParseOptions;
pub use printer::{PrintOptions, PrintScope};

/// Parse BUILD source with the default options (error recovery enabled).
///
/// Lexical errors stop the call before parsing starts. A non-empty error list
/// is always returned as `Err`, even when recovery produced a partial tree.
pub fn parse(source: &str) -> Result<BuildFile, ErrorList> {
    parse_with(source, &ParseOptions::default())
}

/// Parse BUILD source with explicit parser options
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<BuildFile, ErrorList> {
    let tokens = lexer::lex(source)?;
    parser::parse_tokens(tokens, source, options)
}

/// Parse with recovery and hand back whatever tree could be built.
///
/// The tree is only meant for diagnostics when the error list is non-empty.
pub fn parse_recovering(source: &str) -> (Option<BuildFile>, ErrorList) {
    match lexer::lex(source) {
        Ok(tokens) => parser::parse_tokens_recovering(tokens, source),
        Err(errors) => (None, errors),
    }
}

/// Parse and render the canonical form with default options
pub fn format(source: &str) -> Result<String, Error> {
    format_with(source, &ParseOptions::default(), &PrintOptions::default())
}

/// Parse and render the canonical form
pub fn format_with(
    source: &str,
    parse_options: &ParseOptions,
    print_options: &PrintOptions,
) -> Result<String, Error> {
    let file = parse_with(source, parse_options).map_err(Error::Parse)?;
    Ok(printer::print(&file, print_options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_source() {
        let file = parse("").unwrap();
        assert!(file.loads.is_empty());
        assert!(file.rules.is_empty());
        assert!(file.declarations.is_empty());
        assert!(file.package.is_none());
    }

    #[test]
    fn test_lexical_errors_skip_parsing() {
        let errors = parse("cc_library(name = 'x')").unwrap_err();
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Lexical));
        // one per quote; the `x` between them is an identifier
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_format_sorts_loads() {
        let out = format("load(\"b\", \"y\")\nload(\"a\", \"x\")").unwrap();
        assert_eq!(out, "load(\"a\", \"x\")\nload(\"b\", \"y\")\n");
    }

    #[test]
    fn test_format_surfaces_parse_errors() {
        let err = format("cc_library(name = \"x\"").unwrap_err();
        match err {
            Error::Parse(errors) => assert!(!errors.is_empty()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_recovering_returns_partial_tree() {
        let (file, errors) =
            parse_recovering("a(name = )\nb(name = \"ok\")\n");
        assert!(!errors.is_empty());
        let file = file.expect("recovery keeps the well-formed rule");
        assert!(file.rules.iter().any(|r| r.kind == "b"));
    }
}
