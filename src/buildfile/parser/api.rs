//! Public API for the parser.

use chumsky::{prelude::*, Stream};
use std::ops::Range;

use crate::buildfile::ast::BuildFile;
use crate::buildfile::error::{Diagnostic, ErrorList};
use crate::buildfile::lexer::Token;
use crate::buildfile::parser::combinators::Locator;
use crate::buildfile::parser::document::{assemble, document};
use crate::buildfile::parser::ParseOptions;

/// Type alias for token with span
type TokenSpan = (Token, Range<usize>);

/// Parse a token stream into a [`BuildFile`].
///
/// Any diagnostic fails the call, including ones recovery got past.
pub fn parse_tokens(
    tokens: Vec<TokenSpan>,
    source: &str,
    options: &ParseOptions,
) -> Result<BuildFile, ErrorList> {
    match run(tokens, source, options.recovery) {
        (Some(file), errors) if errors.is_empty() => Ok(file),
        (_, errors) => Err(errors),
    }
}

/// Parse with recovery, returning the partial tree next to the diagnostics
pub fn parse_tokens_recovering(
    tokens: Vec<TokenSpan>,
    source: &str,
) -> (Option<BuildFile>, ErrorList) {
    run(tokens, source, true)
}

fn run(tokens: Vec<TokenSpan>, source: &str, recovery: bool) -> (Option<BuildFile>, ErrorList) {
    let locator = Locator::new(source);
    let eoi = source.len()..source.len();
    let stream = Stream::from_iter(eoi, tokens.into_iter());
    let parser = document(locator.clone(), recovery);

    let (statements, parse_errors) = if recovery {
        parser.parse_recovery(stream)
    } else {
        match parser.parse(stream) {
            Ok(statements) => (Some(statements), Vec::new()),
            Err(errors) => (None, errors),
        }
    };

    let mut errors: ErrorList = parse_errors
        .iter()
        .map(|error| Diagnostic::from_parse_error(error, locator.source_location()))
        .collect();

    let file = statements.map(|statements| {
        log::debug!("parsed {} top-level statements", statements.len());
        let (file, placement_errors) = assemble(statements, &locator);
        errors.extend(placement_errors);
        file
    });

    errors.sort();
    if !errors.is_empty() {
        log::debug!("parsing reported {} error(s)", errors.len());
    }
    (file, errors)
}
