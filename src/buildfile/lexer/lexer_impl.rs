//! Implementation of the BUILD lexer
//!
//! This module provides convenience functions for tokenizing BUILD text.
//! The actual tokenization is handled entirely by logos; this layer only
//! collects spans and turns unrecognised input into diagnostics.

use std::ops::Range;

use crate::buildfile::ast::SourceLocation;
use crate::buildfile::error::{Diagnostic, ErrorList};
use crate::buildfile::lexer::tokens::Token;
use logos::Logos;

/// Convenience function to tokenize a string and collect all tokens.
/// Unrecognised input is dropped.
pub fn tokenize(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|result| result.ok())
        .collect()
}

/// Convenience function to tokenize a string and collect tokens with their spans.
/// Unrecognised input is dropped.
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

/// Tokenize a string, failing with one diagnostic per run of unrecognised input.
///
/// The whole input is always scanned so every lexical error is reported.
pub fn tokenize_checked(source: &str) -> Result<Vec<(Token, Range<usize>)>, ErrorList> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut bad_runs: Vec<Range<usize>> = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => {
                log::trace!("token {:?} at {:?}", token, span);
                tokens.push((token, span));
            }
            Err(()) => match bad_runs.last_mut() {
                Some(last) if last.end == span.start => last.end = span.end,
                _ => bad_runs.push(span),
            },
        }
    }

    if bad_runs.is_empty() {
        log::debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());
        return Ok(tokens);
    }

    let locator = SourceLocation::new(source);
    let errors: ErrorList = bad_runs
        .into_iter()
        .map(|range| {
            Diagnostic::lexical(
                format!("unrecognized input `{}`", &source[range.clone()]),
                Some(locator.byte_to_position(range.start)),
            )
        })
        .collect();
    log::debug!("lexing failed with {} error(s)", errors.len());
    Err(errors)
}
