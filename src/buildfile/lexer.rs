//! Lexer module for BUILD files
//!
//! This module contains the tokenization logic for BUILD files,
//! including token definitions and the lexer implementation.
//!
//! Lexing is a single linear pass: at each position logos commits to the
//! longest matching pattern and never backtracks across a committed token.
//! Whitespace, newlines included, carries no meaning and is skipped.

pub mod lexer_impl;
pub mod tokens;

use std::ops::Range;

pub use lexer_impl::{tokenize, tokenize_checked, tokenize_with_spans};
pub use tokens::Token;

use crate::buildfile::error::ErrorList;

/// Main lexer function: tokens with their byte spans, or every lexical error
/// found in the source.
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, ErrorList> {
    tokenize_checked(source)
}
