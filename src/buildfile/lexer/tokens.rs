//! Token definitions for BUILD files
//!
//! This module defines all the tokens that can be produced by the BUILD lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//!
//! Keyword patterns (`load`, `glob`, `True`, `False`) are literal tokens, which
//! logos ranks above the identifier regex when both match the same text. A
//! longer identifier that merely starts with a keyword (`loader`) still lexes as
//! one identifier because the longest match wins first.
//!
//! `package`, `package_group`, `exports_files` and `select` are not tokens of
//! their own: they lex as identifiers and the parser recognises them by value.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All possible tokens in a BUILD file
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Keywords
    #[token("load")]
    Load,
    #[token("glob")]
    Glob,

    // Literals (raw image, quotes included for strings)
    #[regex(r#""([^"\\\n\r]|\\["\\/bfnrtv]|\\u[0-9a-fA-F]{4})*""#, |lex| lex.slice().to_owned())]
    Str(String),
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_owned())]
    Number(String),
    #[token("True")]
    True,
    #[token("False")]
    False,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    // Punctuation
    #[token(",")]
    Comma,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Equals,
    #[token(":")]
    Colon,
}

impl Token {
    /// Name of the token category, as used by the simple token output
    pub fn category(&self) -> &'static str {
        match self {
            Token::Load => "load",
            Token::Glob => "glob",
            Token::Str(_) => "string",
            Token::Number(_) => "number",
            Token::True | Token::False => "boolean",
            Token::Ident(_) => "identifier",
            Token::Comma => "comma",
            Token::LBracket => "lbracket",
            Token::RBracket => "rbracket",
            Token::LParen => "lparen",
            Token::RParen => "rparen",
            Token::LBrace => "lbrace",
            Token::RBrace => "rbrace",
            Token::Equals => "equals",
            Token::Colon => "colon",
        }
    }
}

/// Source-like rendering, used in diagnostics
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Load => write!(f, "load"),
            Token::Glob => write!(f, "glob"),
            Token::Str(raw) | Token::Number(raw) | Token::Ident(raw) => write!(f, "{}", raw),
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::Comma => write!(f, ","),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Equals => write!(f, "="),
            Token::Colon => write!(f, ":"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Result<Token, ()>> {
        Token::lexer(source).collect()
    }

    #[test]
    fn test_keywords_win_over_identifiers() {
        assert_eq!(lex_all("load"), vec![Ok(Token::Load)]);
        assert_eq!(lex_all("glob"), vec![Ok(Token::Glob)]);
        assert_eq!(lex_all("True False"), vec![Ok(Token::True), Ok(Token::False)]);
    }

    #[test]
    fn test_longer_identifiers_are_not_split() {
        assert_eq!(lex_all("loader"), vec![Ok(Token::Ident("loader".into()))]);
        assert_eq!(lex_all("globs"), vec![Ok(Token::Ident("globs".into()))]);
        assert_eq!(lex_all("Truely"), vec![Ok(Token::Ident("Truely".into()))]);
    }

    #[test]
    fn test_contextual_keywords_are_identifiers() {
        assert_eq!(
            lex_all("package select"),
            vec![
                Ok(Token::Ident("package".into())),
                Ok(Token::Ident("select".into()))
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(lex_all(r#""abc""#), vec![Ok(Token::Str(r#""abc""#.into()))]);
        assert_eq!(
            lex_all(r#""a\"b\\c\né""#),
            vec![Ok(Token::Str(r#""a\"b\\c\né""#.into()))]
        );
        assert_eq!(lex_all(r#""""#), vec![Ok(Token::Str(r#""""#.into()))]);
    }

    #[test]
    fn test_number_literals() {
        for raw in ["0", "-1", "123409876", "1.5", "-2.25e10", "3E-2"] {
            assert_eq!(lex_all(raw), vec![Ok(Token::Number(raw.into()))], "{raw}");
        }
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex_all(", [ ] ( ) { } = :"),
            vec![
                Ok(Token::Comma),
                Ok(Token::LBracket),
                Ok(Token::RBracket),
                Ok(Token::LParen),
                Ok(Token::RParen),
                Ok(Token::LBrace),
                Ok(Token::RBrace),
                Ok(Token::Equals),
                Ok(Token::Colon),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(lex_all(" \t\r\n\n  "), vec![]);
    }

    #[test]
    fn test_unrecognized_input_is_an_error() {
        assert!(lex_all("'x'").iter().any(|t| t.is_err()));
        assert!(lex_all("#").iter().all(|t| t.is_err()));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::LBrace.to_string(), "{");
        assert_eq!(Token::Str("\"x\"".into()).to_string(), "\"x\"");
        assert_eq!(Token::Ident("deps".into()).to_string(), "deps");
    }

    #[test]
    fn test_token_categories() {
        assert_eq!(Token::Number("1".into()).category(), "number");
        assert_eq!(Token::False.category(), "boolean");
        assert_eq!(Token::LBrace.category(), "lbrace");
    }
}
