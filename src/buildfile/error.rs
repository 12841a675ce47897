//! Diagnostics and the crate error type
//!
//! Lexing and parsing report problems as [`Diagnostic`]s collected in an
//! [`ErrorList`]; a failed call always carries at least one of them. The
//! outer [`Error`] wraps those together with I/O and configuration failures.

use std::fmt;
use std::ops::Deref;

use chumsky::error::{Simple, SimpleReason};
use thiserror::Error;

use crate::buildfile::ast::{Position, SourceLocation};
use crate::buildfile::lexer::Token;

/// Which stage rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// One problem found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<Position>,
}

impl Diagnostic {
    pub fn lexical(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            message: message.into(),
            position,
        }
    }

    pub fn syntax(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            position,
        }
    }

    /// Describe a chumsky error in terms of the BUILD grammar
    pub fn from_parse_error(error: &Simple<Token>, locator: &SourceLocation) -> Self {
        let position = Some(locator.byte_to_position(error.span().start));

        let message = match error.reason() {
            SimpleReason::Custom(message) => message.clone(),
            SimpleReason::Unclosed { delimiter, .. } => {
                format!("unclosed delimiter `{}`", delimiter)
            }
            SimpleReason::Unexpected => {
                let found = match error.found() {
                    Some(token) => format!("`{}`", token),
                    None => "end of input".to_string(),
                };
                let mut expected: Vec<String> = error.expected().map(describe_expected).collect();
                expected.sort();
                expected.dedup();

                let mut message = format!("unexpected {}", found);
                if !expected.is_empty() {
                    message.push_str(&format!(", expected {}", expected.join(" or ")));
                } else if let Some(label) = error.label() {
                    message.push_str(&format!(", expected {}", label));
                }
                message
            }
        };

        Self::syntax(message, position)
    }
}

/// Payload tokens with empty text stand for their whole category
fn describe_expected(token: &Option<Token>) -> String {
    match token {
        Some(Token::Str(raw)) if raw.is_empty() => "a string".to_string(),
        Some(Token::Number(raw)) if raw.is_empty() => "a number".to_string(),
        Some(Token::Ident(raw)) if raw.is_empty() => "an identifier".to_string(),
        Some(token) => format!("`{}`", token),
        None => "end of input".to_string(),
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at {}: {}", self.kind, position, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Every diagnostic produced by one lex or parse call, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList(Vec<Diagnostic>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: ErrorList) {
        self.0.extend(other.0);
    }

    /// Order by position; diagnostics without one go last
    pub fn sort(&mut self) {
        self.0
            .sort_by_key(|d| d.position.map(|p| p.offset).unwrap_or(usize::MAX));
    }
}

impl Deref for ErrorList {
    type Target = [Diagnostic];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Diagnostic> for ErrorList {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorList {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Diagnostic> for ErrorList {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

impl std::error::Error for ErrorList {}

/// Errors surfaced by the high-level API and the binary
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Parse(ErrorList),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid format '{0}'")]
    InvalidFormat(String),
    #[error("invalid stage '{0}'")]
    InvalidStage(String),
    #[error("format '{format}' is not available for the {stage} stage")]
    UnsupportedFormat { stage: String, format: String },
    #[error("unknown sample '{0}'")]
    UnknownSample(String),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ErrorList> for Error {
    fn from(errors: ErrorList) -> Self {
        Error::Parse(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::Error as _;

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::syntax("unexpected `)`", Some(Position::new(3, 7, 20)));
        assert_eq!(d.to_string(), "syntax error at 3:7: unexpected `)`");

        let d = Diagnostic::lexical("unrecognized input `'`", None);
        assert_eq!(d.to_string(), "lexical error: unrecognized input `'`");
    }

    #[test]
    fn test_error_list_display_one_per_line() {
        let list: ErrorList = vec![
            Diagnostic::syntax("a", Some(Position::new(1, 1, 0))),
            Diagnostic::syntax("b", Some(Position::new(2, 1, 4))),
        ]
        .into_iter()
        .collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "syntax error at 1:1: a\nsyntax error at 2:1: b");
    }

    #[test]
    fn test_sort_by_offset() {
        let mut list: ErrorList = vec![
            Diagnostic::syntax("late", Some(Position::new(2, 1, 10))),
            Diagnostic::syntax("none", None),
            Diagnostic::syntax("early", Some(Position::new(1, 1, 0))),
        ]
        .into_iter()
        .collect();
        list.sort();
        let messages: Vec<_> = list.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["early", "late", "none"]);
    }

    #[test]
    fn test_from_chumsky_unexpected() {
        let locator = SourceLocation::new("a(\n  b c)");
        let error = Simple::expected_input_found(
            7..8,
            vec![Some(Token::Comma), Some(Token::RParen)],
            Some(Token::Ident("c".into())),
        );
        let d = Diagnostic::from_parse_error(&error, &locator);
        assert_eq!(d.kind, ErrorKind::Syntax);
        assert_eq!(d.position, Some(Position::new(2, 5, 7)));
        assert_eq!(d.message, "unexpected `c`, expected `)` or `,`");
    }

    #[test]
    fn test_from_chumsky_names_token_categories() {
        let locator = SourceLocation::new("x = )");
        let error = Simple::expected_input_found(
            4..5,
            vec![
                Some(Token::Str(String::new())),
                Some(Token::Ident(String::new())),
                Some(Token::LBracket),
            ],
            Some(Token::RParen),
        );
        let d = Diagnostic::from_parse_error(&error, &locator);
        assert_eq!(d.message, "unexpected `)`, expected `[` or a string or an identifier");
    }

    #[test]
    fn test_from_chumsky_end_of_input() {
        let locator = SourceLocation::new("a(");
        let error: Simple<Token> =
            Simple::expected_input_found(2..2, vec![Some(Token::RParen)], None);
        let d = Diagnostic::from_parse_error(&error, &locator);
        assert!(d.message.starts_with("unexpected end of input"));
    }

    #[test]
    fn test_from_chumsky_custom() {
        let locator = SourceLocation::new("x");
        let error: Simple<Token> = Simple::custom(0..1, "duplicate package()");
        let d = Diagnostic::from_parse_error(&error, &locator);
        assert_eq!(d.message, "duplicate package()");
    }
}
