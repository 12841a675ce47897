//! Parser combinator functions for building the BUILD parser.
//!
//! Terminals (literals, identifiers, contextual keywords) and the comma-list
//! helper shared by every call-like construct.

use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

use crate::buildfile::ast::{
    Boolean, Identifier, NumberLiteral, Position, SourceLocation, StringLiteral,
};
use crate::buildfile::lexer::Token;

/// Type alias for parser error
pub(crate) type ParserError = Simple<Token>;

/// Identifiers that open a dedicated construct and can never name a rule
pub(crate) const RESERVED_CALLS: [&str; 4] = ["package", "package_group", "exports_files", "select"];

/// Expected-set entry standing for every token of one payload category.
///
/// The empty payload marks it; diagnostics render it as "a string" and so on.
pub(crate) fn any_of(category: fn(String) -> Token) -> Option<Token> {
    Some(category(String::new()))
}

/// Maps token byte spans to node positions
#[derive(Debug, Clone)]
pub(crate) struct Locator(Arc<SourceLocation>);

impl Locator {
    pub(crate) fn new(source: &str) -> Self {
        Self(Arc::new(SourceLocation::new(source)))
    }

    pub(crate) fn position(&self, span: &Range<usize>) -> Option<Position> {
        Some(self.0.byte_to_position(span.start))
    }

    pub(crate) fn source_location(&self) -> &SourceLocation {
        &self.0
    }
}

/// Whether a comma may directly precede the closing delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrailingComma {
    Allowed,
    Rejected,
}

/// Helper: match a specific token, discarding it
pub(crate) fn token(t: Token) -> impl Parser<Token, (), Error = ParserError> + Clone {
    just(t).ignored()
}

/// Any identifier, yielding its name
pub(crate) fn ident() -> impl Parser<Token, String, Error = ParserError> + Clone {
    filter_map(|span, tok| match tok {
        Token::Ident(name) => Ok(name),
        other => Err(ParserError::expected_input_found(span, [any_of(Token::Ident)], Some(other))),
    })
    .labelled("identifier")
}

/// An identifier with one exact spelling, such as `package` or `no_match_error`
pub(crate) fn keyword(name: &'static str) -> impl Parser<Token, (), Error = ParserError> + Clone {
    filter_map(move |span, tok| match tok {
        Token::Ident(ref found) if found == name => Ok(()),
        other => Err(ParserError::expected_input_found(
            span,
            Some(Some(Token::Ident(name.to_string()))),
            Some(other),
        )),
    })
}

/// The callee of a rule invocation: any identifier that is not reserved
pub(crate) fn rule_kind() -> impl Parser<Token, String, Error = ParserError> + Clone {
    filter_map(|span, tok| match tok {
        Token::Ident(name) if !RESERVED_CALLS.contains(&name.as_str()) => Ok(name),
        other => Err(ParserError::expected_input_found(span, [any_of(Token::Ident)], Some(other))),
    })
    .labelled("rule name")
}

pub(crate) fn string_literal(
    locator: Locator,
) -> impl Parser<Token, StringLiteral, Error = ParserError> + Clone {
    filter_map(move |span: Range<usize>, tok| match tok {
        Token::Str(raw) => Ok(StringLiteral::from_raw(raw).with_position(locator.position(&span))),
        other => Err(ParserError::expected_input_found(span, [any_of(Token::Str)], Some(other))),
    })
    .labelled("string")
}

pub(crate) fn number_literal(
    locator: Locator,
) -> impl Parser<Token, NumberLiteral, Error = ParserError> + Clone {
    filter_map(move |span: Range<usize>, tok| match tok {
        Token::Number(raw) => {
            // The token pattern is a subset of what f64 accepts; overflow gives infinity
            let value = raw.parse::<f64>().unwrap_or(f64::NAN);
            Ok(NumberLiteral::new(raw, value).with_position(locator.position(&span)))
        }
        other => Err(ParserError::expected_input_found(span, [any_of(Token::Number)], Some(other))),
    })
    .labelled("number")
}

pub(crate) fn boolean(locator: Locator) -> impl Parser<Token, Boolean, Error = ParserError> + Clone {
    filter_map(move |span: Range<usize>, tok| match tok {
        Token::True => Ok(Boolean::new(true).with_position(locator.position(&span))),
        Token::False => Ok(Boolean::new(false).with_position(locator.position(&span))),
        other => Err(ParserError::expected_input_found(
            span,
            [Some(Token::True), Some(Token::False)],
            Some(other),
        )),
    })
}

/// An identifier used as a value
pub(crate) fn identifier(
    locator: Locator,
) -> impl Parser<Token, Identifier, Error = ParserError> + Clone {
    ident().map_with_span(move |name, span: Range<usize>| {
        Identifier::new(name).with_position(locator.position(&span))
    })
}

/// Comma-separated items; whether a trailing comma is legal is per construct.
///
/// A rejected trailing comma is reported without aborting the list, so the
/// enclosing construct still parses.
pub(crate) fn comma_list<T, P>(
    item: P,
    trailing: TrailingComma,
    construct: &'static str,
) -> impl Parser<Token, Vec<T>, Error = ParserError> + Clone
where
    P: Parser<Token, T, Error = ParserError> + Clone,
{
    item.separated_by(token(Token::Comma))
        .then(just(Token::Comma).map_with_span(|_, span| span).or_not())
        .validate(move |(items, comma), _, emit| {
            if let Some(span) = comma {
                if items.is_empty() {
                    emit(ParserError::expected_input_found(
                        span,
                        None,
                        Some(Token::Comma),
                    ));
                } else if trailing == TrailingComma::Rejected {
                    emit(ParserError::custom(
                        span,
                        format!("trailing comma is not allowed in {}", construct),
                    ));
                }
            }
            items
        })
}

/// Parenthesised argument list
pub(crate) fn call_args<T, P>(
    args: P,
) -> impl Parser<Token, T, Error = ParserError> + Clone
where
    P: Parser<Token, T, Error = ParserError> + Clone,
{
    args.delimited_by(token(Token::LParen), token(Token::RParen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildfile::lexer::tokenize;

    fn run<T>(
        parser: impl Parser<Token, T, Error = ParserError>,
        source: &str,
    ) -> Result<T, Vec<ParserError>> {
        parser.then_ignore(end()).parse(tokenize(source))
    }

    #[test]
    fn test_keyword_matches_exact_identifier() {
        assert!(run(keyword("package"), "package").is_ok());
        assert!(run(keyword("package"), "packages").is_err());
    }

    #[test]
    fn test_rule_kind_excludes_reserved_names() {
        assert_eq!(run(rule_kind(), "cc_library").unwrap(), "cc_library");
        for name in RESERVED_CALLS {
            assert!(run(rule_kind(), name).is_err(), "{} accepted", name);
        }
    }

    #[test]
    fn test_string_literal_value() {
        let s = run(string_literal(Locator::new("\"a\"")), "\"a\"").unwrap();
        assert_eq!(s.value, "a");
        assert_eq!(s.raw, "\"a\"");
    }

    #[test]
    fn test_number_literal_value() {
        let n = run(number_literal(Locator::new("-2.5e1")), "-2.5e1").unwrap();
        assert_eq!(n.value, -25.0);
        assert_eq!(n.raw, "-2.5e1");
    }

    #[test]
    fn test_comma_list_trailing_allowed() {
        let list = comma_list(ident(), TrailingComma::Allowed, "test");
        assert_eq!(run(list.clone(), "a, b,").unwrap(), vec!["a", "b"]);
        assert_eq!(run(list.clone(), "").unwrap(), Vec::<String>::new());
        assert!(run(list, ",").is_err());
    }

    #[test]
    fn test_comma_list_trailing_rejected() {
        let list = comma_list(ident(), TrailingComma::Rejected, "test");
        assert_eq!(run(list.clone(), "a, b").unwrap(), vec!["a", "b"]);
        let errors = run(list, "a, b,").unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
