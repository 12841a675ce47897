//! Value grammar: initializers, arrays, dicts, `glob()` and `select()`
//!
//! Initializer alternatives are tried in this order, first success wins:
//!
//! | lookahead          | production |
//! |--------------------|------------|
//! | string             | string literal |
//! | number             | number literal |
//! | `True` / `False`   | boolean |
//! | `[`                | array |
//! | `glob`             | glob call |
//! | `{`                | dict |
//! | `select` `(`       | select call |
//! | identifier         | variable reference |
//!
//! `select` is an ordinary identifier to the lexer, so the select production
//! has to come before the generic identifier one.

use chumsky::prelude::*;
use std::ops::Range;

use crate::buildfile::ast::{
    ArrayElement, ArrayOrIdentifier, ArrayType, DictEntry, DictOrIdentifier, DictType, GlobNode,
    Initializer, SelectStatement, StringOrIdentifier,
};
use crate::buildfile::lexer::Token;
use crate::buildfile::parser::combinators::{
    boolean, call_args, comma_list, ident, identifier, keyword, number_literal, string_literal,
    token, Locator, ParserError, TrailingComma,
};

/// Full initializer grammar; dict values recurse back into it
pub(crate) fn initializer(
    locator: Locator,
) -> impl Parser<Token, Initializer, Error = ParserError> + Clone {
    recursive(move |initializer| {
        let dict = dict(initializer, locator.clone());

        choice((
            string_literal(locator.clone()).map(Initializer::String),
            number_literal(locator.clone()).map(Initializer::Number),
            boolean(locator.clone()).map(Initializer::Boolean),
            array(locator.clone()).map(Initializer::Array),
            glob(locator.clone()).map(Initializer::Glob),
            dict.clone().map(Initializer::Dict),
            select(dict, locator.clone()).map(Initializer::Select),
            identifier(locator.clone()).map(Initializer::Identifier),
        ))
        .labelled("value")
    })
}

/// `[ element, ... ]` with no nesting and no trailing comma
pub(crate) fn array(locator: Locator) -> impl Parser<Token, ArrayType, Error = ParserError> + Clone {
    let element = choice((
        string_literal(locator.clone()).map(ArrayElement::String),
        number_literal(locator.clone()).map(ArrayElement::Number),
        boolean(locator.clone()).map(ArrayElement::Boolean),
        identifier(locator.clone()).map(ArrayElement::Identifier),
    ));

    comma_list(element, TrailingComma::Rejected, "an array")
        .delimited_by(token(Token::LBracket), token(Token::RBracket))
        .map_with_span(move |values, span: Range<usize>| {
            ArrayType::new(values).with_position(locator.position(&span))
        })
        .labelled("array")
}

/// An array literal or the name of one
pub(crate) fn array_or_identifier(
    locator: Locator,
) -> impl Parser<Token, ArrayOrIdentifier, Error = ParserError> + Clone {
    array(locator.clone())
        .map(ArrayOrIdentifier::Array)
        .or(identifier(locator).map(ArrayOrIdentifier::Identifier))
}

/// `{ "key": value, ... }`
pub(crate) fn dict<P>(
    value: P,
    locator: Locator,
) -> impl Parser<Token, DictType, Error = ParserError> + Clone
where
    P: Parser<Token, Initializer, Error = ParserError> + Clone,
{
    let entry = string_literal(locator.clone())
        .then_ignore(token(Token::Colon))
        .then(value)
        .map(|(key, value)| DictEntry { key, value });

    comma_list(entry, TrailingComma::Allowed, "a dict")
        .delimited_by(token(Token::LBrace), token(Token::RBrace))
        .map_with_span(move |values, span: Range<usize>| {
            DictType::new(values).with_position(locator.position(&span))
        })
        .labelled("dict")
}

/// Which slot of a glob an argument fills
#[derive(Debug, Clone, PartialEq)]
enum GlobArg {
    Include(Vec<StringOrIdentifier>),
    Exclude(Vec<StringOrIdentifier>),
}

/// `glob([...], exclude = [...])`, also `glob(include = [...], ...)`.
///
/// A named argument fills `includes` when its name is `include` in any
/// letter case and `excludes` otherwise. Repeating a slot replaces it.
pub(crate) fn glob(locator: Locator) -> impl Parser<Token, GlobNode, Error = ParserError> + Clone {
    let pattern = choice((
        string_literal(locator.clone()).map(StringOrIdentifier::String),
        identifier(locator.clone()).map(StringOrIdentifier::Identifier),
    ));
    let patterns = comma_list(pattern, TrailingComma::Rejected, "an array")
        .delimited_by(token(Token::LBracket), token(Token::RBracket));

    let positional = patterns.clone().map(GlobArg::Include);
    let named = ident()
        .then_ignore(token(Token::Equals))
        .then(patterns)
        .map(|(name, values)| {
            if name.eq_ignore_ascii_case("include") {
                GlobArg::Include(values)
            } else {
                GlobArg::Exclude(values)
            }
        });

    token(Token::Glob)
        .ignore_then(call_args(comma_list(
            positional.or(named),
            TrailingComma::Allowed,
            "glob()",
        )))
        .map_with_span(move |args, span: Range<usize>| {
            let mut node = GlobNode::new(None, None).with_position(locator.position(&span));
            for arg in args {
                match arg {
                    GlobArg::Include(values) => node.includes = Some(values),
                    GlobArg::Exclude(values) => node.excludes = Some(values),
                }
            }
            node
        })
        .labelled("glob")
}

/// `select(constraint)` or `select(constraint, no_match_error = message)`
pub(crate) fn select<P>(
    dict: P,
    locator: Locator,
) -> impl Parser<Token, SelectStatement, Error = ParserError> + Clone
where
    P: Parser<Token, DictType, Error = ParserError> + Clone,
{
    let constraint = dict
        .map(DictOrIdentifier::Dict)
        .or(identifier(locator.clone()).map(DictOrIdentifier::Identifier));

    let message = choice((
        string_literal(locator.clone()).map(StringOrIdentifier::String),
        identifier(locator.clone()).map(StringOrIdentifier::Identifier),
    ));
    let no_match_error = token(Token::Comma)
        .ignore_then(keyword("no_match_error"))
        .ignore_then(token(Token::Equals))
        .ignore_then(message);

    keyword("select")
        .ignore_then(call_args(constraint.then(no_match_error.or_not())))
        .map_with_span(move |(constraint, no_match_error), span: Range<usize>| {
            SelectStatement::new(constraint, no_match_error).with_position(locator.position(&span))
        })
        .labelled("select")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildfile::lexer::tokenize_with_spans;
    use chumsky::Stream;

    fn parse_value(source: &str) -> Result<Initializer, Vec<ParserError>> {
        let eoi = source.len();
        let stream = Stream::from_iter(eoi..eoi, tokenize_with_spans(source).into_iter());
        initializer(Locator::new(source))
            .then_ignore(end())
            .parse(stream)
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(parse_value("\"x\"").unwrap().node_type(), "STRING_LITERAL");
        assert_eq!(parse_value("42").unwrap().node_type(), "NUMBER_LITERAL");
        assert_eq!(parse_value("False").unwrap().node_type(), "BOOLEAN");
        assert_eq!(parse_value("SRCS").unwrap().node_type(), "IDENTIFIER_NODE");
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(parse_value("2.5e3").unwrap().as_number().unwrap().value, 2500.0);
        assert!(parse_value("True").unwrap().as_boolean().unwrap().value);
        assert_eq!(parse_value("SRCS").unwrap().as_identifier().unwrap().value, "SRCS");
        assert!(parse_value("SRCS").unwrap().as_number().is_none());
    }

    #[test]
    fn test_array_elements() {
        let value = parse_value("[\"a\", 1, True, NAME]").unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.values.len(), 4);
        assert!(matches!(array.values[3], ArrayElement::Identifier(_)));
    }

    #[test]
    fn test_array_rejects_nesting() {
        assert!(parse_value("[[\"a\"]]").is_err());
        assert!(parse_value("[{}]").is_err());
    }

    #[test]
    fn test_dict_values_recurse() {
        let value = parse_value("{\"a\": {\"b\": [1]}, \"c\": glob([\"*\"]),}").unwrap();
        let dict = value.as_dict().unwrap();
        assert_eq!(dict.values.len(), 2);
        assert!(dict.get("a").and_then(Initializer::as_dict).is_some());
        assert!(dict.get("c").and_then(Initializer::as_glob).is_some());
    }

    #[test]
    fn test_dict_keys_must_be_strings() {
        assert!(parse_value("{a: 1}").is_err());
    }

    #[test]
    fn test_glob_include_exclude() {
        let value = parse_value("glob([\"*.ts\"], exclude = [])").unwrap();
        let glob = value.as_glob().unwrap();
        assert_eq!(glob.include_patterns(), vec!["*.ts"]);
        assert_eq!(glob.excludes, Some(vec![]));
    }

    #[test]
    fn test_glob_include_name_is_case_insensitive() {
        let value = parse_value("glob(INCLUDE = [\"a\"], Include = [\"b\"])").unwrap();
        let glob = value.as_glob().unwrap();
        assert_eq!(glob.include_patterns(), vec!["b"]);
        assert!(glob.excludes.is_none());
    }

    #[test]
    fn test_select_with_identifier_constraint() {
        let value = parse_value("select(CONFIG, no_match_error = \"nope\")").unwrap();
        let select = value.as_select().unwrap();
        assert!(matches!(select.constraint, DictOrIdentifier::Identifier(_)));
        assert_eq!(
            select.no_match_error.as_ref().map(StringOrIdentifier::text),
            Some("nope")
        );
    }

    #[test]
    fn test_select_argument_name_is_checked() {
        assert!(parse_value("select({}, message = \"x\")").is_err());
        assert!(parse_value("select({},)").is_err());
    }

    #[test]
    fn test_bare_select_is_an_identifier() {
        assert_eq!(parse_value("select").unwrap().node_type(), "IDENTIFIER_NODE");
    }

    #[test]
    fn test_positions_are_recorded() {
        let value = parse_value("\n  [1]").unwrap();
        let array = value.as_array().unwrap();
        let position = array.position.unwrap();
        assert_eq!((position.line, position.column, position.offset), (2, 3, 3));
    }
}
