//! Top-level statements: `load()`, rules, declarations and the package-level
//! calls.
//!
//! Statements are tried in this order, first success wins:
//!
//! | lookahead                 | production |
//! |---------------------------|------------|
//! | `load` `(`                | load statement |
//! | `package` `(`             | package declaration |
//! | `package_group` `(`       | package group declaration |
//! | `exports_files` `(`       | exports_files declaration |
//! | identifier `(`            | rule invocation |
//! | identifier `=`            | variable declaration |
//!
//! The two identifier rows are told apart by the token after the name.
//! Where statements may appear relative to each other is checked afterwards,
//! see the document module.

use chumsky::prelude::*;
use std::ops::Range;

use crate::buildfile::ast::{
    ExportsFilesDeclaration, Initializer, LoadStatement, PackageDeclaration,
    PackageGroupDeclaration, RenamedSymbolLoad, Rule, RuleAttribute, SymbolLoad, SymbolLoadKind,
    VariableDeclaration,
};
use crate::buildfile::lexer::Token;
use crate::buildfile::parser::combinators::{
    call_args, comma_list, ident, keyword, rule_kind, string_literal, token, Locator, ParserError,
    TrailingComma,
};
use crate::buildfile::parser::values::{array_or_identifier, initializer};

/// One parsed top-level construct
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    Load(LoadStatement),
    Package(PackageDeclaration),
    PackageGroup(PackageGroupDeclaration),
    ExportsFiles(ExportsFilesDeclaration),
    Rule(Rule),
    Declaration(VariableDeclaration),
    /// Tokens skipped while resynchronising after an error
    Skipped,
}

impl Statement {
    /// Human readable name used in ordering diagnostics
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Statement::Load(_) => "load()",
            Statement::Package(_) => "package()",
            Statement::PackageGroup(_) => "package_group()",
            Statement::ExportsFiles(_) => "exports_files()",
            Statement::Rule(_) => "rule",
            Statement::Declaration(_) => "variable declaration",
            Statement::Skipped => "unparsed input",
        }
    }
}

/// Any top-level statement, tagged with its byte span
pub(crate) fn statement(
    locator: Locator,
    recovery: bool,
) -> impl Parser<Token, (Statement, Range<usize>), Error = ParserError> + Clone {
    choice((
        load(locator.clone()).map(Statement::Load),
        package(locator.clone(), recovery).map(Statement::Package),
        package_group(locator.clone(), recovery).map(Statement::PackageGroup),
        exports_files(locator.clone()).map(Statement::ExportsFiles),
        rule(locator.clone(), recovery).map(Statement::Rule),
        declaration(locator).map(Statement::Declaration),
    ))
    .map_with_span(|statement, span| (statement, span))
}

/// Lookahead for the first token(s) of a statement, used to resynchronise
pub(crate) fn statement_start() -> impl Parser<Token, (), Error = ParserError> + Clone {
    token(Token::Load).or(ident()
        .then(just(Token::LParen).or(just(Token::Equals)))
        .ignored())
}

/// `load("label", "symbol", alias = "symbol", ...)`
pub(crate) fn load(locator: Locator) -> impl Parser<Token, LoadStatement, Error = ParserError> + Clone {
    let plain = string_literal(locator.clone()).map(|symbol| {
        SymbolLoadKind::Plain(SymbolLoad {
            symbol: symbol.value,
            position: symbol.position,
        })
    });
    let renamed = ident()
        .then_ignore(token(Token::Equals))
        .then(string_literal(locator.clone()))
        .map_with_span({
            let locator = locator.clone();
            move |(identifier, symbol), span: Range<usize>| {
                SymbolLoadKind::Renamed(RenamedSymbolLoad {
                    identifier,
                    symbol: symbol.value,
                    position: locator.position(&span),
                })
            }
        });

    let from = string_literal(locator.clone());
    let symbols = comma_list(plain.or(renamed), TrailingComma::Rejected, "load()");

    token(Token::Load)
        .ignore_then(call_args(from.then_ignore(token(Token::Comma)).then(symbols)))
        .map_with_span(move |(from, symbols), span: Range<usize>| {
            LoadStatement::new(from.value, symbols).with_position(locator.position(&span))
        })
        .labelled("load statement")
}

/// `NAME = value` inside a call
fn named_argument(
    locator: Locator,
) -> impl Parser<Token, (String, Initializer), Error = ParserError> + Clone {
    ident()
        .then_ignore(token(Token::Equals))
        .then(initializer(locator))
}

/// Parenthesised list of named arguments.
///
/// With recovery on, a malformed list whose parentheses still balance is
/// skipped as a whole and yields no arguments.
fn argument_list<T, P>(
    item: P,
    trailing: TrailingComma,
    construct: &'static str,
    recovery: bool,
) -> BoxedParser<'static, Token, Vec<T>, ParserError>
where
    P: Parser<Token, T, Error = ParserError> + Clone + 'static,
    T: 'static,
{
    let args = call_args(comma_list(item, trailing, construct));
    if recovery {
        args.recover_with(nested_delimiters(
            Token::LParen,
            Token::RParen,
            [
                (Token::LBracket, Token::RBracket),
                (Token::LBrace, Token::RBrace),
            ],
            |_| Vec::new(),
        ))
        .boxed()
    } else {
        args.boxed()
    }
}

/// `kind(name = value, ...)`
pub(crate) fn rule(locator: Locator, recovery: bool) -> impl Parser<Token, Rule, Error = ParserError> + Clone {
    let attribute = named_argument(locator.clone()).map_with_span({
        let locator = locator.clone();
        move |(identifier, value), span: Range<usize>| RuleAttribute {
            identifier,
            value,
            position: locator.position(&span),
        }
    });

    rule_kind()
        .then(argument_list(attribute, TrailingComma::Rejected, "a rule", recovery))
        .map_with_span(move |(kind, attributes), span: Range<usize>| Rule {
            kind,
            attributes,
            position: locator.position(&span),
        })
}

/// `NAME = value` at the top level
pub(crate) fn declaration(
    locator: Locator,
) -> impl Parser<Token, VariableDeclaration, Error = ParserError> + Clone {
    named_argument(locator.clone()).map_with_span(
        move |(identifier, initializer), span: Range<usize>| VariableDeclaration {
            identifier,
            initializer,
            position: locator.position(&span),
        },
    )
}

/// `package(NAME = value, ...)`; names without a slot are dropped
pub(crate) fn package(
    locator: Locator,
    recovery: bool,
) -> impl Parser<Token, PackageDeclaration, Error = ParserError> + Clone {
    keyword("package")
        .ignore_then(argument_list(
            named_argument(locator.clone()),
            TrailingComma::Allowed,
            "package()",
            recovery,
        ))
        .map_with_span(move |args, span: Range<usize>| {
            let mut node = PackageDeclaration {
                position: locator.position(&span),
                ..Default::default()
            };
            for (key, value) in args {
                if !node.set(&key, value) {
                    log::debug!("package(): ignoring argument `{}`", key);
                }
            }
            node
        })
}

/// `package_group(NAME = value, ...)`; names without a slot are dropped
pub(crate) fn package_group(
    locator: Locator,
    recovery: bool,
) -> impl Parser<Token, PackageGroupDeclaration, Error = ParserError> + Clone {
    keyword("package_group")
        .ignore_then(argument_list(
            named_argument(locator.clone()),
            TrailingComma::Allowed,
            "package_group()",
            recovery,
        ))
        .map_with_span(move |args, span: Range<usize>| {
            let mut node = PackageGroupDeclaration {
                position: locator.position(&span),
                ..Default::default()
            };
            for (key, value) in args {
                if !node.set(&key, value) {
                    log::debug!("package_group(): ignoring argument `{}`", key);
                }
            }
            node
        })
}

/// `exports_files(files[, NAME = value])`.
///
/// At most one named argument is accepted. Whatever its name, its value
/// fills the `visibility` slot.
pub(crate) fn exports_files(
    locator: Locator,
) -> impl Parser<Token, ExportsFilesDeclaration, Error = ParserError> + Clone {
    let named = token(Token::Comma)
        .ignore_then(ident())
        .then_ignore(token(Token::Equals))
        .then(array_or_identifier(locator.clone()));

    keyword("exports_files")
        .ignore_then(call_args(
            array_or_identifier(locator.clone())
                .then(named.or_not())
                .then_ignore(token(Token::Comma).or_not()),
        ))
        .map_with_span(move |(files, named), span: Range<usize>| {
            let visibility = named.map(|(key, value)| {
                if key != "visibility" {
                    log::debug!("exports_files(): `{}` taken as visibility", key);
                }
                value
            });
            let mut node = ExportsFilesDeclaration::new(files, visibility);
            node.position = locator.position(&span);
            node
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildfile::ast::ArrayOrIdentifier;
    use crate::buildfile::lexer::tokenize_with_spans;
    use chumsky::Stream;

    fn parse_statement(source: &str) -> Result<Statement, Vec<ParserError>> {
        let eoi = source.len();
        let stream = Stream::from_iter(eoi..eoi, tokenize_with_spans(source).into_iter());
        statement(Locator::new(source), false)
            .then_ignore(end())
            .map(|(statement, _)| statement)
            .parse(stream)
    }

    #[test]
    fn test_load_with_plain_and_renamed_symbols() {
        match parse_statement("load(\"@npm//x\", \"a\", b = \"c\")").unwrap() {
            Statement::Load(load) => {
                assert_eq!(load.from, "@npm//x");
                assert_eq!(load.symbols.len(), 2);
                assert_eq!(load.symbols[1].local_name(), "b");
                assert_eq!(load.symbols[1].symbol(), "c");
            }
            other => panic!("expected load, got {other:?}"),
        }
    }

    #[test]
    fn test_load_requires_comma_after_label() {
        assert!(parse_statement("load(\"x\")").is_err());
        match parse_statement("load(\"x\",)").unwrap() {
            Statement::Load(load) => assert!(load.symbols.is_empty()),
            other => panic!("expected load, got {other:?}"),
        }
    }

    #[test]
    fn test_rule_versus_declaration() {
        assert!(matches!(
            parse_statement("foo(name = \"x\")").unwrap(),
            Statement::Rule(_)
        ));
        assert!(matches!(
            parse_statement("foo = \"x\"").unwrap(),
            Statement::Declaration(_)
        ));
    }

    #[test]
    fn test_empty_rule() {
        match parse_statement("filegroup()").unwrap() {
            Statement::Rule(rule) => assert!(rule.attributes.is_empty()),
            other => panic!("expected rule, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_names_are_not_rules() {
        assert!(parse_statement("select(name = \"x\")").is_err());
    }

    #[test]
    fn test_package_keeps_known_slots_only() {
        match parse_statement("package(default_visibility = [\"//x\"], licenses = [\"a\"],)").unwrap() {
            Statement::Package(package) => {
                assert!(package.default_visibility.is_some());
                assert_eq!(package.entries().count(), 1);
            }
            other => panic!("expected package, got {other:?}"),
        }
    }

    #[test]
    fn test_exports_files_visibility() {
        let source = "exports_files([\"a.txt\"], visibility = PUBLIC,)";
        match parse_statement(source).unwrap() {
            Statement::ExportsFiles(exports) => {
                assert!(matches!(exports.files, ArrayOrIdentifier::Array(_)));
                assert!(matches!(
                    exports.visibility,
                    Some(ArrayOrIdentifier::Identifier(_))
                ));
            }
            other => panic!("expected exports_files, got {other:?}"),
        }
    }

    #[test]
    fn test_exports_files_any_argument_name_fills_visibility() {
        match parse_statement("exports_files([\"a\"], foo = [\"b\"])").unwrap() {
            Statement::ExportsFiles(exports) => match exports.visibility {
                Some(ArrayOrIdentifier::Array(array)) => assert_eq!(array.values.len(), 1),
                other => panic!("expected an array visibility, got {other:?}"),
            },
            other => panic!("expected exports_files, got {other:?}"),
        }
    }

    #[test]
    fn test_exports_files_takes_one_named_argument() {
        assert!(parse_statement("exports_files([\"a\"], visibility = [], foo = [])").is_err());
    }

    #[test]
    fn test_statement_start_lookahead() {
        let accepts = |source: &str| {
            statement_start()
                .parse(crate::buildfile::lexer::tokenize(source))
                .is_ok()
        };
        assert!(accepts("load"));
        assert!(accepts("x ="));
        assert!(accepts("x ("));
        assert!(!accepts("x ,"));
        assert!(!accepts(")"));
    }
}
