//! Document-level parser responsible for parsing an entire BUILD file.
//!
//! The grammar itself accepts statements in any order. Placement is checked
//! by [`assemble`], which walks the statements once and enforces the phases
//! of a file:
//!
//! 1. `load()` statements
//! 2. rules, variable declarations and `exports_files()`, in any order
//! 3. at most one `package()`
//! 4. at most one `package_group()`
//!
//! Checking placement after the fact keeps a misplaced statement from
//! derailing the parse of everything after it.

use chumsky::prelude::*;
use chumsky::recovery::skip_parser;
use std::ops::Range;

use crate::buildfile::ast::BuildFile;
use crate::buildfile::error::{Diagnostic, ErrorList};
use crate::buildfile::lexer::Token;
use crate::buildfile::parser::combinators::{Locator, ParserError};
use crate::buildfile::parser::statements::{statement, statement_start, Statement};

/// Type alias for a statement with its byte span
pub(crate) type SpannedStatement = (Statement, Range<usize>);

/// Build the document parser.
///
/// With recovery on, a statement that fails to parse is reported and the
/// parser skips ahead to the next token that can start a statement: `load`,
/// or an identifier followed by `(` or `=`.
pub(crate) fn document(
    locator: Locator,
    recovery: bool,
) -> BoxedParser<'static, Token, Vec<SpannedStatement>, ParserError> {
    let statement = statement(locator, recovery);

    if recovery {
        let skipped = any::<Token, ParserError>()
            .then(statement_start().not().repeated())
            .map_with_span(|_, span| (Statement::Skipped, span));

        statement
            .recover_with(skip_parser(skipped))
            .repeated()
            .then_ignore(end())
            .boxed()
    } else {
        statement.repeated().then_ignore(end()).boxed()
    }
}

/// Where in the file the walk currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Loads,
    Body,
    Package,
    PackageGroup,
}

/// Fold parsed statements into a [`BuildFile`], reporting misplaced ones.
///
/// Misplaced statements are still added to the tree.
pub(crate) fn assemble(statements: Vec<SpannedStatement>, locator: &Locator) -> (BuildFile, ErrorList) {
    let mut file = BuildFile::new();
    let mut errors = ErrorList::new();
    let mut phase = Phase::Loads;

    for (statement, span) in statements {
        let position = locator.position(&span);
        let what = statement.describe();
        let mut misplaced = |message: String| errors.push(Diagnostic::syntax(message, position));

        match statement {
            Statement::Load(load) => {
                if phase > Phase::Loads {
                    misplaced(format!("{} must come before every other statement", what));
                }
                file.loads.push(load);
            }
            Statement::Rule(_) | Statement::Declaration(_) | Statement::ExportsFiles(_) => {
                if phase > Phase::Body {
                    misplaced(format!("{} is not allowed after package() or package_group()", what));
                }
                phase = phase.max(Phase::Body);
                match statement {
                    Statement::Rule(rule) => file.rules.push(rule),
                    Statement::Declaration(declaration) => file.declarations.push(declaration),
                    Statement::ExportsFiles(exports) => {
                        if file.exports_files.is_some() {
                            log::debug!("exports_files() repeated; keeping the last one");
                        }
                        file.exports_files = Some(exports);
                    }
                    _ => {}
                }
            }
            Statement::Package(package) => {
                if file.package.is_some() {
                    misplaced(format!("duplicate {}", what));
                } else if phase > Phase::Package {
                    misplaced(format!("{} must come before package_group()", what));
                }
                phase = phase.max(Phase::Package);
                file.package = Some(package);
            }
            Statement::PackageGroup(group) => {
                if file.package_group.is_some() {
                    misplaced(format!("duplicate {}", what));
                }
                phase = Phase::PackageGroup;
                file.package_group = Some(group);
            }
            Statement::Skipped => {}
        }
    }

    (file, errors)
}
