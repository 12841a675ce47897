//! Testing utilities for AST assertions
//!
//! # Parser Testing Guidelines
//!
//! Parser tests should use the two tools below together:
//!
//! 1. **[BuildSources](crate::buildfile::processor::samples::BuildSources)** - verified BUILD
//!    content from `docs/samples`
//! 2. **[assert_build](fn@assert_build)** - fluent verification of the parsed tree
//!
//! ## Use BuildSources for whole files
//!
//! Sample files are the ones that get reviewed when the grammar changes. Small
//! inline snippets are fine for a single construct or an error case; anything
//! that looks like a real BUILD file belongs in `docs/samples`.
//!
//! ```rust,ignore
//! let source = BuildSources::get_string("010-ts-library.BUILD")?;
//! let file = crate::buildfile::parse(&source)?;
//! ```
//!
//! ## Use assert_build for tree checks
//!
//! Matching on every node by hand buries the expectation in boilerplate:
//!
//! ```rust,ignore
//! match &file.rules[0].attributes[1].value {
//!     Initializer::Glob(g) => match &g.includes { ... },
//!     _ => panic!("expected glob"),
//! }
//! ```
//!
//! The fluent form mirrors the tree instead:
//!
//! ```rust,ignore
//! assert_build(&file)
//!     .rule_count(1)
//!     .rule(0, |rule| {
//!         rule.kind("ts_library")
//!             .name("foo")
//!             .attribute(1, |value| {
//!                 value.assert_glob().includes(&["*.ts"]).no_excludes();
//!             });
//!     });
//! ```
//!
//! Failures name the path to the node, e.g.
//! `rules[0].attributes[1]: Expected GLOB, found IDENTIFIER_NODE`.

mod testing_assertions;
mod testing_matchers;

pub use testing_assertions::{
    assert_build, exported_files, BuildFileAssertion, DeclarationAssertion, DictAssertion, GlobAssertion,
    LoadAssertion, PackageAssertion, RuleAssertion, SelectAssertion, ValueAssertion,
};
pub use testing_matchers::TextMatch;
