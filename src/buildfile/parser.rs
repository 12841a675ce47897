//! Parser module for BUILD files
//!
//! A chumsky grammar over the token stream produced by the lexer. It is
//! split the way the grammar is:
//!
//! - `combinators` - terminals and list helpers
//! - `values` - the recursive initializer grammar
//! - `statements` - top-level statements
//! - `document` - the statement sequence, recovery and placement checks
//! - `api` - entry points
//!
//! ## Testing
//!
//! Parser tests use the sample files under `docs/samples` and the fluent
//! assertions of the [testing module](crate::buildfile::testing).

pub mod api;
pub(crate) mod combinators;
pub(crate) mod document;
pub(crate) mod statements;
pub(crate) mod values;

pub use api::{parse_tokens, parse_tokens_recovering};

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep going after a syntax error so one call reports every error it can
    /// find. When off, parsing stops at the first grammar error.
    pub recovery: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { recovery: true }
    }
}

impl ParseOptions {
    /// Stop at the first syntax error
    pub fn fail_fast() -> Self {
        Self { recovery: false }
    }
}
