//! # buildfile
//!
//! A parser for Bazel-style BUILD files and a canonical printer for the
//! parsed tree.
//!
//! The pipeline is `source -> lexer -> tokens -> parser -> BuildFile -> printer`.
//! Nothing is evaluated: `glob()` and `select()` are recorded as written.
//!
//! ## Testing
//!
//! Parser tests use the fluent assertions in the [testing module](buildfile::testing)
//! and the sample files under `docs/samples`.

pub mod buildfile;

pub use buildfile::{format, format_with, parse, parse_recovering, parse_with, Error};
