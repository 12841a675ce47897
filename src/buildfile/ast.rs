//! AST definitions for BUILD files
//!
//! This module provides the node types produced by the parser, along with the
//! position type they carry and the utilities that compute it.
//!
//! ## Modules
//!
//! - `span` - The Position type for source code locations
//! - `position` - Conversion from byte offsets to positions
//! - `traits` - The AstNode interface shared by every node
//! - `elements` - The node types
//!
//! Every node is built once by the parser and owned by exactly one parent.
//! Union positions in the grammar are closed enums, so a consumer that
//! matches on them is checked by the compiler when a variant is added.

pub mod elements;
pub mod position;
pub mod span;
pub mod traits;

pub use elements::*;
pub use position::SourceLocation;
pub use span::Position;
pub use traits::AstNode;
