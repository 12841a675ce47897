//! AST traits - Common interfaces for uniform node access

use super::span::Position;

/// Common interface for all AST nodes
pub trait AstNode {
    /// The node's discriminant, matching the `type` field of the JSON dump
    fn node_type(&self) -> &'static str;

    /// Where the node starts in the source, when the producer recorded it
    fn position(&self) -> Option<Position>;
}

/// Implements [`AstNode`] for node structs that carry a `position` field
macro_rules! impl_ast_node {
    ($($node:ty => $name:literal),* $(,)?) => {
        $(
            impl $crate::buildfile::ast::traits::AstNode for $node {
                fn node_type(&self) -> &'static str {
                    $name
                }

                fn position(&self) -> Option<$crate::buildfile::ast::span::Position> {
                    self.position
                }
            }
        )*
    };
}

pub(crate) use impl_ast_node;
