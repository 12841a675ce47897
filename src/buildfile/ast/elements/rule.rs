//! Rule invocations such as `ts_library(name = "foo", ...)`

use serde::Serialize;

use super::super::span::Position;
use super::super::traits::impl_ast_node;
use super::values::Initializer;

/// One `name = value` pair inside a rule call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "RULE_ATTRIBUTE")]
pub struct RuleAttribute {
    pub identifier: String,
    pub value: Initializer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl RuleAttribute {
    pub fn new(identifier: impl Into<String>, value: Initializer) -> Self {
        Self {
            identifier: identifier.into(),
            value,
            position: None,
        }
    }
}

/// A rule invocation. Attributes keep source order and duplicates are kept:
/// nothing here decides which of two `deps` wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "RULE")]
pub struct Rule {
    pub kind: String,
    pub attributes: Vec<RuleAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, attributes: Vec<RuleAttribute>) -> Self {
        Self {
            kind: kind.into(),
            attributes,
            position: None,
        }
    }

    /// All attributes with the given name, in source order
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RuleAttribute> {
        self.attributes.iter().filter(move |a| a.identifier == name)
    }

    /// The `name` attribute when it is a plain string
    pub fn name(&self) -> Option<&str> {
        self.attributes_named("name")
            .next()
            .and_then(|a| a.value.as_string())
            .map(|s| s.value.as_str())
    }
}

impl_ast_node! {
    RuleAttribute => "RULE_ATTRIBUTE",
    Rule => "RULE",
}
