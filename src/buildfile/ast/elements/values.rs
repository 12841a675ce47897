//! Value nodes: literals, arrays, dicts, `glob()` and `select()`
//!
//! These make up the initializer grammar shared by rule attributes, dict
//! values and variable declarations. Arrays hold a narrower element set than
//! initializers: no nested arrays, dicts, globs or selects.

use serde::Serialize;

use super::super::span::Position;
use super::super::traits::impl_ast_node;

/// A double-quoted string literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "STRING_LITERAL")]
pub struct StringLiteral {
    /// Token image, quotes included
    pub raw: String,
    /// Text between the quotes; escape sequences are kept as written
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl StringLiteral {
    /// Build from a raw token image such as `"foo"`
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = strip_quotes(&raw).to_string();
        Self {
            raw,
            value,
            position: None,
        }
    }

    /// Build from the unquoted text
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            raw: format!("\"{}\"", value),
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

/// Strip the delimiting double quotes from a string token image
pub(crate) fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}

/// A numeric literal; `raw` is what the source said, `value` what it means
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "NUMBER_LITERAL")]
pub struct NumberLiteral {
    pub raw: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NumberLiteral {
    pub fn new(raw: impl Into<String>, value: f64) -> Self {
        Self {
            raw: raw.into(),
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

/// `True` or `False`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "BOOLEAN")]
pub struct Boolean {
    pub raw: String,
    pub value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Boolean {
    pub fn new(value: bool) -> Self {
        Self {
            raw: if value { "True" } else { "False" }.to_string(),
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

/// A bare name: a variable reference, or a name token in some grammar positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "IDENTIFIER_NODE")]
pub struct Identifier {
    pub raw: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            raw: name.clone(),
            value: name,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

/// Anything allowed inside `[ ... ]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayElement {
    String(StringLiteral),
    Number(NumberLiteral),
    Boolean(Boolean),
    Identifier(Identifier),
}

/// `[ ... ]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "ARRAY_TYPE")]
pub struct ArrayType {
    pub values: Vec<ArrayElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ArrayType {
    pub fn new(values: Vec<ArrayElement>) -> Self {
        Self {
            values,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// String element values, skipping other element kinds
    pub fn string_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter_map(|v| match v {
                ArrayElement::String(s) => Some(s.value.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One `"key": value` pair of a dict literal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "DICT_ENTRY_NODE")]
pub struct DictEntry {
    pub key: StringLiteral,
    pub value: Initializer,
}

/// `{ "k": v, ... }`; keys are string literals, values are any initializer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "DICT_TYPE")]
pub struct DictType {
    pub values: Vec<DictEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl DictType {
    pub fn new(values: Vec<DictEntry>) -> Self {
        Self {
            values,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Look up the first entry whose key text matches
    pub fn get(&self, key: &str) -> Option<&Initializer> {
        self.values
            .iter()
            .find(|entry| entry.key.value == key)
            .map(|entry| &entry.value)
    }
}

/// A glob pattern or a `no_match_error` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StringOrIdentifier {
    String(StringLiteral),
    Identifier(Identifier),
}

impl StringOrIdentifier {
    /// The string value or the identifier name
    pub fn text(&self) -> &str {
        match self {
            StringOrIdentifier::String(s) => &s.value,
            StringOrIdentifier::Identifier(i) => &i.value,
        }
    }
}

/// `glob(...)`, recorded without touching the file system
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "GLOB")]
pub struct GlobNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<Vec<StringOrIdentifier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Vec<StringOrIdentifier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl GlobNode {
    pub fn new(
        includes: Option<Vec<StringOrIdentifier>>,
        excludes: Option<Vec<StringOrIdentifier>>,
    ) -> Self {
        Self {
            includes,
            excludes,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Include pattern texts (empty when no include list was given)
    pub fn include_patterns(&self) -> Vec<&str> {
        patterns(&self.includes)
    }

    /// Exclude pattern texts (empty when no exclude list was given)
    pub fn exclude_patterns(&self) -> Vec<&str> {
        patterns(&self.excludes)
    }
}

fn patterns(list: &Option<Vec<StringOrIdentifier>>) -> Vec<&str> {
    list.iter().flatten().map(StringOrIdentifier::text).collect()
}

/// The constraint of a `select()`: an inline dict or a named constant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DictOrIdentifier {
    Dict(DictType),
    Identifier(Identifier),
}

/// `select(...)`; the constraint is recorded, never evaluated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "SELECT_STATEMENT_NODE")]
pub struct SelectStatement {
    pub constraint: DictOrIdentifier,
    #[serde(rename = "noMatchErrorNode", skip_serializing_if = "Option::is_none")]
    pub no_match_error: Option<StringOrIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl SelectStatement {
    pub fn new(constraint: DictOrIdentifier, no_match_error: Option<StringOrIdentifier>) -> Self {
        Self {
            constraint,
            no_match_error,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

/// An array literal or a name bound to one elsewhere
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayOrIdentifier {
    Array(ArrayType),
    Identifier(Identifier),
}

/// The value grammar used by rule attributes, dict values and declarations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Initializer {
    String(StringLiteral),
    Number(NumberLiteral),
    Boolean(Boolean),
    Array(ArrayType),
    Identifier(Identifier),
    Dict(DictType),
    Select(SelectStatement),
    Glob(GlobNode),
}

impl Initializer {
    /// Discriminant of the wrapped node
    pub fn node_type(&self) -> &'static str {
        use super::super::traits::AstNode;
        match self {
            Initializer::String(n) => n.node_type(),
            Initializer::Number(n) => n.node_type(),
            Initializer::Boolean(n) => n.node_type(),
            Initializer::Array(n) => n.node_type(),
            Initializer::Identifier(n) => n.node_type(),
            Initializer::Dict(n) => n.node_type(),
            Initializer::Select(n) => n.node_type(),
            Initializer::Glob(n) => n.node_type(),
        }
    }

    pub fn as_string(&self) -> Option<&StringLiteral> {
        match self {
            Initializer::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberLiteral> {
        match self {
            Initializer::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&Boolean> {
        match self {
            Initializer::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Initializer::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Initializer::Identifier(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&DictType> {
        match self {
            Initializer::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&SelectStatement> {
        match self {
            Initializer::Select(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_glob(&self) -> Option<&GlobNode> {
        match self {
            Initializer::Glob(g) => Some(g),
            _ => None,
        }
    }
}

impl_ast_node! {
    StringLiteral => "STRING_LITERAL",
    NumberLiteral => "NUMBER_LITERAL",
    Boolean => "BOOLEAN",
    Identifier => "IDENTIFIER_NODE",
    ArrayType => "ARRAY_TYPE",
    DictType => "DICT_TYPE",
    GlobNode => "GLOB",
    SelectStatement => "SELECT_STATEMENT_NODE",
}
