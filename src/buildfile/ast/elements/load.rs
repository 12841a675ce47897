//! `load()` statements and the symbols they import

use serde::Serialize;

use super::super::span::Position;
use super::super::traits::impl_ast_node;

/// A bare imported symbol: the local name is the imported name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "SYMBOL_LOAD")]
pub struct SymbolLoad {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// An aliased import, `identifier = "symbol"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "SYMBOL_RENAME_LOAD")]
pub struct RenamedSymbolLoad {
    /// Local name the symbol is bound to
    pub identifier: String,
    /// Name the symbol has in the loaded file
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SymbolLoadKind {
    Plain(SymbolLoad),
    Renamed(RenamedSymbolLoad),
}

impl SymbolLoadKind {
    pub fn plain(symbol: impl Into<String>) -> Self {
        SymbolLoadKind::Plain(SymbolLoad {
            symbol: symbol.into(),
            position: None,
        })
    }

    pub fn renamed(identifier: impl Into<String>, symbol: impl Into<String>) -> Self {
        SymbolLoadKind::Renamed(RenamedSymbolLoad {
            identifier: identifier.into(),
            symbol: symbol.into(),
            position: None,
        })
    }

    /// The imported name, for both kinds
    pub fn symbol(&self) -> &str {
        match self {
            SymbolLoadKind::Plain(s) => &s.symbol,
            SymbolLoadKind::Renamed(r) => &r.symbol,
        }
    }

    /// The name bound in the loading file
    pub fn local_name(&self) -> &str {
        match self {
            SymbolLoadKind::Plain(s) => &s.symbol,
            SymbolLoadKind::Renamed(r) => &r.identifier,
        }
    }
}

/// One `load("<from>", ...)` import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "LOAD_STATEMENT")]
pub struct LoadStatement {
    /// Dequoted label of the loaded file
    pub from: String,
    pub symbols: Vec<SymbolLoadKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl LoadStatement {
    pub fn new(from: impl Into<String>, symbols: Vec<SymbolLoadKind>) -> Self {
        Self {
            from: from.into(),
            symbols,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

impl_ast_node! {
    SymbolLoad => "SYMBOL_LOAD",
    RenamedSymbolLoad => "SYMBOL_RENAME_LOAD",
    LoadStatement => "LOAD_STATEMENT",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_and_local_name() {
        let plain = SymbolLoadKind::plain("ts_library");
        assert_eq!(plain.symbol(), "ts_library");
        assert_eq!(plain.local_name(), "ts_library");

        let renamed = SymbolLoadKind::renamed("_bar", "some_rule");
        assert_eq!(renamed.symbol(), "some_rule");
        assert_eq!(renamed.local_name(), "_bar");
    }

    #[test]
    fn test_serialized_symbols() {
        let load = LoadStatement::new(
            "@npm//x",
            vec![
                SymbolLoadKind::plain("a"),
                SymbolLoadKind::renamed("b", "c"),
            ],
        );
        let json = serde_json::to_value(&load).unwrap();
        assert_eq!(json["type"], "LOAD_STATEMENT");
        assert_eq!(json["from"], "@npm//x");
        assert_eq!(json["symbols"][0]["type"], "SYMBOL_LOAD");
        assert_eq!(json["symbols"][1]["type"], "SYMBOL_RENAME_LOAD");
        assert_eq!(json["symbols"][1]["identifier"], "b");
    }
}
