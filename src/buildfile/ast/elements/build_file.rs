//! BuildFile element definition
//!
//! The root of one parsed source unit. It owns every other node; the tree has
//! no shared or back references.

use serde::Serialize;

use super::declarations::{
    ExportsFilesDeclaration, PackageDeclaration, PackageGroupDeclaration, VariableDeclaration,
};
use super::load::LoadStatement;
use super::rule::Rule;
use super::super::span::Position;
use super::super::traits::impl_ast_node;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "BUILD_FILE", rename_all = "camelCase")]
pub struct BuildFile {
    pub loads: Vec<LoadStatement>,
    pub rules: Vec<Rule>,
    pub declarations: Vec<VariableDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_group: Option<PackageGroupDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports_files: Option<ExportsFilesDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl BuildFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// First rule whose `name` attribute matches
    pub fn find_rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == Some(name))
    }

    /// Variable declaration by identifier (the last one, if redeclared)
    pub fn find_declaration(&self, identifier: &str) -> Option<&VariableDeclaration> {
        self.declarations
            .iter()
            .rev()
            .find(|decl| decl.identifier == identifier)
    }

    /// Local names bound by the load statements, in source order
    pub fn loaded_symbols(&self) -> Vec<&str> {
        self.loads
            .iter()
            .flat_map(|load| load.symbols.iter().map(|s| s.local_name()))
            .collect()
    }

    /// True when nothing was parsed
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
            && self.rules.is_empty()
            && self.declarations.is_empty()
            && self.package.is_none()
            && self.package_group.is_none()
            && self.exports_files.is_none()
    }
}

impl_ast_node! {
    BuildFile => "BUILD_FILE",
}
