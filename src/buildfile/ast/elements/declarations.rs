//! Top-level declarations: variables, `package()`, `package_group()` and
//! `exports_files()`
//!
//! `package()` and `package_group()` only keep a fixed set of named slots.
//! Any other argument is accepted by the parser and dropped without a
//! diagnostic.

use serde::Serialize;

use super::super::span::Position;
use super::super::traits::impl_ast_node;
use super::values::{ArrayOrIdentifier, Initializer};

/// `NAME = value` at the top level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "VARIABLE_DECLARATION")]
pub struct VariableDeclaration {
    pub identifier: String,
    pub initializer: Initializer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl VariableDeclaration {
    pub fn new(identifier: impl Into<String>, initializer: Initializer) -> Self {
        Self {
            identifier: identifier.into(),
            initializer,
            position: None,
        }
    }
}

/// `package(...)`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "PACKAGE_DECLARATION", rename_all = "camelCase")]
pub struct PackageDeclaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_visibility: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_deprecation: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_testonly: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl PackageDeclaration {
    /// Argument names that fill a slot, in canonical order
    pub const KEYS: [&'static str; 4] = [
        "default_visibility",
        "default_deprecation",
        "default_testonly",
        "features",
    ];

    /// Store an argument; returns false when the name has no slot
    pub fn set(&mut self, key: &str, value: Initializer) -> bool {
        let slot = match key {
            "default_visibility" => &mut self.default_visibility,
            "default_deprecation" => &mut self.default_deprecation,
            "default_testonly" => &mut self.default_testonly,
            "features" => &mut self.features,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Slot value by argument name
    pub fn get(&self, key: &str) -> Option<&Initializer> {
        match key {
            "default_visibility" => self.default_visibility.as_ref(),
            "default_deprecation" => self.default_deprecation.as_ref(),
            "default_testonly" => self.default_testonly.as_ref(),
            "features" => self.features.as_ref(),
            _ => None,
        }
    }

    /// Filled slots in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Initializer)> {
        Self::KEYS
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

/// `package_group(...)`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "PACKAGE_GROUP_DECLARATION")]
pub struct PackageGroupDeclaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<Initializer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl PackageGroupDeclaration {
    pub const KEYS: [&'static str; 3] = ["name", "packages", "includes"];

    /// Store an argument; returns false when the name has no slot
    pub fn set(&mut self, key: &str, value: Initializer) -> bool {
        let slot = match key {
            "name" => &mut self.name,
            "packages" => &mut self.packages,
            "includes" => &mut self.includes,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Initializer> {
        match key {
            "name" => self.name.as_ref(),
            "packages" => self.packages.as_ref(),
            "includes" => self.includes.as_ref(),
            _ => None,
        }
    }

    /// Filled slots in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Initializer)> {
        Self::KEYS
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

/// `exports_files(files, visibility = ...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "EXPORTS_FILES_DECLARATION")]
pub struct ExportsFilesDeclaration {
    pub files: ArrayOrIdentifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ArrayOrIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ExportsFilesDeclaration {
    pub fn new(files: ArrayOrIdentifier, visibility: Option<ArrayOrIdentifier>) -> Self {
        Self {
            files,
            visibility,
            position: None,
        }
    }
}

impl_ast_node! {
    VariableDeclaration => "VARIABLE_DECLARATION",
    PackageDeclaration => "PACKAGE_DECLARATION",
    PackageGroupDeclaration => "PACKAGE_GROUP_DECLARATION",
    ExportsFilesDeclaration => "EXPORTS_FILES_DECLARATION",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildfile::ast::{Boolean, StringLiteral};

    #[test]
    fn test_package_slots() {
        let mut package = PackageDeclaration::default();
        assert!(package.set("features", Initializer::String(StringLiteral::new("x"))));
        assert!(package.set("default_testonly", Initializer::Boolean(Boolean::new(true))));
        assert!(!package.set("licenses", Initializer::Boolean(Boolean::new(true))));

        let keys: Vec<_> = package.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["default_testonly", "features"]);
    }

    #[test]
    fn test_package_last_assignment_wins() {
        let mut package = PackageDeclaration::default();
        package.set("features", Initializer::String(StringLiteral::new("a")));
        package.set("features", Initializer::String(StringLiteral::new("b")));
        assert_eq!(
            package.features,
            Some(Initializer::String(StringLiteral::new("b")))
        );
    }

    #[test]
    fn test_package_group_slots() {
        let mut group = PackageGroupDeclaration::default();
        assert!(group.set("packages", Initializer::String(StringLiteral::new("//a/..."))));
        assert!(!group.set("visibility", Initializer::String(StringLiteral::new("x"))));
        assert!(group.get("packages").is_some());
        assert!(group.get("name").is_none());
    }

    #[test]
    fn test_package_serializes_camel_case() {
        let mut package = PackageDeclaration::default();
        package.set("default_visibility", Initializer::String(StringLiteral::new("v")));
        let json = serde_json::to_value(&package).unwrap();
        assert_eq!(json["type"], "PACKAGE_DECLARATION");
        assert_eq!(json["defaultVisibility"]["value"], "v");
    }
}
