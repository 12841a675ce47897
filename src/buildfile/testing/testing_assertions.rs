//! Fluent assertion API for BUILD trees

use super::testing_matchers::TextMatch;
use crate::buildfile::ast::{
    ArrayElement, ArrayOrIdentifier, BuildFile, DictOrIdentifier, DictType, ExportsFilesDeclaration,
    GlobNode, Initializer, LoadStatement, PackageGroupDeclaration, Rule,
    SelectStatement, StringOrIdentifier, VariableDeclaration,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a parsed file
pub fn assert_build(file: &BuildFile) -> BuildFileAssertion<'_> {
    BuildFileAssertion { file }
}

fn summarize_rules(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(|r| match r.name() {
            Some(name) => format!("{}({})", r.kind, name),
            None => r.kind.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn element_text(element: &ArrayElement) -> String {
    match element {
        ArrayElement::String(s) => s.value.clone(),
        ArrayElement::Number(n) => n.raw.clone(),
        ArrayElement::Boolean(b) => b.raw.clone(),
        ArrayElement::Identifier(i) => i.value.clone(),
    }
}

fn texts(values: &[StringOrIdentifier]) -> Vec<&str> {
    values.iter().map(StringOrIdentifier::text).collect()
}

// ============================================================================
// BuildFile Assertions
// ============================================================================

pub struct BuildFileAssertion<'a> {
    file: &'a BuildFile,
}

impl<'a> BuildFileAssertion<'a> {
    pub fn load_count(self, expected: usize) -> Self {
        let actual = self.file.loads.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} loads, found {}: {:?}",
            expected,
            actual,
            self.file.loads.iter().map(|l| l.from.as_str()).collect::<Vec<_>>()
        );
        self
    }

    pub fn load<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(LoadAssertion<'a>),
    {
        let load = self.file.loads.get(index).unwrap_or_else(|| {
            panic!(
                "Load index {} out of bounds (file has {} loads)",
                index,
                self.file.loads.len()
            )
        });
        assertion(LoadAssertion {
            load,
            context: format!("loads[{}]", index),
        });
        self
    }

    pub fn rule_count(self, expected: usize) -> Self {
        let actual = self.file.rules.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} rules, found {}: [{}]",
            expected,
            actual,
            summarize_rules(&self.file.rules)
        );
        self
    }

    pub fn rule<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(RuleAssertion<'a>),
    {
        let rule = self.file.rules.get(index).unwrap_or_else(|| {
            panic!(
                "Rule index {} out of bounds (file has rules [{}])",
                index,
                summarize_rules(&self.file.rules)
            )
        });
        assertion(RuleAssertion {
            rule,
            context: format!("rules[{}]", index),
        });
        self
    }

    pub fn declaration_count(self, expected: usize) -> Self {
        let actual = self.file.declarations.len();
        assert_eq!(
            actual, expected,
            "Expected {} declarations, found {}",
            expected, actual
        );
        self
    }

    pub fn declaration<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(DeclarationAssertion<'a>),
    {
        let declaration = self.file.declarations.get(index).unwrap_or_else(|| {
            panic!(
                "Declaration index {} out of bounds (file has {} declarations)",
                index,
                self.file.declarations.len()
            )
        });
        assertion(DeclarationAssertion {
            declaration,
            context: format!("declarations[{}]", index),
        });
        self
    }

    pub fn package<F>(self, assertion: F) -> Self
    where
        F: FnOnce(PackageAssertion<'a>),
    {
        let package = self
            .file
            .package
            .as_ref()
            .unwrap_or_else(|| panic!("Expected a package() declaration, found none"));
        assertion(PackageAssertion {
            slots: package.entries().collect(),
            context: "package".to_string(),
        });
        self
    }

    pub fn package_group<F>(self, assertion: F) -> Self
    where
        F: FnOnce(PackageAssertion<'a>),
    {
        let group: &'a PackageGroupDeclaration = self
            .file
            .package_group
            .as_ref()
            .unwrap_or_else(|| panic!("Expected a package_group() declaration, found none"));
        assertion(PackageAssertion {
            slots: group.entries().collect(),
            context: "package_group".to_string(),
        });
        self
    }

    pub fn no_package(self) -> Self {
        assert!(
            self.file.package.is_none(),
            "Expected no package(), found {:?}",
            self.file.package
        );
        self
    }

    pub fn exports_files<F>(self, assertion: F) -> Self
    where
        F: FnOnce(&'a ExportsFilesDeclaration),
    {
        let exports = self
            .file
            .exports_files
            .as_ref()
            .unwrap_or_else(|| panic!("Expected an exports_files() declaration, found none"));
        assertion(exports);
        self
    }
}

// ============================================================================
// Load Assertions
// ============================================================================

pub struct LoadAssertion<'a> {
    load: &'a LoadStatement,
    context: String,
}

impl<'a> LoadAssertion<'a> {
    pub fn from(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.load.from, &self.context);
        self
    }

    /// Imported names, in source order
    pub fn symbols(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.load.symbols.iter().map(|s| s.symbol()).collect();
        assert_eq!(actual, expected, "{}: symbols differ", self.context);
        self
    }

    /// Names bound in the loading file, in source order
    pub fn local_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.load.symbols.iter().map(|s| s.local_name()).collect();
        assert_eq!(actual, expected, "{}: local names differ", self.context);
        self
    }
}

// ============================================================================
// Rule Assertions
// ============================================================================

pub struct RuleAssertion<'a> {
    rule: &'a Rule,
    context: String,
}

impl<'a> RuleAssertion<'a> {
    pub fn kind(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.rule.kind, &self.context);
        self
    }

    /// The string value of the `name` attribute
    pub fn name(self, expected: &str) -> Self {
        let actual = self.rule.name().unwrap_or_else(|| {
            panic!("{}: rule has no string `name` attribute", self.context)
        });
        TextMatch::Exact(expected.to_string()).assert(actual, &self.context);
        self
    }

    pub fn attribute_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .rule
            .attributes
            .iter()
            .map(|a| a.identifier.as_str())
            .collect();
        assert_eq!(actual, expected, "{}: attribute names differ", self.context);
        self
    }

    pub fn attribute<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let attribute = self.rule.attributes.get(index).unwrap_or_else(|| {
            panic!(
                "{}: attribute index {} out of bounds (rule has {} attributes)",
                self.context,
                index,
                self.rule.attributes.len()
            )
        });
        assertion(ValueAssertion {
            value: &attribute.value,
            context: format!("{}.attributes[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Declaration Assertions
// ============================================================================

pub struct DeclarationAssertion<'a> {
    declaration: &'a VariableDeclaration,
    context: String,
}

impl<'a> DeclarationAssertion<'a> {
    pub fn identifier(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.declaration.identifier, &self.context);
        self
    }

    pub fn value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        assertion(ValueAssertion {
            value: &self.declaration.initializer,
            context: format!("{}.initializer", self.context),
        });
        self
    }
}

// ============================================================================
// Package Assertions
// ============================================================================

/// Shared by `package()` and `package_group()`, which both hold named slots
pub struct PackageAssertion<'a> {
    slots: Vec<(&'static str, &'a Initializer)>,
    context: String,
}

impl<'a> PackageAssertion<'a> {
    /// Filled slots, in canonical order
    pub fn slots(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.slots.iter().map(|(k, _)| *k).collect();
        assert_eq!(actual, expected, "{}: filled slots differ", self.context);
        self
    }

    pub fn slot<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let value = self
            .slots
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or_else(|| panic!("{}: slot `{}` is not set", self.context, key));
        assertion(ValueAssertion {
            value,
            context: format!("{}.{}", self.context, key),
        });
        self
    }
}

// ============================================================================
// Value Assertions
// ============================================================================

pub struct ValueAssertion<'a> {
    value: &'a Initializer,
    context: String,
}

impl<'a> ValueAssertion<'a> {
    fn wrong_kind(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.value.node_type()
        )
    }

    pub fn string(self, expected: &str) -> Self {
        match self.value {
            Initializer::String(s) => {
                TextMatch::Exact(expected.to_string()).assert(&s.value, &self.context)
            }
            _ => self.wrong_kind("STRING_LITERAL"),
        }
        self
    }

    pub fn string_starts_with(self, prefix: &str) -> Self {
        match self.value {
            Initializer::String(s) => {
                TextMatch::StartsWith(prefix.to_string()).assert(&s.value, &self.context)
            }
            _ => self.wrong_kind("STRING_LITERAL"),
        }
        self
    }

    pub fn number(self, expected: f64) -> Self {
        match self.value {
            Initializer::Number(n) => assert_eq!(
                n.value, expected,
                "{}: Expected {}, found {}",
                self.context, expected, n.raw
            ),
            _ => self.wrong_kind("NUMBER_LITERAL"),
        }
        self
    }

    pub fn boolean(self, expected: bool) -> Self {
        match self.value {
            Initializer::Boolean(b) => assert_eq!(b.value, expected, "{}", self.context),
            _ => self.wrong_kind("BOOLEAN"),
        }
        self
    }

    pub fn identifier(self, expected: &str) -> Self {
        match self.value {
            Initializer::Identifier(i) => {
                TextMatch::Exact(expected.to_string()).assert(&i.value, &self.context)
            }
            _ => self.wrong_kind("IDENTIFIER_NODE"),
        }
        self
    }

    /// Array elements rendered as text: string values, raw numbers and
    /// booleans, identifier names
    pub fn array(self, expected: &[&str]) -> Self {
        match self.value {
            Initializer::Array(a) => {
                let actual: Vec<String> = a.values.iter().map(element_text).collect();
                assert_eq!(actual, expected, "{}: array elements differ", self.context);
            }
            _ => self.wrong_kind("ARRAY_TYPE"),
        }
        self
    }

    pub fn assert_glob(self) -> GlobAssertion<'a> {
        match self.value {
            Initializer::Glob(glob) => GlobAssertion {
                glob,
                context: self.context,
            },
            _ => self.wrong_kind("GLOB"),
        }
    }

    pub fn assert_select(self) -> SelectAssertion<'a> {
        match self.value {
            Initializer::Select(select) => SelectAssertion {
                select,
                context: self.context,
            },
            _ => self.wrong_kind("SELECT_STATEMENT_NODE"),
        }
    }

    pub fn assert_dict(self) -> DictAssertion<'a> {
        match self.value {
            Initializer::Dict(dict) => DictAssertion {
                dict,
                context: self.context,
            },
            _ => self.wrong_kind("DICT_TYPE"),
        }
    }
}

// ============================================================================
// Glob / Select / Dict Assertions
// ============================================================================

pub struct GlobAssertion<'a> {
    glob: &'a GlobNode,
    context: String,
}

impl<'a> GlobAssertion<'a> {
    pub fn includes(self, expected: &[&str]) -> Self {
        let actual = self.glob.includes.as_deref().map(texts);
        assert_eq!(actual, Some(expected.to_vec()), "{}: includes differ", self.context);
        self
    }

    pub fn excludes(self, expected: &[&str]) -> Self {
        let actual = self.glob.excludes.as_deref().map(texts);
        assert_eq!(actual, Some(expected.to_vec()), "{}: excludes differ", self.context);
        self
    }

    pub fn no_includes(self) -> Self {
        assert!(self.glob.includes.is_none(), "{}: includes are set", self.context);
        self
    }

    pub fn no_excludes(self) -> Self {
        assert!(self.glob.excludes.is_none(), "{}: excludes are set", self.context);
        self
    }
}

pub struct SelectAssertion<'a> {
    select: &'a SelectStatement,
    context: String,
}

impl<'a> SelectAssertion<'a> {
    /// The constraint is a named constant
    pub fn constraint_identifier(self, expected: &str) -> Self {
        match &self.select.constraint {
            DictOrIdentifier::Identifier(i) => {
                TextMatch::Exact(expected.to_string()).assert(&i.value, &self.context)
            }
            DictOrIdentifier::Dict(_) => {
                panic!("{}: Expected identifier constraint, found dict", self.context)
            }
        }
        self
    }

    /// The constraint is an inline dict with these keys, in order
    pub fn constraint_keys(self, expected: &[&str]) -> Self {
        match &self.select.constraint {
            DictOrIdentifier::Dict(dict) => {
                let keys: Vec<&str> = dict.values.iter().map(|e| e.key.value.as_str()).collect();
                assert_eq!(keys, expected, "{}: constraint keys differ", self.context);
            }
            DictOrIdentifier::Identifier(i) => panic!(
                "{}: Expected dict constraint, found identifier '{}'",
                self.context, i.value
            ),
        }
        self
    }

    pub fn no_match_error(self, expected: Option<&str>) -> Self {
        let actual = self.select.no_match_error.as_ref().map(StringOrIdentifier::text);
        assert_eq!(actual, expected, "{}: no_match_error differs", self.context);
        self
    }
}

pub struct DictAssertion<'a> {
    dict: &'a DictType,
    context: String,
}

impl<'a> DictAssertion<'a> {
    pub fn keys(self, expected: &[&str]) -> Self {
        let keys: Vec<&str> = self.dict.values.iter().map(|e| e.key.value.as_str()).collect();
        assert_eq!(keys, expected, "{}: keys differ", self.context);
        self
    }

    pub fn value<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let value = self
            .dict
            .get(key)
            .unwrap_or_else(|| panic!("{}: no entry for key '{}'", self.context, key));
        assertion(ValueAssertion {
            value,
            context: format!("{}[\"{}\"]", self.context, key),
        });
        self
    }
}

/// Files named by an `exports_files()` array, for use inside
/// [`BuildFileAssertion::exports_files`]
pub fn exported_files(exports: &ExportsFilesDeclaration) -> Vec<&str> {
    match &exports.files {
        ArrayOrIdentifier::Array(array) => array.string_values(),
        ArrayOrIdentifier::Identifier(i) => vec![i.value.as_str()],
    }
}
