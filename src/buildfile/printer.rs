//! Canonical printer for parsed BUILD files
//!
//! The printer is a pure function of the tree: positions and the source
//! layout are never consulted. Load statements are sorted by the label they
//! load from and, inside a statement, by the imported symbol name (not the
//! local alias). Everything else keeps source order.
//!
//! A full print lays the file out in sections separated by one blank line:
//!
//! 1. the load block
//! 2. variable declarations
//! 3. `exports_files()`
//! 4. rules, one blank line between rules
//! 5. `package()`, then `package_group()`
//!
//! Rule attributes print one per line without a trailing comma, because the
//! rule grammar rejects one there. `package()`, `package_group()` and dict
//! entries print with a trailing comma.

mod emitter;

use serde::Deserialize;

use crate::buildfile::ast::{
    ArrayElement, ArrayOrIdentifier, ArrayType, BuildFile, DictOrIdentifier, DictType,
    ExportsFilesDeclaration, GlobNode, Initializer, LoadStatement, Rule, SelectStatement,
    StringOrIdentifier, SymbolLoadKind,
};
use emitter::Emitter;

/// Which part of the tree to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrintScope {
    #[default]
    All,
    /// The load block only
    Loads,
}

/// Printer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub scope: PrintScope,
    /// One level of indentation
    pub indent: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            scope: PrintScope::All,
            indent: "    ".to_string(),
        }
    }
}

/// Render `file` canonically
pub fn print(file: &BuildFile, options: &PrintOptions) -> String {
    match options.scope {
        PrintScope::Loads => print_loads(file),
        PrintScope::All => print_all(file, &options.indent),
    }
}

/// Render the sorted load block, one statement per line
pub fn print_loads(file: &BuildFile) -> String {
    let mut out = Emitter::new("");
    write_loads(&mut out, &file.loads);
    out.finish()
}

fn print_all(file: &BuildFile, indent: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(print_loads(file));

    let mut out = Emitter::new(indent);
    for declaration in &file.declarations {
        out.print(&declaration.identifier);
        out.print(" = ");
        write_value(&mut out, &declaration.initializer);
        out.newline();
    }
    blocks.push(out.finish());

    if let Some(exports) = &file.exports_files {
        let mut out = Emitter::new(indent);
        write_exports_files(&mut out, exports);
        blocks.push(out.finish());
    }

    for rule in &file.rules {
        let mut out = Emitter::new(indent);
        write_rule(&mut out, rule);
        blocks.push(out.finish());
    }

    if let Some(package) = &file.package {
        let mut out = Emitter::new(indent);
        write_call(&mut out, "package", package.entries());
        blocks.push(out.finish());
    }

    if let Some(group) = &file.package_group {
        let mut out = Emitter::new(indent);
        write_call(&mut out, "package_group", group.entries());
        blocks.push(out.finish());
    }

    blocks.retain(|block| !block.is_empty());
    log::debug!("printing {} section(s)", blocks.len());
    blocks.join("\n")
}

fn write_loads(out: &mut Emitter, loads: &[LoadStatement]) {
    let mut sorted: Vec<&LoadStatement> = loads.iter().collect();
    sorted.sort_by(|a, b| a.from.cmp(&b.from));

    for load in sorted {
        let mut symbols: Vec<&SymbolLoadKind> = load.symbols.iter().collect();
        symbols.sort_by(|a, b| a.symbol().cmp(b.symbol()));

        let entries: Vec<String> = symbols
            .into_iter()
            .map(|symbol| match symbol {
                SymbolLoadKind::Plain(plain) => format!("\"{}\"", plain.symbol),
                SymbolLoadKind::Renamed(renamed) => {
                    format!("{} = \"{}\"", renamed.identifier, renamed.symbol)
                }
            })
            .collect();

        out.println(&format!("load(\"{}\", {})", load.from, entries.join(", ")));
    }
}

fn write_rule(out: &mut Emitter, rule: &Rule) {
    if rule.attributes.is_empty() {
        out.println(&format!("{}()", rule.kind));
        return;
    }

    out.println(&format!("{}(", rule.kind));
    out.indent();
    let last = rule.attributes.len() - 1;
    for (i, attribute) in rule.attributes.iter().enumerate() {
        out.print(&attribute.identifier);
        out.print(" = ");
        write_value(out, &attribute.value);
        if i != last {
            out.print(",");
        }
        out.newline();
    }
    out.dedent();
    out.println(")");
}

/// `name(key = value, ...)` with one argument per line and a trailing comma
fn write_call<'a>(
    out: &mut Emitter,
    name: &str,
    args: impl Iterator<Item = (&'static str, &'a Initializer)>,
) {
    let args: Vec<_> = args.collect();
    if args.is_empty() {
        out.println(&format!("{}()", name));
        return;
    }

    out.println(&format!("{}(", name));
    out.indent();
    for (key, value) in args {
        out.print(key);
        out.print(" = ");
        write_value(out, value);
        out.println(",");
    }
    out.dedent();
    out.println(")");
}

fn write_exports_files(out: &mut Emitter, exports: &ExportsFilesDeclaration) {
    out.print("exports_files(");
    write_array_or_identifier(out, &exports.files);
    if let Some(visibility) = &exports.visibility {
        out.print(", visibility = ");
        write_array_or_identifier(out, visibility);
    }
    out.println(")");
}

fn write_value(out: &mut Emitter, value: &Initializer) {
    match value {
        Initializer::String(s) => out.print(&s.raw),
        Initializer::Number(n) => out.print(&n.raw),
        Initializer::Boolean(b) => out.print(&b.raw),
        Initializer::Identifier(i) => out.print(&i.value),
        Initializer::Array(array) => write_array(out, array),
        Initializer::Dict(dict) => write_dict(out, dict),
        Initializer::Select(select) => write_select(out, select),
        Initializer::Glob(glob) => write_glob(out, glob),
    }
}

fn write_array(out: &mut Emitter, array: &ArrayType) {
    let elements: Vec<&str> = array
        .values
        .iter()
        .map(|element| match element {
            ArrayElement::String(s) => s.raw.as_str(),
            ArrayElement::Number(n) => n.raw.as_str(),
            ArrayElement::Boolean(b) => b.raw.as_str(),
            ArrayElement::Identifier(i) => i.value.as_str(),
        })
        .collect();
    out.print(&format!("[{}]", elements.join(", ")));
}

fn write_array_or_identifier(out: &mut Emitter, value: &ArrayOrIdentifier) {
    match value {
        ArrayOrIdentifier::Array(array) => write_array(out, array),
        ArrayOrIdentifier::Identifier(i) => out.print(&i.value),
    }
}

fn write_dict(out: &mut Emitter, dict: &DictType) {
    if dict.values.is_empty() {
        out.print("{}");
        return;
    }

    out.println("{");
    out.indent();
    for entry in &dict.values {
        out.print(&entry.key.raw);
        out.print(": ");
        write_value(out, &entry.value);
        out.println(",");
    }
    out.dedent();
    out.print("}");
}

fn write_glob(out: &mut Emitter, glob: &GlobNode) {
    let mut args = Vec::new();
    if let Some(includes) = &glob.includes {
        args.push(pattern_list(includes));
    }
    if let Some(excludes) = &glob.excludes {
        args.push(format!("exclude = {}", pattern_list(excludes)));
    }
    out.print(&format!("glob({})", args.join(", ")));
}

fn pattern_list(patterns: &[StringOrIdentifier]) -> String {
    let items: Vec<&str> = patterns.iter().map(string_or_identifier).collect();
    format!("[{}]", items.join(", "))
}

fn string_or_identifier(value: &StringOrIdentifier) -> &str {
    match value {
        StringOrIdentifier::String(s) => &s.raw,
        StringOrIdentifier::Identifier(i) => &i.value,
    }
}

fn write_select(out: &mut Emitter, select: &SelectStatement) {
    out.print("select(");
    match &select.constraint {
        DictOrIdentifier::Dict(dict) => write_dict(out, dict),
        DictOrIdentifier::Identifier(i) => out.print(&i.value),
    }
    if let Some(message) = &select.no_match_error {
        out.print(", no_match_error = ");
        out.print(string_or_identifier(message));
    }
    out.print(")");
}
