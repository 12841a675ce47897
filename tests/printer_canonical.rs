//! Canonical printer tests: sample snapshots and ordering properties

use buildfile::buildfile::printer::print_loads;
use buildfile::buildfile::processor::samples::BuildSources;
use buildfile::buildfile::{format, format_with, parse, ParseOptions, PrintOptions, PrintScope};
use proptest::prelude::*;

fn format_sample(name: &str) -> String {
    let source = BuildSources::get_string(name).unwrap();
    format(&source).unwrap()
}

#[test]
fn test_ts_library_sample() {
    insta::assert_snapshot!(format_sample("010-ts-library.BUILD"), @r###"
load("@npm//@angular/bazel", "ng_module")
load("@npm//@bazel/typescript", _bar = "some_rule", "ts_library")

VALUE = True
VALUE_ONE = glob(["**/*.ts", VALUE], exclude = [])

exports_files(["ts"])

ts_library(
    name = "foo",
    foo = VALUE,
    srcs = ["main.ts", SOME_VAR],
    linting = True,
    auto_deps = 0,
    deps = 1,
    num = 123409876,
    deps = glob(["**/*.ts"], exclude = [])
)

_bar(
    name = "sheep"
)
"###);
}

#[test]
fn test_package_sample() {
    insta::assert_snapshot!(format_sample("040-package.BUILD"), @r###"
load("@rules_pkg//:pkg.bzl", "pkg_tar")

SRCS = glob(["**/*.txt"], exclude = ["tmp/**"])

exports_files(["LICENSE", "README.md"], visibility = ["//visibility:public"])

pkg_tar(
    name = "docs",
    srcs = SRCS,
    mode = "0644"
)

package(
    default_visibility = ["//visibility:private"],
    default_testonly = False,
)

package_group(
    name = "friends",
    packages = ["//app/...", "//lib/..."],
)
"###);
}

#[test]
fn test_canonical_sample_is_a_fixed_point() {
    let source = BuildSources::get_string("030-select.BUILD").unwrap();
    assert_eq!(format(&source).unwrap(), source);
}

#[test]
fn test_every_sample_formats_idempotently() {
    for sample in BuildSources::list_samples() {
        let once = format_sample(sample);
        let twice = format(&once).unwrap();
        assert_eq!(once, twice, "{} is not stable under formatting", sample);
    }
}

#[test]
fn test_loads_sorted_by_label() {
    let out = format("load(\"b\", \"y\")\nload(\"a\", \"x\")\nload(\"c\", \"z\")").unwrap();
    assert_eq!(
        out,
        "load(\"a\", \"x\")\nload(\"b\", \"y\")\nload(\"c\", \"z\")\n"
    );
}

#[test]
fn test_renamed_symbol_sorts_by_imported_name() {
    let out = format("load(\"x\", z = \"alpha\", \"beta\")").unwrap();
    assert_eq!(out, "load(\"x\", z = \"alpha\", \"beta\")\n");

    let out = format("load(\"x\", \"beta\", a = \"gamma\")").unwrap();
    assert_eq!(out, "load(\"x\", \"beta\", a = \"gamma\")\n");
}

#[test]
fn test_loads_scope() {
    let options = PrintOptions {
        scope: PrintScope::Loads,
        ..PrintOptions::default()
    };
    let out = format_with(
        "load(\"b\", \"y\")\nr(name = \"x\")\n",
        &ParseOptions::default(),
        &options,
    )
    .unwrap();
    assert_eq!(out, "load(\"b\", \"y\")\n");
}

#[test]
fn test_custom_indent() {
    let options = PrintOptions {
        indent: "\t".to_string(),
        ..PrintOptions::default()
    };
    let out = format_with(
        "r(name = \"x\", data = {\"k\": 1})",
        &ParseOptions::default(),
        &options,
    )
    .unwrap();
    insta::assert_snapshot!(out, @r###"
r(
	name = "x",
	data = {
		"k": 1,
	}
)
"###);
}

#[derive(Debug, Clone)]
struct LoadSpec {
    from: String,
    symbols: Vec<(String, Option<String>)>,
}

impl LoadSpec {
    fn source(&self) -> String {
        let symbols: Vec<String> = self
            .symbols
            .iter()
            .map(|(symbol, alias)| match alias {
                Some(alias) => format!("{} = \"{}\"", alias, symbol),
                None => format!("\"{}\"", symbol),
            })
            .collect();
        format!("load(\"{}\", {})", self.from, symbols.join(", "))
    }
}

fn load_spec() -> impl Strategy<Value = LoadSpec> {
    (
        "[a-z@/:]{1,10}",
        prop::collection::btree_map("[a-z]{1,6}", prop::option::of("_[a-z]{1,4}"), 0..5),
    )
        .prop_flat_map(|(from, symbols)| {
            let symbols: Vec<(String, Option<String>)> = symbols.into_iter().collect();
            Just(symbols)
                .prop_shuffle()
                .prop_map(move |symbols| LoadSpec {
                    from: from.clone(),
                    symbols,
                })
        })
}

fn load_block() -> impl Strategy<Value = (Vec<LoadSpec>, Vec<LoadSpec>)> {
    prop::collection::vec(load_spec(), 0..6)
        .prop_map(|mut loads| {
            loads.sort_by(|a, b| a.from.cmp(&b.from));
            loads.dedup_by(|a, b| a.from == b.from);
            loads
        })
        .prop_flat_map(|loads| (Just(loads.clone()), Just(loads).prop_shuffle()))
}

fn source_of(loads: &[LoadSpec]) -> String {
    loads
        .iter()
        .map(LoadSpec::source)
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn load_order_does_not_change_output((original, shuffled) in load_block()) {
        let a = parse(&source_of(&original)).unwrap();
        let b = parse(&source_of(&shuffled)).unwrap();
        prop_assert_eq!(print_loads(&a), print_loads(&b));
    }

    #[test]
    fn printed_loads_reparse_to_the_same_output((loads, _) in load_block()) {
        let file = parse(&source_of(&loads)).unwrap();
        let printed = print_loads(&file);
        let reparsed = parse(&printed).unwrap();
        prop_assert_eq!(reparsed.loads.len(), file.loads.len());
        prop_assert_eq!(print_loads(&reparsed), printed.clone());
        prop_assert_eq!(print_loads(&file), printed);
    }

    #[test]
    fn printed_labels_are_sorted((loads, _) in load_block()) {
        let file = parse(&source_of(&loads)).unwrap();
        let reparsed = parse(&print_loads(&file)).unwrap();
        let labels: Vec<&str> = reparsed.loads.iter().map(|l| l.from.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        prop_assert_eq!(labels, sorted);
    }
}
