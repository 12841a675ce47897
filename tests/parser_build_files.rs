//! Whole-file parsing through the crate root API

use buildfile::buildfile::processor::samples::BuildSources;
use buildfile::buildfile::testing::assert_build;
use buildfile::buildfile::ErrorKind;
use buildfile::{format, parse, Error};

#[test]
fn test_parse_is_independent_across_threads() {
    let handles: Vec<_> = BuildSources::list_samples()
        .into_iter()
        .map(|name| {
            let source = BuildSources::get_string(name).unwrap();
            std::thread::spawn(move || (format(&source).unwrap(), format(&source).unwrap()))
        })
        .collect();

    for handle in handles {
        let (first, second) = handle.join().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_contextual_keywords_as_variable_names() {
    let file = parse("include = [\"a\"]\nno_match_error = \"x\"\nX = include\n").unwrap();
    assert_build(&file)
        .declaration_count(3)
        .declaration(0, |decl| {
            decl.identifier("include").value(|v| {
                v.array(&["a"]);
            });
        })
        .declaration(2, |decl| {
            decl.value(|v| {
                v.identifier("include");
            });
        });
}

#[test]
fn test_format_concatenates_every_diagnostic() {
    let err = format("x = )\ny = ]\n").unwrap_err();
    match &err {
        Error::Parse(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().all(|e| e.kind == ErrorKind::Syntax));
        }
        other => panic!("expected parse errors, got {other:?}"),
    }
    let message = err.to_string();
    assert_eq!(message.lines().count(), 2);
    assert!(message.starts_with("syntax error at 1:5"), "{}", message);
}

#[test]
fn test_lexical_errors_are_fatal() {
    let errors = parse("x = 1\ny = 'z'\n").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind, ErrorKind::Lexical);
    assert_eq!(errors[0].position.map(|p| (p.line, p.column)), Some((2, 5)));
}

#[test]
fn test_empty_and_whitespace_sources() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse(" \n\t\r\n").unwrap().is_empty());
    assert_eq!(format("\n\n").unwrap(), "");
}
