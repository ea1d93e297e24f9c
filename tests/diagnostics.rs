//! Malformed input must produce diagnostics, never a panic

mod common;

use common::assertions::*;
use sysl::parser::{parse_rule, parse_with_diagnostics, Rule, Stage};

#[test]
fn test_missing_declaration_colon() {
    let diagnostics = assert_parse_fails("App:\n  !table Employee\n    id <: int\n");
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.stage, Stage::Syntax);
    assert_eq!(d.rule, Some(Rule::Declaration));
    assert_eq!((d.line, d.column), (3, 5));
    assert_eq!(
        d.to_string(),
        "[3:5] SyntaxError: expected ':', found lowercase identifier 'id'"
    );
}

#[test]
fn test_unrecognized_symbol() {
    let diagnostics = assert_parse_fails("App:\n  !table T:\n    id <: int; \n");
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.stage, Stage::Lexical);
    assert_eq!((d.line, d.column), (3, 14));
    assert_eq!(d.to_string(), "[3:14] LexicalError: unrecognized input ';'");
}

#[test]
fn test_lexical_and_syntax_errors_are_both_kept() {
    let parsed = parse_with_diagnostics("App $:\n  /x FETCH:\n");
    let stages: Vec<Stage> = parsed.diagnostics.iter().map(|d| d.stage).collect();
    assert_eq!(stages, vec![Stage::Lexical, Stage::Syntax]);
    let syntax = parsed.diagnostics.iter().nth(1).unwrap();
    assert_eq!(syntax.rule, Some(Rule::Endpoint));
    assert!(syntax.message.contains("HTTP method"));
}

#[test]
fn test_every_lexical_error_is_reported() {
    let parsed = parse_with_diagnostics("A:\n  /x GET: $\n  /y PUT: %\n");
    assert_eq!(parsed.diagnostics.len(), 2);
    assert!(parsed.diagnostics.iter().all(|d| d.stage == Stage::Lexical));
}

#[test]
fn test_trailing_comma_is_rejected() {
    let diagnostics = assert_parse_fails("App [package=\"x\",]:\n");
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.rule, Some(Rule::Attribute));
}

#[test]
fn test_unknown_type() {
    let diagnostics = assert_parse_fails("App:\n  !table T:\n    id <: :\n");
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.rule, Some(Rule::TypeRef));
    assert!(d.message.starts_with("expected a type"));
}

#[test]
fn test_stray_field_at_application_level() {
    let diagnostics = assert_parse_fails("App:\n  /x GET:\n  id <: int\n");
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.rule, Some(Rule::Application));
    assert_eq!((d.line, d.column), (3, 3));
}

#[test]
fn test_enum_value_out_of_range() {
    let diagnostics = assert_parse_fails("App:\n  !enum E:\n    big: 99999999999999999999\n");
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.rule, Some(Rule::EnumItem));
    assert!(d.message.contains("out of range"));
}

#[test]
fn test_unexpected_end_of_file() {
    let diagnostics = parse_rule("employeeId <:", Rule::Field).unwrap_err();
    let d = diagnostics.iter().next().unwrap();
    assert!(d.message.ends_with("found end of file"));
}

#[test]
fn test_garbage_never_panics() {
    let inputs = [
        "",
        ":",
        "[[[[",
        "!table",
        "A: !enum E: x:",
        "\"unterminated",
        "A:\n  /p GET [x=]:\n",
        "é ñ ü",
        "A:\n\t!type T:\n\t\tf <: Foo.bar.baz? [~, pk]\n",
    ];
    for input in inputs {
        let _ = parse_with_diagnostics(input);
        for rule in Rule::ALL {
            let _ = parse_rule(input, rule);
        }
    }
}
