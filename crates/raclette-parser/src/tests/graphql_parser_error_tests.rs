//! Tests for parse errors and error recovery.

use crate::GraphQLParseErrorKind;
use crate::InvalidValueReason;
use crate::tests::utils::parse_executable;
use crate::tests::utils::parse_schema;

#[test]
fn unexpected_token_reports_position_and_expectation() {
    let result = parse_executable("query Q { recipe(id 1) }\nquery R { cheese }");
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.message(), "Expected `:`, found `1`");
    assert_eq!((error.line(), error.column()), (1, 21));
    assert!(matches!(
        error.kind(),
        GraphQLParseErrorKind::UnexpectedToken { found, .. } if found == "`1`"
    ));
    assert_eq!(error.to_string(), "1:21: error: Expected `:`, found `1`");
    assert_eq!(result.ast().map(|doc| doc.definitions.len()), Some(1));
}

#[test]
fn empty_selection_set_is_an_error() {
    let result = parse_executable("{ recipe { } }");
    assert!(matches!(
        result.errors[0].kind(),
        GraphQLParseErrorKind::InvalidEmptyConstruct { construct } if construct == "selection set"
    ));
}

#[test]
fn unclosed_brace_points_back_at_the_opening() {
    let result = parse_executable("{\n  recipe {\n    name\n");
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert!(matches!(
        error.kind(),
        GraphQLParseErrorKind::UnclosedDelimiter { delimiter } if delimiter == "{"
    ));
    assert_eq!(error.notes(), ["opening `{` at 2:10"]);
}

#[test]
fn integer_overflow_is_an_invalid_value() {
    let result = parse_executable("{ recipes(first: 99999999999999999999) { name } }");
    assert!(matches!(
        result.errors[0].kind(),
        GraphQLParseErrorKind::InvalidValue(InvalidValueReason::IntOverflow(raw))
            if raw == "99999999999999999999"
    ));
}

#[test]
fn variables_are_rejected_in_const_contexts() {
    let result = parse_executable("query ($a: Int = $b) { f(x: $a) }");
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(
        result.errors[0].kind(),
        GraphQLParseErrorKind::VariableInConstContext { name } if name == "b"
    ));

    let result = parse_schema("type Query { f(x: Int = $y): Int }");
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn lexer_errors_surface_as_parse_errors() {
    let result = parse_executable("{ recipe % }");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind(), &GraphQLParseErrorKind::LexerError);
    assert_eq!(result.errors[0].message(), "Unexpected character `%`");
}

#[test]
fn type_definitions_are_rejected_in_executable_documents() {
    let result = parse_executable("scalar Date\nquery { recipe { name } }");
    assert!(matches!(
        result.errors[0].kind(),
        GraphQLParseErrorKind::WrongDocumentKind { .. }
    ));
    // The trailing operation is still parsed.
    assert_eq!(result.ast().map(|doc| doc.definitions.len()), Some(1));
}

/// After an error, parsing resumes at the next definition so that every
/// broken definition is reported in one pass.
#[test]
fn recovery_reports_one_error_per_broken_definition() {
    let result = parse_schema(
        "type A { field:: String }
         type B { ok: String }
         type C { other: [String }
         type D { ok: Int }",
    );
    assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
    let names: Vec<_> = result
        .ast()
        .unwrap()
        .definitions
        .iter()
        .map(|def| def.describe())
        .collect();
    assert_eq!(
        names,
        vec!["type definition `B`", "type definition `D`"],
    );
}

#[test]
fn recursion_depth_is_bounded() {
    let source = format!("{{ f(x: {}1{}) }}", "[".repeat(200), "]".repeat(200));
    let result = parse_executable(&source);
    assert!(result
        .errors
        .iter()
        .any(|e| e.kind() == &GraphQLParseErrorKind::RecursionLimitExceeded));
}

#[test]
fn into_result_returns_every_error() {
    let errors = crate::parse_query("{ a(: 1) } { b(: 2) }").unwrap_err();
    assert_eq!(errors.len(), 2);
}
