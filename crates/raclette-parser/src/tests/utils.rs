//! Various test utils.

use crate::GraphQLParser;
use crate::ParseResult;
use crate::ast;

pub fn parse_executable(source: &str) -> ParseResult<ast::Document> {
    GraphQLParser::new(source).parse_executable_document()
}

pub fn parse_schema(source: &str) -> ParseResult<ast::Document> {
    GraphQLParser::new(source).parse_schema_document()
}

/// Parses `source` as an executable document containing exactly one
/// operation, panicking on any error.
pub fn parse_single_operation(source: &str) -> ast::OperationDefinition {
    let result = parse_executable(source);
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    match result.into_result() {
        Ok(mut doc) => match doc.definitions.remove(0) {
            ast::Definition::Operation(op) => op,
            other => panic!("expected an operation, found {other:?}"),
        },
        Err(errors) => panic!("unexpected errors: {errors:?}"),
    }
}

pub fn first_field(selection_set: &ast::SelectionSet) -> &ast::Field {
    match &selection_set.selections[0] {
        ast::Selection::Field(field) => field,
        other => panic!("expected a field, found {other:?}"),
    }
}

/// Parses `source` as a schema document containing exactly one type
/// definition, panicking on any error.
pub fn parse_single_type(source: &str) -> ast::TypeDefinition {
    match parse_schema(source).into_result() {
        Ok(mut doc) => match doc.definitions.remove(0) {
            ast::Definition::Type(def) => def,
            other => panic!("expected a type definition, found {other:?}"),
        },
        Err(errors) => panic!("unexpected errors: {errors:?}"),
    }
}
