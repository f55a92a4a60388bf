use crate::coercion::ScalarError;
use crate::coercion::ScalarImpl;
use crate::loc;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::TypeValidationError;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::TypeAnnotation;
use crate::Value;
use raclette_parser::ast;
use raclette_parser::ast::OperationKind;

type Result<T> = std::result::Result<T, SchemaBuildError>;

struct PassThrough;
impl ScalarImpl for PassThrough {
    fn serialize(&self, value: &Value) -> std::result::Result<Value, ScalarError> {
        Ok(value.clone())
    }

    fn parse_value(&self, value: &Value) -> std::result::Result<Value, ScalarError> {
        Ok(value.clone())
    }

    fn parse_literal(&self, literal: &ast::Value) -> std::result::Result<Value, ScalarError> {
        match literal {
            ast::Value::String(s) => Ok(Value::String(s.clone())),
            _ => Err(ScalarError::new("expected a string")),
        }
    }
}

fn build_err(sdl: &str) -> SchemaBuildError {
    match SchemaBuilder::new().load_str(None, sdl).and_then(SchemaBuilder::build) {
        Ok(schema) => panic!("expected a build error, built {schema:?}"),
        Err(err) => err,
    }
}

fn type_validation_errors(sdl: &str) -> Vec<TypeValidationError> {
    match build_err(sdl) {
        SchemaBuildError::TypeValidationErrors { errors } => errors,
        other => panic!("expected type validation errors, found {other:?}"),
    }
}

mod basics {
    use super::*;

    #[test]
    fn build_without_load() -> Result<()> {
        let schema = SchemaBuilder::new().build();
        assert!(matches!(schema, Err(SchemaBuildError::NoQueryOperationTypeDefined)));
        Ok(())
    }

    #[test]
    fn load_all_empty_operation_types_in_single_str() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Mutation\ntype Query\ntype Subscription")?
            .build()?;

        assert_eq!(schema.all_directives().len(), 4);
        assert_eq!(schema.query_type().name(), "Query");
        assert_eq!(schema.mutation_type().map(|t| t.name()), Some("Mutation"));
        assert_eq!(schema.subscription_type().map(|t| t.name()), Some("Subscription"));
        assert!(schema.query_type().fields().is_empty());
        assert_eq!(
            schema.query_type().def_location(),
            &loc::SchemaDefLocation::Schema(loc::FilePosition {
                col: 1,
                line: 2,
                source: "str://0".to_string(),
            }),
        );

        Ok(())
    }

    #[test]
    fn builtin_scalars_directives_and_introspection_types_are_injected() -> Result<()> {
        let schema = SchemaBuilder::new().load_str(None, "type Query { a: Int }")?.build()?;

        for name in ["Int", "Float", "String", "Boolean", "ID"] {
            let type_ = schema.lookup(name).expect("builtin scalar");
            assert!(type_.is_builtin_scalar(), "{name}");
        }
        for name in ["skip", "include", "deprecated", "specifiedBy"] {
            assert!(schema.directive(name).is_some_and(|d| d.is_builtin()), "{name}");
        }
        for name in ["__Schema", "__Type", "__TypeKind", "__Field", "__Directive"] {
            let type_ = schema.lookup(name).expect("introspection type");
            assert_eq!(type_.def_location(), &loc::SchemaDefLocation::GraphQLBuiltIn);
        }

        let deprecated = schema.directive("deprecated").expect("builtin");
        assert_eq!(
            deprecated.parameters()["reason"].default_value(),
            Some(&ast::Value::String("Deprecated".to_string())),
        );

        Ok(())
    }

    #[test]
    fn named_source_appears_in_locations() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(Some("recipes.graphql"), "type Query {\n  recipe: String\n}")?
            .build()?;

        let field = schema.query_type().field("recipe").expect("field is defined");
        assert_eq!(field.def_location().to_string(), "recipes.graphql:2:3");
        Ok(())
    }

    #[test]
    fn schema_block_overrides_default_root_names() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, concat!(
                "schema { query: RootQuery, mutation: RootMutation }\n",
                "type RootQuery { a: Int }\n",
                "type RootMutation { b: Int }\n",
                "type Query { unused: Int }\n",
            ))?
            .build()?;

        assert_eq!(schema.query_type().name(), "RootQuery");
        assert_eq!(schema.mutation_type().map(|t| t.name()), Some("RootMutation"));
        assert_eq!(schema.root_type(OperationKind::Subscription), None);
        Ok(())
    }
}

mod extensions {
    use super::*;

    #[test]
    fn extensions_apply_after_all_definitions() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "extend type Query { b: String }")?
            .load_str(None, "type Query { a: Int }")?
            .load_str(None, "extend enum Color { BLUE }\nenum Color { RED }")?
            .build()?;

        assert_eq!(
            schema.query_type().fields().keys().collect::<Vec<_>>(),
            vec!["a", "b"],
        );
        let color = schema.lookup("Color").and_then(GraphQLType::as_enum).expect("enum");
        assert_eq!(color.values().keys().collect::<Vec<_>>(), vec!["RED", "BLUE"]);
        Ok(())
    }

    #[test]
    fn extension_of_undefined_type() {
        let err = build_err("type Query { a: Int }\nextend type Recipe { name: String }");
        assert!(matches!(
            err,
            SchemaBuildError::ExtensionOfUndefinedType { ref type_name, .. } if type_name == "Recipe",
        ));
    }

    #[test]
    fn extension_of_other_kind() {
        let err = build_err("type Query { a: Int }\nenum Recipe { A }\nextend type Recipe { name: String }");
        assert!(matches!(
            err,
            SchemaBuildError::InvalidExtensionType {
                type_kind: GraphQLTypeKind::Enum,
                ..
            },
        ));
        assert_eq!(
            err.to_string(),
            "Attempted to extend the `Recipe` type with an extension of a different kind; `Recipe` is an enum",
        );
    }

    #[test]
    fn extension_redefining_field() {
        let err = build_err("type Query { a: Int }\nextend type Query { a: String }");
        assert!(matches!(err, SchemaBuildError::DuplicateFieldNameDefinition { .. }));
    }
}

mod definition_errors {
    use super::*;

    #[test]
    fn duplicate_type_definition() {
        let err = build_err("type Query { a: Int }\ntype Query { b: Int }");
        assert!(matches!(
            err,
            SchemaBuildError::DuplicateTypeDefinition { ref type_name, .. } if type_name == "Query",
        ));
    }

    #[test]
    fn redefining_builtin_scalar() {
        let err = build_err("type Query { a: Int }\nscalar Int");
        assert!(matches!(err, SchemaBuildError::DuplicateTypeDefinition { .. }));
    }

    #[test]
    fn duplicate_field_argument_and_enum_value() {
        assert!(matches!(
            build_err("type Query { a: Int a: String }"),
            SchemaBuildError::DuplicateFieldNameDefinition { .. },
        ));
        assert!(matches!(
            build_err("type Query { a(x: Int, x: Int): Int }"),
            SchemaBuildError::DuplicateParameterDefinition { ref owner, .. } if owner == "Query.a",
        ));
        assert!(matches!(
            build_err("type Query { a: Int }\nenum E { A A }"),
            SchemaBuildError::DuplicateEnumValueDefinition { .. },
        ));
    }

    #[test]
    fn dunder_prefixed_names() {
        assert!(matches!(
            build_err("type Query { a: Int }\ntype __Secret { a: Int }"),
            SchemaBuildError::InvalidDunderPrefixedTypeName { .. },
        ));
        assert!(matches!(
            build_err("type Query { __a: Int }"),
            SchemaBuildError::InvalidDunderPrefixedFieldName { .. },
        ));
        assert!(matches!(
            build_err("type Query { a(__x: Int): Int }"),
            SchemaBuildError::InvalidDunderPrefixedParamName { .. },
        ));
        assert!(matches!(
            build_err("type Query { a: Int }\ndirective @__hidden on FIELD"),
            SchemaBuildError::InvalidDunderPrefixedDirectiveName { .. },
        ));
    }

    #[test]
    fn directive_definitions() {
        assert!(matches!(
            build_err("type Query { a: Int }\ndirective @skip(if: Boolean!) on FIELD"),
            SchemaBuildError::RedefinitionOfBuiltinDirective { .. },
        ));
        assert!(matches!(
            build_err("type Query { a: Int }\ndirective @upper on FIELD\ndirective @upper on FIELD"),
            SchemaBuildError::DuplicateDirectiveDefinition { .. },
        ));
    }

    #[test]
    fn undefined_and_misplaced_directives_in_sdl() {
        assert!(matches!(
            build_err("type Query { a: Int @cached }"),
            SchemaBuildError::UndefinedDirective { ref directive_name, ref element, .. }
                if directive_name == "cached" && element == "Query.a",
        ));
        assert!(matches!(
            build_err("type Query @deprecated { a: Int }"),
            SchemaBuildError::MisplacedDirective { .. },
        ));
    }

    #[test]
    fn custom_scalar_needs_an_implementation() -> Result<()> {
        let sdl = "scalar Date\ntype Query { today: Date }";
        assert!(matches!(
            build_err(sdl),
            SchemaBuildError::MissingScalarImplementation { ref scalar_name, .. } if scalar_name == "Date",
        ));

        let schema = SchemaBuilder::new()
            .load_str(None, sdl)?
            .register_scalar("Date", PassThrough)
            .build()?;
        assert!(schema.scalar_impl("Date").is_some());

        let err = SchemaBuilder::new()
            .load_str(None, "type Query { a: Int }")?
            .register_scalar("Date", PassThrough)
            .build();
        assert!(matches!(err, Err(SchemaBuildError::ScalarImplementationForUndefinedType { .. })));
        Ok(())
    }

    #[test]
    fn root_operation_types() {
        assert!(matches!(
            build_err("schema { query: Missing }\ntype Query { a: Int }"),
            SchemaBuildError::UndefinedRootOperationType { .. },
        ));
        assert!(matches!(
            build_err("schema { query: Q }\nunion Q = A\ntype A { a: Int }"),
            SchemaBuildError::InvalidRootOperationType {
                type_kind: GraphQLTypeKind::Union,
                ..
            },
        ));
        assert!(matches!(
            build_err("schema { query: Q, mutation: Q }\ntype Q { a: Int }"),
            SchemaBuildError::NonUniqueOperationTypes {
                operation1: OperationKind::Query,
                operation2: OperationKind::Mutation,
                ..
            },
        ));
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = SchemaBuilder::new().load_str(Some("broken.graphql"), "type Query { a: }");
        let Err(SchemaBuildError::ParseError { source_name, errors }) = err else {
            panic!("expected a parse error");
        };
        assert_eq!(source_name, "broken.graphql");
        assert!(!errors.is_empty());
    }
}

mod type_validation {
    use super::*;

    #[test]
    fn undefined_type_references() {
        let errors = type_validation_errors("type Query { recipe: Recipe, other(x: Missing): Int }");
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            TypeValidationError::UndefinedTypeName { undefined_type_name, .. } if undefined_type_name == "Recipe",
        ));
        assert!(matches!(
            &errors[1],
            TypeValidationError::UndefinedTypeName { undefined_type_name, .. } if undefined_type_name == "Missing",
        ));
    }

    #[test]
    fn input_and_output_positions() {
        let errors = type_validation_errors(concat!(
            "type Query { a(r: Recipe): Int, b: RecipeInput }\n",
            "type Recipe { id: Int }\n",
            "input RecipeInput { r: Recipe }\n",
        ));
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, TypeValidationError::InvalidParameterWithOutputOnlyType { .. })));
        assert!(errors.iter().any(|e| matches!(e, TypeValidationError::InvalidOutputFieldWithInputType { .. })));
        assert!(errors.iter().any(|e| matches!(e, TypeValidationError::InvalidInputFieldWithOutputType { .. })));
    }

    #[test]
    fn union_members_must_be_objects() {
        let errors = type_validation_errors(concat!(
            "type Query { a: U }\n",
            "union U = Query | E\n",
            "enum E { X }\n",
        ));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Invalid union member type: the `U` union lists `E` as a member, but \
            it is an enum type and union members can only be object types.",
        );
    }

    #[test]
    fn interface_implementation_rules() {
        let errors = type_validation_errors(concat!(
            "type Query { node: Node }\n",
            "interface Node { id(format: String): ID!, name: String }\n",
            "type Recipe implements Node { id(format: Int, extra: Int!): ID! }\n",
        ));
        assert!(errors.iter().any(|e| matches!(
            e,
            TypeValidationError::MissingInterfaceSpecifiedField { field_name, .. } if field_name == "name",
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            TypeValidationError::InvalidInterfaceSpecifiedFieldParameterType { parameter_name, .. }
                if parameter_name == "format",
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            TypeValidationError::InvalidRequiredAdditionalParameterOnInterfaceSpecifiedField {
                parameter_name,
                ..
            } if parameter_name == "extra",
        )));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn covariant_interface_field_types() -> Result<()> {
        SchemaBuilder::new()
            .load_str(None, concat!(
                "type Query { node: Node }\n",
                "interface Node { id: ID, parent: Node, children: [Node] }\n",
                "type Recipe implements Node { id: ID!, parent: Recipe, children: [Recipe!]! }\n",
            ))?
            .build()?;

        let errors = type_validation_errors(concat!(
            "type Query { node: Node }\n",
            "interface Node { id: ID! }\n",
            "type Recipe implements Node { id: ID }\n",
        ));
        assert!(matches!(
            &errors[..],
            [TypeValidationError::InvalidInterfaceSpecifiedFieldType { expected_field_type, .. }]
                if *expected_field_type == TypeAnnotation::named("ID", false),
        ));
        Ok(())
    }

    #[test]
    fn implementing_undefined_or_non_interface() {
        let errors = type_validation_errors(concat!(
            "type Query implements Missing & Recipe { a: Int }\n",
            "type Recipe { a: Int }\n",
        ));
        assert!(matches!(
            &errors[..],
            [
                TypeValidationError::ImplementsUndefinedInterface { .. },
                TypeValidationError::ImplementsNonInterfaceType { .. },
            ],
        ));
    }

    #[test]
    fn transitive_interfaces_must_be_declared() {
        let errors = type_validation_errors(concat!(
            "type Query { a: Int }\n",
            "interface Node { id: ID }\n",
            "interface Resource implements Node { id: ID }\n",
            "type Recipe implements Resource { id: ID }\n",
        ));
        assert!(matches!(
            &errors[..],
            [TypeValidationError::MissingRecursiveInterfaceImplementation {
                missing_recursive_interface_name,
                ..
            }] if missing_recursive_interface_name == "Node",
        ));
    }

    #[test]
    fn input_object_cycles() -> Result<()> {
        let errors = type_validation_errors(concat!(
            "type Query { a(x: A): Int }\n",
            "input A { b: B! }\n",
            "input B { a: A! }\n",
        ));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0],
            TypeValidationError::CircularInputFieldChain {
                circular_field_path: vec!["A.b".to_string(), "B.a".to_string(), "A".to_string()],
            },
        );

        // Nullable and list fields break the cycle.
        SchemaBuilder::new()
            .load_str(None, concat!(
                "type Query { a(x: A): Int }\n",
                "input A { b: B!, parent: A, many: [A!]! }\n",
                "input B { a: A }\n",
            ))?
            .build()?;
        Ok(())
    }
}
