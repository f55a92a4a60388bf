use super::recipes_schema;
use crate::Value;
use crate::coercion::coerce_arguments;
use crate::coercion::CoercionError;
use crate::schema::Schema;
use indexmap::IndexMap;
use raclette_parser::ast;

type Result<T> = std::result::Result<T, CoercionError>;

fn recipe_arguments(query: &str) -> Vec<ast::Argument> {
    let doc = raclette_parser::parse_query(query).expect("valid query");
    let Some(ast::Selection::Field(field)) = doc
        .operations()
        .next()
        .and_then(|op| op.selection_set.selections.first())
    else {
        panic!("expected a field selection");
    };
    field.arguments.clone()
}

fn coerce(schema: &Schema, query: &str, variables: &IndexMap<String, Value>) -> Result<IndexMap<String, Value>> {
    let field = schema.query_type().field("recipe").expect("field is defined");
    coerce_arguments(field.parameters(), &recipe_arguments(query), variables, schema)
}

mod basics {
    use super::*;

    #[test]
    fn defaults_apply_and_omitted_arguments_stay_absent() -> Result<()> {
        let schema = recipes_schema();
        let args = coerce(&schema, "{ recipe(id: 1) { id } }", &IndexMap::new())?;
        assert_eq!(
            args,
            IndexMap::from([
                ("id".to_string(), Value::Int(1)),
                ("servings".to_string(), Value::Int(4)),
            ]),
        );
        Ok(())
    }

    #[test]
    fn variables_are_substituted() -> Result<()> {
        let schema = recipes_schema();
        let variables = IndexMap::from([
            ("id".to_string(), Value::Int(7)),
            ("servings".to_string(), Value::Null),
        ]);
        let args = coerce(
            &schema,
            "query($id: Int!, $servings: Int) { recipe(id: $id, servings: $servings, diet: VEGAN) { id } }",
            &variables,
        )?;
        assert_eq!(args["id"], Value::Int(7));
        assert_eq!(args["servings"], Value::Null);
        assert_eq!(args["diet"], Value::Enum("VEGAN".to_string()));
        Ok(())
    }

    #[test]
    fn required_argument_messages() {
        let schema = recipes_schema();
        let message = |query: &str| coerce(&schema, query, &IndexMap::new()).unwrap_err().to_string();

        assert_eq!(
            message("{ recipe { id } }"),
            "Argument < id > of required type < Int! > was not provided.",
        );
        assert_eq!(
            message("{ recipe(id: null) { id } }"),
            "Argument < id > of non-null type < Int! > must not be null.",
        );
        assert_eq!(
            message("query($v: Int) { recipe(id: $v) { id } }"),
            "Argument < id > of required type < Int! > was provided the variable < $v > \
            which was not provided a runtime value.",
        );
        assert_eq!(
            message(r#"{ recipe(id: "one") { id } }"#),
            "Argument < id > has invalid value < \"one\" >; Expected type < Int >",
        );
    }
}
