use super::recipes_schema;
use crate::Value;
use crate::coercion::serialize_leaf;

mod basics {
    use super::*;

    #[test]
    fn enums_serialize_by_name() {
        let schema = recipes_schema();
        let diet = schema.lookup("Diet").expect("enum is defined");
        assert_eq!(serialize_leaf(&Value::from("VEGAN"), diet, &schema), Ok(Value::Enum("VEGAN".to_string())));
        assert_eq!(
            serialize_leaf(&Value::from("KETO"), diet, &schema).unwrap_err().to_string(),
            "Enum < Diet > cannot represent value: < \"KETO\" >",
        );
    }

    #[test]
    fn builtin_scalars() {
        let schema = recipes_schema();
        let int = schema.lookup("Int").expect("builtin");
        assert_eq!(serialize_leaf(&Value::Float(2.0), int, &schema), Ok(Value::Int(2)));
        assert!(serialize_leaf(&Value::from("two"), int, &schema).is_err());

        let recipe = schema.lookup("Recipe").expect("object is defined");
        assert!(serialize_leaf(&Value::object(), recipe, &schema).is_err());
    }
}
