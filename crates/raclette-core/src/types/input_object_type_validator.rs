use crate::schema::TypeValidationError;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use std::collections::HashSet;

pub(super) struct InputObjectTypeValidator<'a> {
    errors: Vec<TypeValidationError>,
    type_: &'a InputObjectType,
    types_map: &'a IndexMap<String, GraphQLType>,
}
impl<'a> InputObjectTypeValidator<'a> {
    pub fn new(type_: &'a InputObjectType, types_map: &'a IndexMap<String, GraphQLType>) -> Self {
        Self {
            errors: vec![],
            type_,
            types_map,
        }
    }

    pub fn validate(mut self) -> Vec<TypeValidationError> {
        let type_name = self.type_.name();
        for (field_name, field) in self.type_.fields() {
            let innermost_type_name = field.type_annotation().innermost_type_name();
            match self.types_map.get(innermost_type_name) {
                // https://spec.graphql.org/October2021/#sel-IAHhBXDDBFCAACEB4iG
                Some(innermost_type) if !innermost_type.is_input_type() => {
                    self.errors.push(TypeValidationError::InvalidInputFieldWithOutputType {
                        def_location: field.def_location().to_owned(),
                        field_name: field_name.to_owned(),
                        invalid_type_name: innermost_type_name.to_string(),
                        parent_type_name: type_name.to_owned(),
                    });
                }
                Some(_) => (),
                None => self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: field.def_location().to_owned(),
                    referenced_by: format!("{type_name}.{field_name}"),
                    undefined_type_name: innermost_type_name.to_string(),
                }),
            }
        }

        self.find_unbreakable_cycles(
            type_name,
            self.type_.fields(),
            &mut vec![],
            HashSet::from([type_name]),
        );
        self.errors
    }

    // Only follows non-null, non-list fields: a nullable field or a list can
    // always be satisfied with `null` or `[]`.
    fn find_unbreakable_cycles(
        &mut self,
        type_name: &'a str,
        fields: &'a IndexMap<String, Parameter>,
        path: &mut Vec<String>,
        seen_type_names: HashSet<&'a str>,
    ) {
        for (field_name, field) in fields {
            let TypeAnnotation::Named(named) = field.type_annotation() else {
                continue;
            };
            if named.nullable() {
                continue;
            }
            let field_type_name = named.graphql_type_name();
            path.push(format!("{type_name}.{field_name}"));
            if field_type_name == self.type_.name() {
                let mut circular_field_path = path.clone();
                circular_field_path.push(field_type_name.to_string());
                self.errors.push(TypeValidationError::CircularInputFieldChain {
                    circular_field_path,
                });
            } else if !seen_type_names.contains(field_type_name)
                && let Some(GraphQLType::InputObject(input_obj_type)) =
                    self.types_map.get(field_type_name)
            {
                let mut seen_type_names = seen_type_names.clone();
                seen_type_names.insert(field_type_name);
                self.find_unbreakable_cycles(
                    field_type_name,
                    input_obj_type.fields(),
                    path,
                    seen_type_names,
                );
            }
            path.pop();
        }
    }
}
