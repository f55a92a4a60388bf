use crate::schema::TypeValidationError;
use crate::types::GraphQLType;
use crate::types::UnionType;
use indexmap::IndexMap;

pub(super) struct UnionTypeValidator<'a> {
    errors: Vec<TypeValidationError>,
    type_: &'a UnionType,
    types_map: &'a IndexMap<String, GraphQLType>,
}
impl<'a> UnionTypeValidator<'a> {
    pub fn new(type_: &'a UnionType, types_map: &'a IndexMap<String, GraphQLType>) -> Self {
        Self {
            errors: vec![],
            type_,
            types_map,
        }
    }

    pub fn validate(mut self) -> Vec<TypeValidationError> {
        for member_type_name in self.type_.member_type_names() {
            // https://spec.graphql.org/October2021/#sel-HAHdfFDABABlG3ib
            let Some(member_type) = self.types_map.get(member_type_name) else {
                self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: self.type_.def_location().to_owned(),
                    referenced_by: self.type_.name().to_string(),
                    undefined_type_name: member_type_name.to_string(),
                });
                continue;
            };
            if !matches!(member_type, GraphQLType::Object(_)) {
                self.errors.push(TypeValidationError::InvalidUnionMemberTypeKind {
                    location: self.type_.def_location().to_owned(),
                    member_type_kind: member_type.kind(),
                    member_type_name: member_type_name.to_string(),
                    union_type_name: self.type_.name().to_string(),
                });
            }
        }

        self.errors
    }
}
