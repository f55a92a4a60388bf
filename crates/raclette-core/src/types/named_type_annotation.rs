use crate::schema::Schema;
use crate::types::GraphQLType;

/// A reference to a named type, e.g. `Recipe` or `Int!`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedTypeAnnotation {
    pub(crate) name: String,
    pub(crate) nullable: bool,
}
impl NamedTypeAnnotation {
    /// The referenced type. Only `None` for annotations that were never
    /// checked against `schema` (e.g. variables of an unvalidated query).
    pub fn graphql_type<'schema>(&self, schema: &'schema Schema) -> Option<&'schema GraphQLType> {
        schema.lookup(&self.name)
    }

    pub fn graphql_type_name(&self) -> &str {
        &self.name
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}
