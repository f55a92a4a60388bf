use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::types::Field;
use indexmap::IndexMap;

/// The shape shared by object and interface types.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectOrInterfaceTypeData {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl ObjectOrInterfaceTypeData {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        &self.directives
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Fields in definition order.
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(String::as_str).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Represents a GraphQL [object type](https://spec.graphql.org/October2021/#sec-Objects).
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType(pub(crate) ObjectOrInterfaceTypeData);
impl std::ops::Deref for ObjectType {
    type Target = ObjectOrInterfaceTypeData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Represents a GraphQL [interface type](https://spec.graphql.org/October2021/#sec-Interfaces).
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType(pub(crate) ObjectOrInterfaceTypeData);
impl std::ops::Deref for InterfaceType {
    type Target = ObjectOrInterfaceTypeData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
