use crate::schema::TypeValidationError;
use crate::types::GraphQLType;
use crate::types::ObjectOrInterfaceTypeData;
use indexmap::IndexMap;
use std::collections::HashSet;

pub(super) struct ObjectOrInterfaceTypeValidator<'a> {
    errors: Vec<TypeValidationError>,
    implemented_iface_names: Vec<&'a str>,
    inheritance_path: Vec<&'a str>,
    type_: &'a ObjectOrInterfaceTypeData,
    types_map: &'a IndexMap<String, GraphQLType>,
}
impl<'a> ObjectOrInterfaceTypeValidator<'a> {
    pub fn new(
        type_: &'a ObjectOrInterfaceTypeData,
        types_map: &'a IndexMap<String, GraphQLType>,
    ) -> Self {
        Self {
            errors: vec![],
            implemented_iface_names: type_.interface_names(),
            inheritance_path: vec![],
            type_,
            types_map,
        }
    }

    pub fn validate(mut self, verified_interface_impls: &mut HashSet<&'a str>) -> Vec<TypeValidationError> {
        let type_name = self.type_.name();
        let declared_iface_names: HashSet<&str> =
            self.type_.interface_names().into_iter().collect();

        for iface_name in self.implemented_iface_names.clone() {
            // Interfaces can implement interfaces, so the same interface may
            // be reached more than once.
            if !verified_interface_impls.insert(iface_name) {
                continue;
            }

            let Some(iface_type) = self.types_map.get(iface_name) else {
                self.errors.push(TypeValidationError::ImplementsUndefinedInterface {
                    type_name: type_name.to_string(),
                    undefined_interface_name: iface_name.to_string(),
                    location: self.type_.def_location().to_owned(),
                });
                continue;
            };

            let Some(iface) = iface_type.as_interface() else {
                self.errors.push(TypeValidationError::ImplementsNonInterfaceType {
                    type_name: type_name.to_string(),
                    non_interface_type_name: iface_type.name().to_string(),
                    location: self.type_.def_location().to_owned(),
                });
                continue;
            };

            // https://spec.graphql.org/October2021/#IsValidImplementation()
            let mut child_inheritance_path = self.inheritance_path.clone();
            child_inheritance_path.push(iface_name);
            for transitive_iface_name in iface.interface_names() {
                if !declared_iface_names.contains(transitive_iface_name) {
                    self.errors.push(TypeValidationError::MissingRecursiveInterfaceImplementation {
                        def_location: self.type_.def_location().to_owned(),
                        inheritance_path: child_inheritance_path
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                        missing_recursive_interface_name: transitive_iface_name.to_string(),
                        type_name: type_name.to_string(),
                    });
                }
            }

            let child_validator = ObjectOrInterfaceTypeValidator {
                errors: vec![],
                implemented_iface_names: iface.interface_names(),
                inheritance_path: child_inheritance_path,
                type_: self.type_,
                types_map: self.types_map,
            };
            self.errors.append(&mut child_validator.validate_interface_impls_only(verified_interface_impls));

            self.validate_interface_fields(iface_name, iface);
        }

        self.validate_own_fields();
        self.errors
    }

    // Transitive interfaces only need their field contracts checked; the
    // type's own fields are validated once by the outermost validator.
    fn validate_interface_impls_only(
        mut self,
        verified_interface_impls: &mut HashSet<&'a str>,
    ) -> Vec<TypeValidationError> {
        let mut pending = self.implemented_iface_names.clone();
        while let Some(iface_name) = pending.pop() {
            if !verified_interface_impls.insert(iface_name) {
                continue;
            }
            if let Some(GraphQLType::Interface(iface)) = self.types_map.get(iface_name) {
                self.validate_interface_fields(iface_name, iface);
                pending.extend(iface.interface_names());
            }
        }
        self.errors
    }

    fn validate_interface_fields(&mut self, iface_name: &str, iface: &ObjectOrInterfaceTypeData) {
        let type_name = self.type_.name();
        let type_fields = self.type_.fields();

        for (field_name, iface_field) in iface.fields() {
            let Some(type_field) = type_fields.get(field_name) else {
                self.errors.push(TypeValidationError::MissingInterfaceSpecifiedField {
                    def_location: self.type_.def_location().to_owned(),
                    field_name: field_name.to_string(),
                    interface_name: iface_name.to_string(),
                    type_name: type_name.to_string(),
                });
                continue;
            };

            let iface_field_params = iface_field.parameters();
            let type_field_params = type_field.parameters();

            // Every interface parameter must exist on the implementing field
            // with an equivalent type.
            for (param_name, iface_param) in iface_field_params {
                let Some(type_param) = type_field_params.get(param_name) else {
                    self.errors.push(TypeValidationError::MissingInterfaceSpecifiedFieldParameter {
                        def_location: type_field.def_location().to_owned(),
                        field_name: field_name.to_string(),
                        interface_name: iface_name.to_string(),
                        missing_parameter_name: param_name.to_string(),
                        type_name: type_name.to_string(),
                    });
                    continue;
                };

                let iface_param_type = iface_param.type_annotation();
                let type_param_type = type_param.type_annotation();
                if !type_param_type.is_equivalent_to(iface_param_type) {
                    self.errors.push(TypeValidationError::InvalidInterfaceSpecifiedFieldParameterType {
                        def_location: type_param.def_location().to_owned(),
                        expected_parameter_type: iface_param_type.to_owned(),
                        field_name: field_name.to_string(),
                        interface_name: iface_name.to_string(),
                        invalid_parameter_type: type_param_type.to_owned(),
                        parameter_name: param_name.to_string(),
                        type_name: type_name.to_string(),
                    });
                }
            }

            // Parameters the interface doesn't know about must be optional.
            for (param_name, type_param) in type_field_params {
                if iface_field_params.contains_key(param_name) {
                    continue;
                }
                if type_param.is_required() {
                    self.errors.push(
                        TypeValidationError::InvalidRequiredAdditionalParameterOnInterfaceSpecifiedField {
                            def_location: type_param.def_location().to_owned(),
                            field_name: field_name.to_string(),
                            interface_name: iface_name.to_string(),
                            parameter_name: param_name.to_string(),
                            type_name: type_name.to_string(),
                        },
                    );
                }
            }

            let type_field_annot = type_field.type_annotation();
            let iface_field_annot = iface_field.type_annotation();
            if !type_field_annot.is_subtype_of_impl(self.types_map, iface_field_annot) {
                self.errors.push(TypeValidationError::InvalidInterfaceSpecifiedFieldType {
                    def_location: type_field.def_location().to_owned(),
                    expected_field_type: iface_field_annot.to_owned(),
                    field_name: field_name.to_string(),
                    interface_name: iface_name.to_string(),
                    invalid_field_type: type_field_annot.to_owned(),
                    type_name: type_name.to_string(),
                });
            }
        }
    }

    fn validate_own_fields(&mut self) {
        let type_name = self.type_.name();
        for (field_name, field) in self.type_.fields() {
            // https://spec.graphql.org/October2021/#sel-JAHZhCFDBFABLBgB_pM
            let innermost_type_name = field.type_annotation().innermost_type_name();
            match self.types_map.get(innermost_type_name) {
                Some(innermost_type) if !innermost_type.is_output_type() => {
                    self.errors.push(TypeValidationError::InvalidOutputFieldWithInputType {
                        def_location: field.def_location().to_owned(),
                        field_name: field_name.to_string(),
                        input_type_name: innermost_type_name.to_string(),
                        parent_type_name: type_name.to_string(),
                    });
                }
                Some(_) => (),
                None => self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: field.def_location().to_owned(),
                    referenced_by: format!("{type_name}.{field_name}"),
                    undefined_type_name: innermost_type_name.to_string(),
                }),
            }

            for (param_name, param) in field.parameters() {
                // https://spec.graphql.org/October2021/#sel-KAHZhCFDBHBDCAACEB6yD
                let innermost_type_name = param.type_annotation().innermost_type_name();
                match self.types_map.get(innermost_type_name) {
                    Some(innermost_type) if !innermost_type.is_input_type() => {
                        self.errors.push(TypeValidationError::InvalidParameterWithOutputOnlyType {
                            def_location: param.def_location().to_owned(),
                            owner: format!("{type_name}.{field_name}"),
                            parameter_name: param_name.to_string(),
                            outputonly_type_name: innermost_type_name.to_string(),
                        });
                    }
                    Some(_) => (),
                    None => self.errors.push(TypeValidationError::UndefinedTypeName {
                        ref_location: param.def_location().to_owned(),
                        referenced_by: format!("{type_name}.{field_name}({param_name}:)"),
                        undefined_type_name: innermost_type_name.to_string(),
                    }),
                }
            }
        }
    }
}
