use crate::directives::DirectiveImpl;
use crate::execution::ErrorCoercer;
use crate::execution::FieldResolver;
use crate::execution::SubscriptionResolver;
use crate::execution::TypeResolver;
use std::collections::HashMap;
use std::sync::Arc;

/// The callables an [`Engine`](crate::engine::Engine) dispatches to, keyed
/// by the schema names they are bound to.
///
/// Populated through [`EngineBuilder`](crate::engine::EngineBuilder), which
/// checks every binding against the schema.
#[derive(Clone, Default)]
pub struct ResolverMap {
    pub(crate) default_resolver: Option<Arc<dyn FieldResolver>>,
    pub(crate) directives: HashMap<String, Arc<dyn DirectiveImpl>>,
    pub(crate) error_coercer: Option<Arc<dyn ErrorCoercer>>,
    pub(crate) fields: HashMap<String, HashMap<String, Arc<dyn FieldResolver>>>,
    pub(crate) subscriptions: HashMap<String, HashMap<String, Arc<dyn SubscriptionResolver>>>,
    pub(crate) type_resolvers: HashMap<String, Arc<dyn TypeResolver>>,
}
impl ResolverMap {
    pub fn directive(&self, name: &str) -> Option<&Arc<dyn DirectiveImpl>> {
        self.directives.get(name)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&Arc<dyn FieldResolver>> {
        self.fields.get(type_name)?.get(field_name)
    }

    pub fn subscription(&self, type_name: &str, field_name: &str) -> Option<&Arc<dyn SubscriptionResolver>> {
        self.subscriptions.get(type_name)?.get(field_name)
    }

    pub fn type_resolver(&self, type_name: &str) -> Option<&Arc<dyn TypeResolver>> {
        self.type_resolvers.get(type_name)
    }

    pub(crate) fn insert_field(&mut self, type_name: &str, field_name: &str, resolver: Arc<dyn FieldResolver>) {
        self.fields
            .entry(type_name.to_string())
            .or_default()
            .insert(field_name.to_string(), resolver);
    }

    pub(crate) fn insert_subscription(
        &mut self,
        type_name: &str,
        field_name: &str,
        resolver: Arc<dyn SubscriptionResolver>,
    ) {
        self.subscriptions
            .entry(type_name.to_string())
            .or_default()
            .insert(field_name.to_string(), resolver);
    }
}

fn binding_names<T>(map: &HashMap<String, HashMap<String, T>>) -> Vec<String> {
    let mut names: Vec<String> = map
        .iter()
        .flat_map(|(type_name, fields)| fields.keys().map(move |field| format!("{type_name}.{field}")))
        .collect();
    names.sort();
    names
}

impl std::fmt::Debug for ResolverMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut directive_names: Vec<&String> = self.directives.keys().collect();
        directive_names.sort();
        let mut type_resolver_names: Vec<&String> = self.type_resolvers.keys().collect();
        type_resolver_names.sort();
        f.debug_struct("ResolverMap")
            .field("fields", &binding_names(&self.fields))
            .field("subscriptions", &binding_names(&self.subscriptions))
            .field("type_resolvers", &type_resolver_names)
            .field("directives", &directive_names)
            .field("default_resolver", &self.default_resolver.is_some())
            .field("error_coercer", &self.error_coercer.is_some())
            .finish()
    }
}
