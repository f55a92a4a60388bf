use crate::execution::GraphQLError;
use crate::execution::field_collection::Occurrence;
use crate::execution::field_collection::collect_occurrences;
use crate::schema::Schema;
use raclette_parser::ast;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Cache key: the runtime object type and the address of a selection set.
type CollectionKey = (String, usize);

/// A parsed and validated executable document, ready to be executed any
/// number of times with different operation names and variables.
///
/// Produced by [`Engine::prepare`](crate::engine::Engine::prepare). Holds
/// the flattened field lists of every (object type, selection set) pair it
/// has executed so far, so repeated executions skip fragment expansion.
pub struct PreparedDocument {
    collected_fields: Mutex<HashMap<CollectionKey, Arc<Vec<Occurrence>>>>,
    document: ast::Document,
}
impl PreparedDocument {
    pub(crate) fn new(document: ast::Document) -> Self {
        Self {
            collected_fields: Mutex::new(HashMap::new()),
            document,
        }
    }

    pub fn document(&self) -> &ast::Document {
        &self.document
    }

    /// Picks the operation to execute: the one named `operation_name`, or
    /// the only operation of the document when no name is given.
    pub fn operation(&self, operation_name: Option<&str>) -> Result<&ast::OperationDefinition, GraphQLError> {
        match operation_name {
            Some(name) => self
                .document
                .operations()
                .find(|op| op.name.as_deref() == Some(name))
                .ok_or_else(|| GraphQLError::new(format!("Unknown operation named \"{name}\"."))),

            None => {
                let mut operations = self.document.operations();
                match (operations.next(), operations.next()) {
                    (Some(op), None) => Ok(op),
                    (Some(_), Some(_)) => Err(GraphQLError::new(
                        "Must provide operation name if query contains multiple operations.",
                    )),
                    (None, _) => Err(GraphQLError::new("Must provide an operation.")),
                }
            }
        }
    }

    /// The flattened fields of `selection_set` for values of `type_name`.
    ///
    /// `selection_set` must live inside this document or inside a field
    /// handed out by an earlier call; the cache keeps those alive, so their
    /// addresses stay unique.
    pub(crate) fn collect_fields(
        &self,
        schema: &Schema,
        type_name: &str,
        selection_set: &ast::SelectionSet,
    ) -> Arc<Vec<Occurrence>> {
        let key = (type_name.to_string(), selection_set as *const ast::SelectionSet as usize);
        if let Some(cached) = self.lock_cache().get(&key) {
            return cached.clone();
        }

        let occurrences = Arc::new(collect_occurrences(schema, &self.document, type_name, selection_set));
        self.lock_cache().entry(key).or_insert(occurrences).clone()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<CollectionKey, Arc<Vec<Occurrence>>>> {
        self.collected_fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn cached_collections(&self) -> usize {
        self.lock_cache().len()
    }
}
impl std::fmt::Debug for PreparedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedDocument")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}
