use crate::ir::Document;
use crate::schema::Schema;
use crate::store::DocumentStore;

/// Read-only traversal state the framework refines per level: the document
/// being rewritten, the schema type currently in scope, and the aliased
/// selection path from the document root.
///
/// Handlers never mutate this; descending into a field or inline fragment
/// produces a new context for the child level.
#[derive(Clone, Debug)]
pub struct TraversalContext<'s> {
    document_name: &'s str,
    parent_type_name: String,
    path: Vec<String>,
    store: &'s DocumentStore,
}
impl<'s> TraversalContext<'s> {
    pub(crate) fn for_document(
        store: &'s DocumentStore,
        document: &'s Document,
    ) -> Self {
        Self {
            document_name: document.name(),
            parent_type_name: document.root_type_name().to_string(),
            path: vec![],
            store,
        }
    }

    pub fn document_name(&self) -> &str {
        self.document_name
    }

    /// The raw name of the schema type the current selections are made
    /// against.
    pub fn parent_type_name(&self) -> &str {
        self.parent_type_name.as_str()
    }

    /// Aliased field names from the document root down to (excluding) the
    /// node currently being visited.
    pub fn path(&self) -> &[String] {
        self.path.as_slice()
    }

    pub fn schema(&self) -> &Schema {
        self.store.schema()
    }

    pub fn store(&self) -> &DocumentStore {
        self.store
    }

    /// The context for the children of a composite field.
    pub(crate) fn for_composite_field(
        &self,
        alias_or_name: &str,
        raw_type_name: &str,
    ) -> Self {
        let mut path = self.path.clone();
        path.push(alias_or_name.to_string());
        Self {
            document_name: self.document_name,
            parent_type_name: raw_type_name.to_string(),
            path,
            store: self.store,
        }
    }

    /// The context for the children of an inline fragment (or any other node
    /// that narrows the type in scope without extending the path).
    pub(crate) fn with_parent_type(&self, raw_type_name: &str) -> Self {
        Self {
            document_name: self.document_name,
            parent_type_name: raw_type_name.to_string(),
            path: self.path.clone(),
            store: self.store,
        }
    }
}
