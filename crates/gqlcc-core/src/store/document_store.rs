use crate::errors::UserError;
use crate::ir::Document;
use crate::ir::Fragment;
use crate::loc;
use crate::schema::Schema;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// The immutable-per-revision set of all documents visible to a pass.
///
/// Application-authored documents are distinguished from base documents
/// (schema-extension / dependency-only sources): base documents resolve
/// fragment spreads but are never independently code-generated.
///
/// A pass consumes one store and returns a new one; documents the pass did
/// not touch share their `Arc` between revisions.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    base_names: HashSet<String>,
    documents: IndexMap<String, Arc<Document>>,
    schema: Arc<Schema>,
}
impl DocumentStore {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            base_names: HashSet::new(),
            documents: IndexMap::new(),
            schema,
        }
    }

    /// A store with the same schema and no documents; the starting point for
    /// a pass's output revision.
    pub fn next_revision(&self) -> Self {
        Self::new(Arc::clone(&self.schema))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register a document. No two documents may share a name; a collision
    /// is a user error citing both definitions.
    pub fn insert(
        &mut self,
        document: Document,
        base: bool,
    ) -> Result<(), UserError> {
        self.insert_shared(Arc::new(document), base)
    }

    /// [`DocumentStore::insert`] for documents already shared between store
    /// revisions.
    pub fn insert_shared(
        &mut self,
        document: Arc<Document>,
        base: bool,
    ) -> Result<(), UserError> {
        if let Some(existing) = self.documents.get(document.name()) {
            return Err(UserError::DuplicateDocumentName {
                document_name: document.name().to_string(),
                first: existing.loc().clone(),
                second: document.loc().clone(),
            });
        }
        self.insert_arc(document, base);
        Ok(())
    }

    /// Register a document, replacing any existing document with the same
    /// name (used for synthesized documents, where last-wins is the
    /// contract).
    pub fn insert_replacing(&mut self, document: Document, base: bool) {
        self.insert_arc(Arc::new(document), base);
    }

    pub(crate) fn insert_arc(&mut self, document: Arc<Document>, base: bool) {
        if base {
            self.base_names.insert(document.name().to_string());
        } else {
            self.base_names.remove(document.name());
        }
        self.documents.insert(document.name().to_string(), document);
    }

    pub fn document(&self, name: &str) -> Option<&Arc<Document>> {
        self.documents.get(name)
    }

    /// Resolve a fragment spread. Failure to resolve is a user error against
    /// the spread's location.
    pub fn fragment(
        &self,
        name: &str,
        spread_loc: &loc::SourceLocation,
    ) -> Result<&Fragment, UserError> {
        self.documents
            .get(name)
            .and_then(|doc| doc.as_fragment())
            .ok_or_else(|| UserError::UndefinedFragment {
                fragment_name: name.to_string(),
                location: spread_loc.clone(),
            })
    }

    pub fn is_base(&self, name: &str) -> bool {
        self.base_names.contains(name)
    }

    /// All documents in registration order.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.values()
    }

    /// Application-authored (non-base) documents in registration order.
    pub fn source_documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents
            .values()
            .filter(|doc| !self.base_names.contains(doc.name()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
